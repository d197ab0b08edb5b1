//! Extraction options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

use super::table_detector::TableDetectorConfig;

/// Options for extracting text from PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Page selection (which pages to keep)
    pub pages: PageSelection,

    /// Whether to look for text-aligned tables
    pub detect_tables: bool,

    /// Whether to normalize extracted text (NFC, ligatures)
    pub normalize: bool,

    /// Whether to try the fallback backend when the primary one fails
    pub fallback: bool,

    /// Table detection thresholds
    pub table_config: TableDetectorConfig,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable strict mode (a failing page fails the backend).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Enable or disable text normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Enable or disable the fallback backend.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set table detection thresholds.
    pub fn with_table_config(mut self, config: TableDetectorConfig) -> Self {
        self.table_config = config;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            pages: PageSelection::All,
            detect_tables: true,
            normalize: true,
            fallback: true,
            table_config: TableDetectorConfig::default(),
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the backend on any page error
    Strict,
    /// Skip pages that fail and continue
    #[default]
    Lenient,
}

/// Page selection for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Keep all pages
    #[default]
    All,
    /// Keep a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Keep specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = parse_bounds(s, start, end)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',').map(str::trim) {
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = parse_bounds(s, start, end)?;
                pages.extend(start..=end);
            } else {
                pages.push(parse_page_number(s, part)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page_number(spec: &str, part: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(spec.to_string())),
        Ok(n) => Ok(n),
    }
}

fn parse_bounds(spec: &str, start: &str, end: &str) -> Result<(u32, u32)> {
    let start = parse_page_number(spec, start)?;
    let end = parse_page_number(spec, end)?;
    if start > end {
        return Err(Error::InvalidPageRange(spec.to_string()));
    }
    Ok((start, end))
}
