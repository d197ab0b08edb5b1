//! Block extraction with primary/fallback backends.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::classify::classify_with_rule;
use crate::detect::sniff_bytes;
use crate::error::{Error, Result};
use crate::model::{ContentBlock, PageText, TableRecord};

use super::backend::{Extraction, ExtractionBackend, LopdfBackend, PdfExtractBackend};
use super::normalize::normalize_text;
use super::options::{ErrorMode, ParseOptions};
use super::table_detector::TableDetector;

/// Paragraph separator in extracted page text.
const PARAGRAPH_BREAK: &str = "\n\n";

/// Output of one extraction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    /// Classified blocks, by page then extraction order
    pub blocks: Vec<ContentBlock>,
    /// Trimmed text of each page that carried text
    pub pages: Vec<PageText>,
    /// Detected tables
    pub tables: Vec<TableRecord>,
    /// Backend that produced the blocks; `None` for an empty extraction
    pub backend: Option<&'static str>,
    /// Total number of pages in the PDF
    pub page_count: u32,
    /// PDF version
    pub pdf_version: Option<String>,
    /// `/Title` from the information dictionary
    pub info_title: Option<String>,
    /// `/CreationDate` from the information dictionary
    pub created: Option<DateTime<Utc>>,
}

impl Extracted {
    /// Check if no block was extracted.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Extracts classified blocks from PDF files.
///
/// The primary backend runs first. If it fails, or succeeds without
/// producing a single block, the fallback backend runs. If the fallback
/// fails too, the result is an empty extraction rather than an error.
pub struct Extractor {
    options: ParseOptions,
    primary: Box<dyn ExtractionBackend>,
    fallback: Option<Box<dyn ExtractionBackend>>,
}

impl Extractor {
    /// Create an extractor with the lopdf backend and, if enabled in the
    /// options, the pdf-extract fallback.
    pub fn new(options: ParseOptions) -> Self {
        let fallback: Option<Box<dyn ExtractionBackend>> = if options.fallback {
            Some(Box::new(PdfExtractBackend))
        } else {
            None
        };
        Self {
            options,
            primary: Box::new(LopdfBackend),
            fallback,
        }
    }

    /// Create an extractor with explicit backends.
    pub fn with_backends(
        options: ParseOptions,
        primary: Box<dyn ExtractionBackend>,
        fallback: Option<Box<dyn ExtractionBackend>>,
    ) -> Self {
        Self {
            options,
            primary,
            fallback,
        }
    }

    /// Extract blocks from the PDF at `path`.
    ///
    /// A missing file is [`Error::FileNotFound`] and a file without a PDF
    /// header is [`Error::UnknownFormat`].
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> Result<Extracted> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        log::info!("Extracting {} ({} bytes)", path.display(), data.len());
        self.extract_bytes(&data)
    }

    /// Extract blocks from in-memory PDF bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Extracted> {
        let header = sniff_bytes(data)?;
        log::debug!("Detected {}", header);

        let primary_error = match self.run(self.primary.as_ref(), data) {
            Ok(extracted) if !extracted.is_empty() => return Ok(extracted),
            Ok(_) => {
                log::warn!("{} produced no blocks", self.primary.name());
                None
            }
            Err(e) => {
                log::warn!("{} failed: {}", self.primary.name(), e);
                Some(e)
            }
        };

        let Some(fallback) = &self.fallback else {
            return match primary_error {
                Some(e) if self.options.error_mode == ErrorMode::Strict => Err(e),
                _ => Ok(Extracted::default()),
            };
        };

        log::info!("Trying fallback backend {}", fallback.name());
        match self.run(fallback.as_ref(), data) {
            Ok(extracted) if !extracted.is_empty() => Ok(extracted),
            Ok(_) => {
                log::warn!("{} produced no blocks, emitting empty result", fallback.name());
                Ok(Extracted::default())
            }
            Err(e) => {
                log::warn!("{} failed: {}, emitting empty result", fallback.name(), e);
                Ok(Extracted::default())
            }
        }
    }

    fn run(&self, backend: &dyn ExtractionBackend, data: &[u8]) -> Result<Extracted> {
        let raw = backend.extract_pages(data, &self.options)?;
        let extracted = self.build(raw, backend.name());
        log::debug!(
            "{}: {} pages, {} blocks, {} tables",
            backend.name(),
            extracted.pages.len(),
            extracted.blocks.len(),
            extracted.tables.len()
        );
        Ok(extracted)
    }

    fn build(&self, raw: Extraction, backend: &'static str) -> Extracted {
        let detector = TableDetector::with_config(self.options.table_config.clone());
        let mut extracted = Extracted {
            backend: Some(backend),
            page_count: raw.page_count,
            pdf_version: raw.pdf_version,
            info_title: raw.info_title,
            created: raw.created,
            ..Extracted::default()
        };

        for page in raw.pages {
            let text = if self.options.normalize {
                normalize_text(&page.text)
            } else {
                page.text
            };

            extracted.blocks.extend(text_blocks(page.number, &text));

            if self.options.detect_tables {
                for (index, table) in detector.detect(&text).into_iter().enumerate() {
                    extracted
                        .blocks
                        .push(ContentBlock::table(page.number, table.rows.clone()));
                    extracted
                        .tables
                        .push(TableRecord::new(page.number, index, table.rows));
                }
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                extracted.pages.push(PageText {
                    page_number: page.number,
                    text: trimmed.to_string(),
                });
            }
        }

        extracted
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

/// Split page text into paragraphs and classify each one.
pub fn text_blocks(page: u32, text: &str) -> Vec<ContentBlock> {
    text.split(PARAGRAPH_BREAK)
        .filter_map(|raw| {
            let content = raw.trim();
            if content.is_empty() {
                return None;
            }
            let (block_type, rule) = classify_with_rule(content);
            log::trace!("page {}: {} block by {} rule", page, block_type, rule);
            Some(ContentBlock::text(page, block_type, content, raw))
        })
        .collect()
}
