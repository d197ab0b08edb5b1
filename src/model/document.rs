//! Document-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TableRecord;

/// A structured legal/tax document assembled from one PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Detected document title (empty when none qualifies)
    pub title: String,

    /// Titled sections in document order
    pub sections: Vec<Section>,

    /// Tables in page order
    pub tables: Vec<TableRecord>,

    /// Footnote definitions in document order
    pub footnotes: Vec<FootnoteEntry>,

    /// Table-of-contents entries
    pub toc: Vec<TocEntry>,

    /// Full text with page markers
    pub full_text: String,

    /// Per-page text
    pub pages: Vec<PageText>,

    /// Extraction metadata
    pub metadata: Metadata,
}

impl Document {
    /// Number of pages that carried text.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.tables.is_empty()
    }
}

/// Metadata describing where a document came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Source file name
    pub source: Option<String>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: Option<String>,

    /// Total number of pages in the PDF
    pub page_count: u32,

    /// Backend that produced the text ("lopdf", "pdf-extract"), if any
    pub backend: Option<String>,

    /// Title from the PDF info dictionary
    pub info_title: Option<String>,

    /// Creation date from the PDF info dictionary
    pub created: Option<DateTime<Utc>>,
}

/// A titled run of text between two headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading line that opened the section
    pub title: String,

    /// Body lines, trimmed and newline-joined
    #[serde(rename = "content")]
    pub body: String,

    /// Heading level (1-3)
    pub level: u8,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            level,
        }
    }
}

/// One table-of-contents line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Entry number as written (e.g., "1.", "2.3")
    pub number: String,

    /// Entry title
    pub title: String,

    /// Page reference; empty when the line carried none
    pub page: String,
}

impl TocEntry {
    pub fn new(number: impl Into<String>, title: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            title: title.into(),
            page: page.into(),
        }
    }
}

/// A numbered annotation line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootnoteEntry {
    /// Marker as written (e.g., "1.", "[2]", "(3)")
    pub number: String,

    /// Footnote text
    pub text: String,
}

impl FootnoteEntry {
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
        }
    }
}

/// Trimmed text of a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Page text
    pub text: String,
}
