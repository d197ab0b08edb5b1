//! Text extraction backends.
//!
//! Provides a trait-based interface over the concrete PDF libraries, so the
//! extractor can run a primary backend and fall back to a second one
//! without knowing either library's types.

use chrono::{DateTime, Utc};
use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::error::{Error, Result};

use super::options::{ErrorMode, ParseOptions};

/// Raw text of one page, as returned by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub number: u32,
    /// Unnormalized page text
    pub text: String,
}

impl PageContent {
    /// Create page content.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Everything a backend returns for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Selected pages in page order
    pub pages: Vec<PageContent>,
    /// Total number of pages in the PDF
    pub page_count: u32,
    /// PDF version from the file header, if the backend reads it
    pub pdf_version: Option<String>,
    /// `/Title` from the document information dictionary
    pub info_title: Option<String>,
    /// `/CreationDate` from the document information dictionary
    pub created: Option<DateTime<Utc>>,
}

/// Abstract interface for a text extraction library.
pub trait ExtractionBackend: Send + Sync {
    /// Short backend name used in logs and metadata.
    fn name(&self) -> &'static str;

    /// Extract per-page text from PDF bytes.
    fn extract_pages(&self, data: &[u8], options: &ParseOptions) -> Result<Extraction>;
}

// ---------------------------------------------------------------------------
// LopdfBackend: primary backend backed by lopdf
// ---------------------------------------------------------------------------

/// Primary [`ExtractionBackend`] backed by `lopdf::Document`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    const NAME: &'static str = "lopdf";
}

impl ExtractionBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn extract_pages(&self, data: &[u8], options: &ParseOptions) -> Result<Extraction> {
        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            log::warn!("{}: document is encrypted, text may be unreadable", Self::NAME);
        }

        let page_ids = doc.get_pages();
        let mut pages = Vec::with_capacity(page_ids.len());

        for &number in page_ids.keys() {
            if !options.pages.includes(number) {
                continue;
            }
            match doc.extract_text(&[number]) {
                Ok(text) => pages.push(PageContent::new(number, text)),
                Err(e) => {
                    if options.error_mode == ErrorMode::Strict {
                        return Err(Error::extraction(
                            Self::NAME,
                            format!("page {}: {}", number, e),
                        ));
                    }
                    log::warn!("Failed to extract text from page {}: {}", number, e);
                }
            }
        }

        let info = info_dictionary(&doc);
        Ok(Extraction {
            pages,
            page_count: page_ids.len() as u32,
            pdf_version: Some(doc.version.to_string()),
            info_title: info.and_then(|d| get_string_from_dict(d, b"Title")),
            created: info
                .and_then(|d| get_string_from_dict(d, b"CreationDate"))
                .and_then(|s| parse_pdf_date(&s)),
        })
    }
}

fn info_dictionary(doc: &LopdfDocument) -> Option<&Dictionary> {
    let info_ref = doc.trailer.get(b"Info").ok()?.as_reference().ok()?;
    doc.get_dictionary(info_ref).ok()
}

// ---------------------------------------------------------------------------
// PdfExtractBackend: fallback backend backed by pdf-extract
// ---------------------------------------------------------------------------

/// Fallback [`ExtractionBackend`] backed by the `pdf-extract` crate.
///
/// Reads no document metadata; page selection is applied to its output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    const NAME: &'static str = "pdf-extract";
}

impl ExtractionBackend for PdfExtractBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn extract_pages(&self, data: &[u8], options: &ParseOptions) -> Result<Extraction> {
        // pdf-extract panics on some malformed fonts instead of returning an error
        let texts = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(data))
            .map_err(|_| Error::extraction(Self::NAME, "extractor panicked"))??;

        let page_count = texts.len() as u32;
        let pages = (1..)
            .zip(texts)
            .filter(|(number, _)| options.pages.includes(*number))
            .map(|(number, text)| PageContent::new(number, text))
            .collect();

        Ok(Extraction {
            pages,
            page_count,
            ..Extraction::default()
        })
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, else UTF-8, else Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF][..]) {
        let utf16: Vec<u16> = body
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    // At minimum we need YYYY
    let year: i32 = s.get(0..4)?.parse().ok()?;
    let field = |range: std::ops::Range<usize>, default: u32| {
        s.get(range).and_then(|v| v.parse().ok()).unwrap_or(default)
    };
    let month = field(4..6, 1);
    let day = field(6..8, 1);
    let hour = field(8..10, 0);
    let minute = field(10..12, 0);
    let second = field(12..14, 0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}
