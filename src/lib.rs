//! # lawpdf
//!
//! Structured content extraction for legal and tax PDF documents.
//!
//! Page text is split into paragraphs and classified as headings, list
//! items, quotes or plain paragraphs. The full text is segmented into
//! titled sections, a table of contents and footnotes. Results render to a
//! fixed HTML article template, JSON, or a plain-text report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lawpdf::{parse_file, render};
//!
//! fn main() -> lawpdf::Result<()> {
//!     let parsed = parse_file("vat-guide.pdf")?;
//!
//!     println!("{} sections", parsed.document.sections.len());
//!     let html = render::render_html(&parsed.blocks, "VAT Guide");
//!     std::fs::write("vat-guide.html", html)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The classification and segmentation heuristics are tuned to one
//! document family; they are not a general PDF layout analyzer.

pub mod classify;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod segment;

// Re-export commonly used types
pub use classify::classify;
pub use convert::{
    convert_dir, convert_file, default_title, BatchReport, ConvertOptions, ConvertOutcome,
    OutputFormat,
};
pub use detect::{is_pdf_bytes, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use model::{
    BlockContent, BlockType, ContentBlock, Document, FootnoteEntry, Metadata, PageText, Section,
    TableGrid, TableRecord, TocEntry,
};
pub use parser::{ErrorMode, Extracted, Extractor, PageSelection, ParseOptions};
pub use render::JsonFormat;
pub use segment::{segment, Segments};

use std::path::Path;

/// Blocks and segmented document extracted from one PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPdf {
    /// Classified blocks, the input of the HTML renderer
    pub blocks: Vec<ContentBlock>,
    /// Segmented document
    pub document: Document,
}

impl ParsedPdf {
    /// Render the blocks into the HTML article template.
    pub fn to_html(&self, title: &str) -> String {
        render::render_html(&self.blocks, title)
    }

    /// Convert the document to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Summarize the document as a plain-text report.
    pub fn to_report(&self) -> String {
        render::to_report(&self.document)
    }
}

/// Build the segmented [`Document`] from an extraction.
///
/// `source` is recorded in the metadata (usually the file name).
pub fn assemble(extracted: &Extracted, source: Option<&str>) -> Document {
    let full_text = segment::build_full_text(
        extracted
            .pages
            .iter()
            .map(|p| (p.page_number, p.text.as_str())),
    );
    let segments = segment::segment(&full_text);

    Document {
        title: segment::detect_title(&extracted.pages),
        sections: segments.sections,
        tables: extracted.tables.clone(),
        footnotes: segments.footnotes,
        toc: segments.toc,
        full_text,
        pages: extracted.pages.clone(),
        metadata: Metadata {
            source: source.map(str::to_string),
            pdf_version: extracted.pdf_version.clone(),
            page_count: extracted.page_count,
            backend: extracted.backend.map(str::to_string),
            info_title: extracted.info_title.clone(),
            created: extracted.created,
        },
    }
}

/// Parse a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use lawpdf::parse_file;
///
/// let parsed = parse_file("decree-law-8-2017.pdf").unwrap();
/// println!("Title: {}", parsed.document.title);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedPdf> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use lawpdf::{parse_file_with_options, PageSelection, ParseOptions};
///
/// let options = ParseOptions::new()
///     .with_pages(PageSelection::parse("1-10")?)
///     .with_tables(false);
/// let parsed = parse_file_with_options("guide.pdf", options)?;
/// # Ok::<(), lawpdf::Error>(())
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<ParsedPdf> {
    let path = path.as_ref();
    let extracted = Extractor::new(options).extract_path(path)?;
    let source = path.file_name().map(|n| n.to_string_lossy().to_string());
    Ok(finish(extracted, source.as_deref()))
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<ParsedPdf> {
    parse_bytes_with_options(data, ParseOptions::default())
}

/// Parse a PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<ParsedPdf> {
    let extracted = Extractor::new(options).extract_bytes(data)?;
    Ok(finish(extracted, None))
}

fn finish(extracted: Extracted, source: Option<&str>) -> ParsedPdf {
    let document = assemble(&extracted, source);
    ParsedPdf {
        blocks: extracted.blocks,
        document,
    }
}

/// Convert a PDF to HTML, titled from its file name.
///
/// # Example
///
/// ```no_run
/// let html = lawpdf::to_html("corporate_tax-guide.pdf").unwrap();
/// assert!(html.contains("<title>Corporate Tax Guide</title>"));
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let parsed = parse_file(path)?;
    let title = path
        .file_stem()
        .map(|s| default_title(&s.to_string_lossy()))
        .unwrap_or_else(|| render::DEFAULT_TITLE.to_string());
    Ok(parsed.to_html(&title))
}

/// Convert a PDF to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    parse_file(path)?.to_json(format)
}
