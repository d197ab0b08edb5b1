//! Segmentation of full document text into sections, TOC, and footnotes.
//!
//! The three scans are independent passes over the same text; none of them
//! depends on the output of another.

mod footnotes;
mod sections;
mod toc;

pub use footnotes::{extract_footnotes, parse_footnote};
pub use sections::{extract_sections, heading_kind, heading_level, HeadingKind};
pub use toc::extract_toc;

use crate::model::{FootnoteEntry, PageText, Section, TocEntry};

/// Number of leading lines of the first page searched for a title.
const TITLE_SEARCH_LINES: usize = 10;

/// Title candidates must be longer than this many characters.
const TITLE_MIN_CHARS: usize = 10;

/// Result of segmenting a document's full text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments {
    pub sections: Vec<Section>,
    pub toc: Vec<TocEntry>,
    pub footnotes: Vec<FootnoteEntry>,
}

/// Run all three scans over `full_text`.
pub fn segment(full_text: &str) -> Segments {
    let segments = Segments {
        sections: extract_sections(full_text),
        toc: extract_toc(full_text),
        footnotes: extract_footnotes(full_text),
    };
    log::debug!(
        "segmented text: {} sections, {} TOC entries, {} footnotes",
        segments.sections.len(),
        segments.toc.len(),
        segments.footnotes.len()
    );
    segments
}

/// Pick a title from the first lines of the first page with text.
///
/// Returns an empty string when no line is long enough.
pub fn detect_title(pages: &[PageText]) -> String {
    pages
        .first()
        .and_then(|page| {
            page.text
                .lines()
                .take(TITLE_SEARCH_LINES)
                .map(str::trim)
                .find(|line| line.chars().count() > TITLE_MIN_CHARS)
        })
        .unwrap_or_default()
        .to_string()
}

/// Concatenate page texts with `--- PAGE n ---` markers.
pub fn build_full_text<'a, I>(pages: I) -> String
where
    I: IntoIterator<Item = (u32, &'a str)>,
{
    let mut full_text = String::new();
    for (number, text) in pages {
        if text.trim().is_empty() {
            continue;
        }
        full_text.push_str(&format!("\n--- PAGE {} ---\n{}\n", number, text));
    }
    full_text
}
