//! Footnote definition lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::FootnoteEntry;

/// Footnote text must be longer than this many characters. Shorter lines
/// are mostly numbered list items and page furniture.
const MIN_FOOTNOTE_CHARS: usize = 10;

static RE_FOOTNOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\[?\d+\]?\.?|\(\d+\))\s+(.+)").unwrap());

/// Collect every line that looks like a footnote definition.
pub fn extract_footnotes(text: &str) -> Vec<FootnoteEntry> {
    text.lines()
        .map(str::trim)
        .filter_map(parse_footnote)
        .collect()
}

/// Parse a single trimmed line as a footnote definition.
pub fn parse_footnote(line: &str) -> Option<FootnoteEntry> {
    let caps = RE_FOOTNOTE.captures(line)?;
    let text = &caps[2];
    if text.chars().count() > MIN_FOOTNOTE_CHARS {
        Some(FootnoteEntry::new(&caps[1], text))
    } else {
        None
    }
}
