//! Table-of-contents extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::TocEntry;

/// Lowercased markers that open the TOC region.
const TOC_MARKERS: &[&str] = &["contents", "table of contents", "index"];

/// `1. Intro ..... 5`
static RE_DOTTED_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.?\d*\.?\s*)(.*?)\s*\.+\s*(\d+)$").unwrap());
/// `1.2 Background` without a page reference
static RE_NUMBERED_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.?\d*\.?)\s+(.*)$").unwrap());
/// A numbered heading ends the region.
static RE_REGION_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s+[A-Z]").unwrap());

fn is_toc_marker(line: &str) -> bool {
    let lower = line.to_lowercase();
    TOC_MARKERS.iter().any(|m| lower.contains(m))
}

/// Extract entries from the table-of-contents region of `text`.
///
/// The region starts after a line mentioning "contents" or "index". Inside
/// it, dotted-leader lines are entries. Otherwise a numbered heading ends
/// the scan; any other numbered line is an entry without a page, and the
/// rest is skipped. Only the first region is read.
pub fn extract_toc(text: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut in_toc = false;

    for line in text.lines().map(str::trim) {
        // Marker lines never terminate the region, they (re)open it.
        if is_toc_marker(line) {
            in_toc = true;
            continue;
        }
        if !in_toc || line.is_empty() {
            continue;
        }

        if let Some(caps) = RE_DOTTED_ENTRY.captures(line) {
            entries.push(TocEntry::new(
                caps[1].trim(),
                caps[2].trim(),
                caps[3].trim(),
            ));
            continue;
        }

        if RE_REGION_END.is_match(line) {
            log::debug!("TOC region ended at {:?}", line);
            break;
        }

        if let Some(caps) = RE_NUMBERED_ENTRY.captures(line) {
            entries.push(TocEntry::new(&caps[1], &caps[2], ""));
        }
    }

    entries
}
