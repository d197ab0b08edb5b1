//! Text block classification.
//!
//! A paragraph is typed by the first matching rule in [`RULES`]. The order
//! of that table is the priority order; a paragraph that matches no rule is
//! a plain paragraph.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::BlockType;

/// Paragraphs at or above this many characters are never headings.
const HEADING_MAX_CHARS: usize = 100;

/// Headings shorter than this become `h2`, longer ones `h3`.
const SHORT_HEADING_MAX_CHARS: usize = 50;

static RE_NUMBERED_LEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s*[A-Z]").unwrap());
static RE_CAPS_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z\s]+$").unwrap());
static RE_BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-•*]\s+").unwrap());
static RE_NUMBER_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\s+").unwrap());

/// One entry of the classification chain.
pub struct Rule {
    /// Short rule name, logged when a paragraph is classified
    pub name: &'static str,
    matches: fn(&str) -> bool,
    block_type: fn(&str) -> BlockType,
}

/// Classification rules in priority order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "heading",
        matches: is_heading,
        block_type: heading_type,
    },
    Rule {
        name: "list-item",
        matches: is_list_item,
        block_type: list_item_type,
    },
    Rule {
        name: "quote",
        matches: is_quote,
        block_type: quote_type,
    },
];

/// Classify a paragraph of extracted text.
///
/// The input is trimmed first; the result depends only on the text.
pub fn classify(text: &str) -> BlockType {
    classify_with_rule(text).0
}

/// Classify a paragraph and name the rule that decided it (`"paragraph"`
/// when no rule matched).
pub fn classify_with_rule(text: &str) -> (BlockType, &'static str) {
    let text = text.trim();
    match RULES.iter().find(|rule| (rule.matches)(text)) {
        Some(rule) => ((rule.block_type)(text), rule.name),
        None => (BlockType::Paragraph, "paragraph"),
    }
}

/// Remove a leading bullet or `N.` marker from a list item.
pub fn strip_list_marker(text: &str) -> &str {
    let text = match RE_BULLET_MARKER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    match RE_NUMBER_MARKER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// True when the text has at least one cased letter and no lowercase ones.
pub fn is_all_uppercase(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

fn is_heading(text: &str) -> bool {
    text.chars().count() < HEADING_MAX_CHARS
        && (is_all_uppercase(text)
            || RE_NUMBERED_LEAD.is_match(text)
            || RE_CAPS_LINE.is_match(text)
            || text.ends_with(':'))
}

fn heading_type(text: &str) -> BlockType {
    if text.chars().count() < SHORT_HEADING_MAX_CHARS {
        BlockType::H2
    } else {
        BlockType::H3
    }
}

fn is_list_item(text: &str) -> bool {
    RE_BULLET_MARKER.is_match(text) || RE_NUMBER_MARKER.is_match(text)
}

fn list_item_type(_: &str) -> BlockType {
    BlockType::ListItem
}

fn is_quote(text: &str) -> bool {
    text.starts_with('"') && text.ends_with('"')
}

fn quote_type(_: &str) -> BlockType {
    BlockType::Quote
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_caps_heading() {
        assert_eq!(
            classify_with_rule("EXECUTIVE SUMMARY"),
            (BlockType::H2, "heading")
        );
    }

    #[test]
    fn test_long_heading_is_h3() {
        let text = "ARTICLE 12 - PROVISIONS ON THE ELIMINATION OF DOUBLE TAXATION";
        assert!(text.len() >= 50 && text.len() < 100);
        assert_eq!(classify(text), BlockType::H3);
    }

    #[test]
    fn test_numbered_heading() {
        assert_eq!(classify("1. Introduction"), BlockType::H2);
        assert_eq!(classify("12Scope of Application"), BlockType::H2);
    }

    #[test]
    fn test_colon_heading() {
        assert_eq!(classify("The following persons are exempt:"), BlockType::H2);
    }

    #[test]
    fn test_long_text_is_never_heading() {
        let text = "A".repeat(120);
        assert_eq!(classify(&text), BlockType::Paragraph);
    }

    #[test]
    fn test_list_items() {
        assert_eq!(classify("- a resident of the State"), BlockType::ListItem);
        assert_eq!(classify("• the place of management"), BlockType::ListItem);
        assert_eq!(classify("* a branch office"), BlockType::ListItem);
        assert_eq!(classify("3. a factory or workshop"), BlockType::ListItem);
    }

    #[test]
    fn test_quote() {
        assert_eq!(
            classify("\"This Agreement shall remain in force for ten years.\""),
            BlockType::Quote
        );
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(
            classify("The treaty is initialled by the negotiators to signify agreement."),
            BlockType::Paragraph
        );
        assert_eq!(
            classify_with_rule("plain words here"),
            (BlockType::Paragraph, "paragraph")
        );
        assert_eq!(classify_with_rule("- item").1, "list-item");
        assert_eq!(classify_with_rule("\"quoted\"").1, "quote");
    }

    #[test]
    fn test_heading_beats_list() {
        // Rule order: a short numbered line with a capital is a heading first.
        assert_eq!(classify("2. Definitions"), BlockType::H2);
    }

    #[test]
    fn test_classify_trims_input() {
        assert_eq!(classify("   PREAMBLE \n"), BlockType::H2);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let samples = [
            "PART ONE",
            "- item",
            "\"quoted\"",
            "ordinary sentence with words.",
            "4.2 Permanent establishment",
            "",
        ];
        for sample in samples {
            assert_eq!(classify(sample), classify(sample), "{sample:?}");
        }
    }

    #[test]
    fn test_is_all_uppercase() {
        assert!(is_all_uppercase("VAT 2018"));
        assert!(!is_all_uppercase("Vat"));
        assert!(!is_all_uppercase("2018"));
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("- item one"), "item one");
        assert_eq!(strip_list_marker("• item two"), "item two");
        assert_eq!(strip_list_marker("12. item three"), "item three");
        assert_eq!(strip_list_marker("no marker"), "no marker");
    }
}
