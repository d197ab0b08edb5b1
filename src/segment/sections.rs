//! Section splitting.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::is_all_uppercase;
use crate::model::Section;

/// Title-case lines at or above this many characters are body text.
const TITLE_CASE_MAX_CHARS: usize = 60;

static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s+[A-Z]").unwrap());
static RE_ALL_CAPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z\s]+$").unwrap());
static RE_MULTI_LEVEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+(?:\.\d+)*\.?\s+[A-Z]").unwrap());
static RE_TITLE_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Z][a-z]+(?:\s+(?:[A-Z0-9][\w'’&.()-]*|of|and|the|into|in|on|for|to|or|a|an|by|with|from|under))+$",
    )
    .unwrap()
});

static RE_LEVEL_ONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s+").unwrap());
static RE_LEVEL_TWO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.?\s+").unwrap());
static RE_LEVEL_THREE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+\.?\s+").unwrap());
/// Four or more numbering components share the deepest level.
static RE_LEVEL_DEEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+){3,}\.?\s+").unwrap());

/// Kind of heading line, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    /// `1. Scope`, `12 Definitions`
    Numbered,
    /// `GENERAL PROVISIONS`
    AllCaps,
    /// `1.1 Background`, `2.3.1. Rates`
    MultiLevel,
    /// `Entry into Force`
    TitleCase,
}

/// Match a trimmed line against the heading family.
pub fn heading_kind(line: &str) -> Option<HeadingKind> {
    if RE_NUMBERED.is_match(line) {
        Some(HeadingKind::Numbered)
    } else if RE_ALL_CAPS.is_match(line) {
        Some(HeadingKind::AllCaps)
    } else if RE_MULTI_LEVEL.is_match(line) {
        Some(HeadingKind::MultiLevel)
    } else if line.chars().count() < TITLE_CASE_MAX_CHARS && RE_TITLE_CASE.is_match(line) {
        Some(HeadingKind::TitleCase)
    } else {
        None
    }
}

/// Heading level from the numbering depth of a title.
///
/// Levels run from 1 to 3. The all-caps rule only applies to unnumbered
/// titles.
pub fn heading_level(title: &str) -> u8 {
    let numbered = title.starts_with(|c: char| c.is_ascii_digit());
    if RE_LEVEL_ONE.is_match(title) {
        1
    } else if RE_LEVEL_TWO.is_match(title) {
        2
    } else if RE_LEVEL_THREE.is_match(title) || RE_LEVEL_DEEP.is_match(title) {
        3
    } else if !numbered && is_all_uppercase(title) {
        1
    } else {
        2
    }
}

/// Split text into titled sections.
///
/// Lines before the first heading are discarded; there is no preamble
/// section. A heading followed directly by another heading produces no
/// section of its own.
pub fn extract_sections(text: &str) -> Vec<Section> {
    let mut builder = SectionBuilder::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if heading_kind(line).is_some() {
            builder.open(line);
        } else {
            builder.push(line);
        }
    }

    builder.finish()
}

#[derive(Default)]
struct SectionBuilder {
    title: Option<String>,
    lines: Vec<String>,
    sections: Vec<Section>,
}

impl SectionBuilder {
    fn open(&mut self, title: &str) {
        self.flush();
        self.title = Some(title.to_string());
        self.lines.clear();
    }

    fn push(&mut self, line: &str) {
        if self.title.is_some() {
            self.lines.push(line.to_string());
        }
    }

    fn flush(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        if let Some(title) = self.title.take() {
            let body = self.lines.join("\n").trim().to_string();
            let level = heading_level(&title);
            self.sections.push(Section::new(title, body, level));
        }
        self.lines.clear();
    }

    fn finish(mut self) -> Vec<Section> {
        self.flush();
        self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_sections() {
        let sections = extract_sections("1. Introduction\nHello\n1.1 Background\nWorld\n");
        assert_eq!(
            sections,
            vec![
                Section::new("1. Introduction", "Hello", 1),
                Section::new("1.1 Background", "World", 2),
            ]
        );
    }

    #[test]
    fn test_preamble_is_discarded() {
        let sections = extract_sections("draft copy\nnot for circulation\nGENERAL PROVISIONS\nbody");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "GENERAL PROVISIONS");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[0].body, "body");
    }

    #[test]
    fn test_empty_heading_is_dropped() {
        let sections = extract_sections("PART ONE\n1. Scope\napplies to all persons\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "1. Scope");
    }

    #[test]
    fn test_body_lines_are_trimmed_and_joined() {
        let text = "2. Definitions\n   first line   \n\n\tsecond line\n";
        let sections = extract_sections(text);
        assert_eq!(sections[0].body, "first line\nsecond line");
    }

    #[test]
    fn test_title_case_heading() {
        let sections = extract_sections("Entry into Force\nthe treaty enters into force\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].level, 2);
    }

    #[test]
    fn test_single_capitalized_word_is_body() {
        assert_eq!(heading_kind("Hello"), None);
        assert_eq!(heading_kind("World"), None);
    }

    #[test]
    fn test_heading_kind_priority() {
        assert_eq!(heading_kind("1. Scope"), Some(HeadingKind::Numbered));
        assert_eq!(heading_kind("CHAPTER ONE"), Some(HeadingKind::AllCaps));
        assert_eq!(heading_kind("2.3.1 Rates"), Some(HeadingKind::MultiLevel));
        assert_eq!(heading_kind("Article 5"), Some(HeadingKind::TitleCase));
        assert_eq!(heading_kind("the tax is due."), None);
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_level("1. Introduction"), 1);
        assert_eq!(heading_level("1 Introduction"), 1);
        assert_eq!(heading_level("1.1 Background"), 2);
        assert_eq!(heading_level("1.1. Background"), 2);
        assert_eq!(heading_level("1.1.1 Detail"), 3);
        assert_eq!(heading_level("GENERAL PROVISIONS"), 1);
        assert_eq!(heading_level("Entry into Force"), 2);
    }

    #[test]
    fn test_deep_numbering_stays_below_parent() {
        let sections = extract_sections("1.2 Parent Topic\nbody a\n1.2.3.4 SCOPE\nbody b\n");
        let levels: Vec<_> = sections.iter().map(|s| (s.title.as_str(), s.level)).collect();
        assert_eq!(levels, vec![("1.2 Parent Topic", 2), ("1.2.3.4 SCOPE", 3)]);

        assert_eq!(heading_level("1.2.3.4.5 Detail"), 3);
        assert_eq!(heading_level("1.2.3.4. RATES"), 3);
    }

    #[test]
    fn test_no_headings() {
        assert!(extract_sections("just some text\nmore text").is_empty());
        assert!(extract_sections("").is_empty());
    }
}
