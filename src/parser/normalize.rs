//! Normalization of extracted page text.
//!
//! Backends disagree on line endings, ligatures and tabs. Normalizing here
//! keeps the classifier and segmenter regexes simple. Blank lines are kept
//! as-is since they separate paragraphs.

use unicode_normalization::UnicodeNormalization;

/// Spaces substituted for one tab.
const TAB_WIDTH: usize = 4;

const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),  // ﬀ
    ('\u{FB01}', "fi"),  // ﬁ
    ('\u{FB02}', "fl"),  // ﬂ
    ('\u{FB03}', "ffi"), // ﬃ
    ('\u{FB04}', "ffl"), // ﬄ
    ('\u{FB05}', "st"),  // ﬅ (long s + t)
    ('\u{FB06}', "st"),  // ﬆ
];

/// Normalize raw page text.
///
/// Applies NFC, expands ligatures, drops U+FFFD, converts `\r\n` and `\r`
/// to `\n`, expands tabs and trims trailing whitespace on every line.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut expanded = String::with_capacity(text.len());
    for c in text.nfc() {
        match c {
            '\u{FFFD}' => {}
            '\t' => expanded.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            c => match LIGATURES.iter().find(|(lig, _)| *lig == c) {
                Some((_, replacement)) => expanded.push_str(replacement),
                None => expanded.push(c),
            },
        }
    }

    expanded
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
