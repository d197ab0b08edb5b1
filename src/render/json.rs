//! JSON rendering for documents and block lists.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{ContentBlock, Document};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Convert a block list to JSON (the debug dump format).
pub fn blocks_to_json(blocks: &[ContentBlock], format: JsonFormat) -> Result<String> {
    serialize(blocks, format)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockType, Section};

    #[test]
    fn test_to_json_pretty() {
        let doc = Document {
            title: "Test".to_string(),
            sections: vec![Section::new("1. Scope", "Applies.", 1)],
            ..Document::default()
        };

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Test\""));
        assert!(json.contains("\"content\": \"Applies.\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&Document::default(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        for key in ["title", "sections", "tables", "footnotes", "toc", "full_text", "pages"] {
            assert!(json.contains(&format!("\"{}\":", key)), "{key}");
        }
    }

    #[test]
    fn test_blocks_to_json() {
        let blocks = vec![ContentBlock::text(1, BlockType::ListItem, "- a", "- a ")];
        let json = blocks_to_json(&blocks, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"[{"page":1,"type":"li","content":"- a","raw_content":"- a "}]"#
        );
    }
}
