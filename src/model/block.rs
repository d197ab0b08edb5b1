//! Classified content blocks.

use serde::{Deserialize, Serialize};

use super::TableGrid;

/// Semantic type assigned to an extracted block.
///
/// Serialized with the HTML tag the block renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "h1")]
    H1,
    #[serde(rename = "h2")]
    H2,
    #[serde(rename = "h3")]
    H3,
    #[serde(rename = "h4")]
    H4,
    #[serde(rename = "h5")]
    H5,
    #[serde(rename = "h6")]
    H6,
    #[serde(rename = "li")]
    ListItem,
    #[serde(rename = "blockquote")]
    Quote,
    #[serde(rename = "p")]
    Paragraph,
    #[serde(rename = "table")]
    Table,
}

impl BlockType {
    /// HTML tag name for this type.
    pub fn tag(self) -> &'static str {
        match self {
            BlockType::H1 => "h1",
            BlockType::H2 => "h2",
            BlockType::H3 => "h3",
            BlockType::H4 => "h4",
            BlockType::H5 => "h5",
            BlockType::H6 => "h6",
            BlockType::ListItem => "li",
            BlockType::Quote => "blockquote",
            BlockType::Paragraph => "p",
            BlockType::Table => "table",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Payload of a block: text for prose, a cell grid for tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockContent {
    Text(String),
    Table(TableGrid),
}

impl BlockContent {
    /// Text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            BlockContent::Text(s) => Some(s),
            BlockContent::Table(_) => None,
        }
    }
}

/// One classified unit of extracted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Page number (1-indexed)
    pub page: u32,

    /// Semantic type
    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Trimmed content
    pub content: BlockContent,

    /// Paragraph text after normalization, before trimming
    pub raw_content: BlockContent,
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(
        page: u32,
        block_type: BlockType,
        content: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            page,
            block_type,
            content: BlockContent::Text(content.into()),
            raw_content: BlockContent::Text(raw.into()),
        }
    }

    /// Create a table block.
    pub fn table(page: u32, grid: TableGrid) -> Self {
        Self {
            page,
            block_type: BlockType::Table,
            content: BlockContent::Table(grid.clone()),
            raw_content: BlockContent::Table(grid),
        }
    }

    /// Text content, or an empty string for tables.
    pub fn text_content(&self) -> &str {
        self.content.as_text().unwrap_or_default()
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.block_type == BlockType::ListItem
    }
}
