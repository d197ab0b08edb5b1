//! Document model types.
//!
//! Blocks are the per-page classified view used for HTML rendering; the
//! [`Document`] aggregate is the segmented view of the whole text. Both are
//! built once per input file and not mutated afterwards.

mod block;
mod document;
mod table;

pub use block::{BlockContent, BlockType, ContentBlock};
pub use document::{Document, FootnoteEntry, Metadata, PageText, Section, TocEntry};
pub use table::{TableGrid, TableRecord};
