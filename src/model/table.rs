//! Table types.

use serde::{Deserialize, Serialize};

/// A table as a grid of cell strings, first row being the header.
pub type TableGrid = Vec<Vec<String>>;

/// A table found on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Page number (1-indexed)
    pub page: u32,

    /// Index of the table within its page (0-indexed)
    pub table_index: usize,

    /// Cell grid
    pub data: TableGrid,
}

impl TableRecord {
    /// Create a new table record.
    pub fn new(page: u32, table_index: usize, data: TableGrid) -> Self {
        Self {
            page,
            table_index,
            data,
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.data.len()
    }
}
