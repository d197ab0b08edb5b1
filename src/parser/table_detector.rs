//! Table detection on plain extracted text.
//!
//! Text backends return lines with column gaps rendered as runs of spaces.
//! A table is a run of consecutive lines that split into the same number of
//! cells on those gaps.

use crate::model::TableGrid;

/// A detected table region with its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTable {
    /// Index of the first line of the table in the page text
    pub start_line: usize,
    /// Index one past the last line of the table
    pub end_line: usize,
    /// Cell text, row by row
    pub rows: TableGrid,
}

/// Table detector configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Minimum run of spaces separating two cells
    pub min_cell_gap: usize,
    /// Maximum drift, in characters, between the starts of cells in the
    /// same column
    pub column_tolerance: usize,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            min_cell_gap: 2,
            column_tolerance: 2,
        }
    }
}

/// A cell and the character column where it starts in its line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    column: usize,
    text: String,
}

/// Detects tables in page text.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables in the given page text, in line order.
    ///
    /// Rows of one table have the same number of cells, and each cell
    /// starts at the same column as the cell above it, within
    /// `column_tolerance`. Prose that happens to contain a double space
    /// fails the alignment check.
    pub fn detect(&self, text: &str) -> Vec<DetectedTable> {
        let mut tables = Vec::new();
        let mut run: Vec<Vec<Cell>> = Vec::new();
        let mut run_start = 0;

        for (index, line) in text.lines().enumerate() {
            let cells = positioned_cells(line, self.config.min_cell_gap);
            let fits = (self.config.min_columns..=self.config.max_columns).contains(&cells.len());
            let continues = fits && run.first().map_or(true, |first| self.aligned(first, &cells));

            if !continues {
                self.close_run(&mut run, run_start, index, &mut tables);
                run_start = index;
            }
            if fits {
                if run.is_empty() {
                    run_start = index;
                }
                run.push(cells);
            }
        }
        let line_count = text.lines().count();
        self.close_run(&mut run, run_start, line_count, &mut tables);

        log::debug!("TableDetector: found {} tables", tables.len());
        tables
    }

    /// Same cell count, and every cell starts under the matching cell of
    /// `first`.
    fn aligned(&self, first: &[Cell], cells: &[Cell]) -> bool {
        first.len() == cells.len()
            && first
                .iter()
                .zip(cells)
                .all(|(a, b)| a.column.abs_diff(b.column) <= self.config.column_tolerance)
    }

    fn close_run(
        &self,
        run: &mut Vec<Vec<Cell>>,
        start: usize,
        end: usize,
        tables: &mut Vec<DetectedTable>,
    ) {
        let rows: TableGrid = std::mem::take(run)
            .into_iter()
            .map(|row| row.into_iter().map(|cell| cell.text).collect())
            .collect();
        if rows.len() < self.config.min_rows {
            return;
        }
        if is_list_pattern(&rows) {
            log::debug!(
                "TableDetector: skipping lines {}..{}: detected as list pattern",
                start,
                end
            );
            return;
        }
        tables.push(DetectedTable {
            start_line: start,
            end_line: end,
            rows,
        });
    }
}

/// Split a line into cells on tabs and runs of at least `min_gap` spaces.
pub fn split_cells(line: &str, min_gap: usize) -> Vec<String> {
    positioned_cells(line, min_gap)
        .into_iter()
        .map(|cell| cell.text)
        .collect()
}

fn positioned_cells(line: &str, min_gap: usize) -> Vec<Cell> {
    let min_gap = min_gap.max(1);
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut spaces = 0;

    for (column, c) in line.chars().enumerate() {
        match c {
            ' ' => spaces += 1,
            '\t' => spaces = spaces.max(min_gap),
            _ => {
                if current.is_empty() {
                    start = column;
                } else if spaces >= min_gap {
                    cells.push(Cell {
                        column: start,
                        text: std::mem::take(&mut current),
                    });
                    start = column;
                } else {
                    current.extend(std::iter::repeat(' ').take(spaces));
                }
                spaces = 0;
                current.push(c);
            }
        }
    }
    if !current.is_empty() {
        cells.push(Cell {
            column: start,
            text: current,
        });
    }
    cells
}

/// Check if the rows actually represent a numbered or bulleted list.
///
/// A list like "1.   Item" splits into a marker column and a text column,
/// which looks like a two-column table.
fn is_list_pattern(rows: &[Vec<String>]) -> bool {
    if rows.is_empty() {
        return false;
    }

    let mut bullet_count = 0;
    let mut number_count = 0;
    for first in rows.iter().filter_map(|row| row.first()) {
        if is_bullet_marker(first) {
            bullet_count += 1;
        } else if is_number_marker(first) {
            number_count += 1;
        }
    }

    let columns = rows[0].len();
    let bullet_ratio = bullet_count as f32 / rows.len() as f32;
    let total_ratio = (bullet_count + number_count) as f32 / rows.len() as f32;

    // Bullet markers are almost never real table data
    if bullet_ratio >= 0.5 {
        return true;
    }

    // Numbered first columns are common in real tables, so only reject the
    // two-column case
    columns == 2 && total_ratio >= 0.5
}

/// Check if text is a bullet marker (•, -, etc.).
fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "►" | "■" | "●" | "□" | "◆" | "➤"
    )
}

/// Check if text is a number-style list marker (1., 2), a., etc.).
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    if let Some(pos) = cleaned.find(|c: char| !c.is_ascii_digit()) {
        let (prefix, suffix) = cleaned.split_at(pos);
        if !prefix.is_empty() && (suffix == "." || suffix == ")") {
            return true;
        }
    }

    if cleaned.parse::<u32>().is_ok() {
        return true;
    }

    // Letter marker: "a.", "B)"
    let mut chars = cleaned.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.' | ')'), None) if letter.is_alphabetic()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_cells() {
        assert_eq!(
            split_cells("  Supply   Rate  Notes ", 2),
            vec!["Supply", "Rate", "Notes"]
        );
        assert_eq!(split_cells("single spaced words", 2), vec!["single spaced words"]);
        assert_eq!(split_cells("a\tb", 2), vec!["a", "b"]);
        assert!(split_cells("   ", 2).is_empty());
    }

    #[test]
    fn test_detect_simple_table() {
        let text = "Rates apply as follows.\nSupply      Rate\nExports     0%\nHealthcare  5%\n\nEnd of table.";
        let tables = TableDetector::new().detect(text);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.start_line, 1);
        assert_eq!(table.end_line, 4);
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(
            table.rows,
            vec![
                vec!["Supply".to_string(), "Rate".to_string()],
                vec!["Exports".to_string(), "0%".to_string()],
                vec!["Healthcare".to_string(), "5%".to_string()],
            ]
        );
    }

    #[test]
    fn test_column_count_change_splits_tables() {
        let text = "A  B\nC  D\nE  F  G\nH  I  J";
        let tables = TableDetector::new().detect(text);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows[0].len(), 2);
        assert_eq!(tables[1].rows[1].len(), 3);
        assert_eq!(tables[1].start_line, 2);
    }

    #[test]
    fn test_prose_with_double_spaces_is_not_table() {
        let text = "The supply is taxable at the standard rate.  It is due on\n\
                    the date of the invoice.  Payment must follow within\n\
                    thirty days.  Late payment attracts a penalty.";
        assert!(TableDetector::new().detect(text).is_empty());
    }

    #[test]
    fn test_misaligned_columns_split_run() {
        let text = "Supply      Rate\nExports     0%\nHealthcare  5%\nHousing         exempt";
        let tables = TableDetector::new().detect(text);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].end_line, 3);
    }

    #[test]
    fn test_cell_offsets() {
        let cells = positioned_cells("  Supply   Rate", 2);
        assert_eq!(
            cells,
            vec![
                Cell {
                    column: 2,
                    text: "Supply".to_string()
                },
                Cell {
                    column: 11,
                    text: "Rate".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_single_row_is_not_table() {
        assert!(TableDetector::new().detect("Name   Value\nplain text").is_empty());
    }

    #[test]
    fn test_too_many_columns() {
        let text = "a  b  c  d  e  f  g\nh  i  j  k  l  m  n";
        assert!(TableDetector::new().detect(text).is_empty());
    }

    #[test]
    fn test_numbered_list_not_detected_as_table() {
        let text = "1.   Supplies of goods\n2.   Supplies of services\n3.   Imports";
        assert!(TableDetector::new().detect(text).is_empty());
    }

    #[test]
    fn test_bullet_list_not_detected_as_table() {
        let text = "-   Management\n-   Interface\n-   Firmware";
        assert!(TableDetector::new().detect(text).is_empty());
    }

    #[test]
    fn test_numbered_first_column_kept_in_wide_table() {
        let text = "1   Exports   0%\n2   Housing   5%";
        assert_eq!(TableDetector::new().detect(text).len(), 1);
    }

    #[test]
    fn test_custom_config() {
        let detector = TableDetector::with_config(TableDetectorConfig {
            min_rows: 3,
            ..TableDetectorConfig::default()
        });
        assert!(detector.detect("A  B\nC  D").is_empty());
    }

    #[test]
    fn test_list_markers() {
        assert!(is_number_marker("1."));
        assert!(is_number_marker("12)"));
        assert!(is_number_marker("3"));
        assert!(is_number_marker("a."));
        assert!(is_bullet_marker("•"));
        assert!(!is_number_marker("Name"));
        assert!(!is_number_marker(""));
    }
}
