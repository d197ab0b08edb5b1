//! PDF text extraction module.

mod backend;
mod extractor;
mod normalize;
mod options;
mod table_detector;

pub use backend::{Extraction, ExtractionBackend, LopdfBackend, PageContent, PdfExtractBackend};
pub use extractor::{text_blocks, Extracted, Extractor};
pub use normalize::normalize_text;
pub use options::{ErrorMode, PageSelection, ParseOptions};
pub use table_detector::{split_cells, DetectedTable, TableDetector, TableDetectorConfig};
