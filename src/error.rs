//! Error types for lawpdf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lawpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting and rendering documents.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist.
    #[error("PDF file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// A text extraction backend failed.
    #[error("Text extraction error ({backend}): {message}")]
    Extraction {
        /// Name of the backend that failed
        backend: &'static str,
        /// Failure description
        message: String,
    },

    /// Error during rendering (HTML, JSON, report).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an extraction error for the named backend.
    pub fn extraction(backend: &'static str, message: impl Into<String>) -> Self {
        Error::Extraction {
            backend,
            message: message.into(),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::extraction("pdf-extract", err.to_string())
    }
}
