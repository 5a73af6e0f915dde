//! Error types for specmark.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for specmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The source document is missing, unreadable, or not a valid PDF.
    #[error("Cannot open '{}': {reason}", .path.display())]
    Open {
        /// Path that was being opened
        path: PathBuf,
        /// Human-readable cause
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An output file could not be written.
    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// No input documents were found to process.
    #[error("No PDF files found in '{}'", .0.display())]
    NoInput(PathBuf),

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// The formatting vocabulary is invalid.
    #[error("Invalid vocabulary: {0}")]
    Vocabulary(String),
}

/// Coarse error category, used to decide whether batch processing continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source document could not be opened
    Open,
    /// Output could not be written
    Io,
    /// Nothing to process
    NoInput,
    /// Page content could not be read
    Extract,
    /// Configuration problem
    Config,
}

impl Error {
    /// Build an open error for `path`.
    pub fn open(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Open {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Return the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Open { .. } => ErrorKind::Open,
            Error::Io(_) | Error::Write { .. } => ErrorKind::Io,
            Error::NoInput(_) => ErrorKind::NoInput,
            Error::PageOutOfRange(..) | Error::TextExtract(_) => ErrorKind::Extract,
            Error::Vocabulary(_) => ErrorKind::Config,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::TextExtract(err.to_string()),
        }
    }
}
