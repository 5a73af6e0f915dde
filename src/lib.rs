//! # specmark
//!
//! Heuristic PDF to Markdown conversion for specification documents.
//!
//! Text is pulled from each page, rebuilt into rows from span positions,
//! classified line by line (headings, list items, paragraphs) with a small
//! rule table, and assembled into one Markdown document per PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! use specmark::to_markdown;
//!
//! fn main() -> specmark::Result<()> {
//!     let markdown = to_markdown("specifications/network-strategy.pdf")?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Row reconstruction**: spans grouped by rounded vertical position
//! - **Ordered rule table**: all-caps, colon and keyword headings, list items
//! - **Domain vocabulary**: heading keywords and bold terms loaded from JSON
//! - **Batch mode**: convert a directory of PDFs, continuing past failures

pub mod convert;
pub mod detect;
pub mod error;
pub mod format;
pub mod layout;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use convert::{
    convert_file, convert_source, discover_inputs, run_batch, BatchReport, ConvertOptions,
    ConvertResult, ExtractMode,
};
pub use detect::is_pdf;
pub use error::{Error, ErrorKind, Result};
pub use format::{Classifier, Vocabulary};
pub use layout::RowOptions;
pub use model::{ClassifiedLine, LineRole, Row, SourceMetadata, SpanFlags, TextSpan};
pub use render::{Assembled, ConversionStats, RenderOptions};
pub use source::{LopdfSource, PdfSource};

use std::path::Path;

/// Convert a PDF to Markdown with default options.
///
/// # Example
///
/// ```no_run
/// use specmark::to_markdown;
///
/// let markdown = to_markdown("document.pdf").unwrap();
/// std::fs::write("document.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    to_markdown_with_options(path, &ConvertOptions::default())
}

/// Convert a PDF to Markdown with custom options. Nothing is written to disk.
///
/// # Example
///
/// ```no_run
/// use specmark::{to_markdown_with_options, ConvertOptions, ExtractMode};
///
/// let options = ConvertOptions::new().with_mode(ExtractMode::Simple);
/// let markdown = to_markdown_with_options("document.pdf", &options).unwrap();
/// ```
pub fn to_markdown_with_options<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<String> {
    let path = path.as_ref();
    let mut source = LopdfSource::open(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(convert_source(&mut source, &name, options)?.markdown)
}

/// Read page count and metadata without converting.
pub fn inspect<P: AsRef<Path>>(path: P) -> Result<(u32, SourceMetadata)> {
    let mut source = LopdfSource::open(path)?;
    let info = (source.page_count(), source.metadata().clone());
    source.close();
    Ok(info)
}
