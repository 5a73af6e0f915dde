//! Access to PDF content.
//!
//! The conversion pipeline only talks to the [`PdfSource`] trait, which
//! isolates the concrete PDF library (lopdf) from the structure heuristics.

mod content;
mod lopdf_source;
mod memory;

pub use lopdf_source::LopdfSource;
pub use memory::{MemoryPage, MemorySource};

use crate::error::Result;
use crate::model::{SourceMetadata, TextSpan};

/// An opened document the converter can read pages from.
///
/// Page indices are zero-based. A source must be closed exactly once after
/// use; reading from a closed source is an error.
pub trait PdfSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Document metadata.
    fn metadata(&self) -> &SourceMetadata;

    /// Raw text lines of a page in extraction order.
    fn page_lines(&self, index: u32) -> Result<Vec<String>>;

    /// Positioned text spans of a page.
    fn page_spans(&self, index: u32) -> Result<Vec<TextSpan>>;

    /// Release the underlying document.
    fn close(&mut self);
}
