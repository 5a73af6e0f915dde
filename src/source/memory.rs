//! In-memory [`PdfSource`] for text obtained elsewhere.

use super::PdfSource;
use crate::error::{Error, Result};
use crate::model::{SourceMetadata, TextSpan};

/// One page of an in-memory document.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    /// Plain text lines (simple mode)
    pub lines: Vec<String>,
    /// Positioned spans (layout mode)
    pub spans: Vec<TextSpan>,
}

impl MemoryPage {
    /// A page given as plain lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            spans: Vec::new(),
        }
    }

    /// A page given as positioned spans.
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        Self {
            lines: Vec::new(),
            spans,
        }
    }
}

/// A document held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<MemoryPage>,
    metadata: SourceMetadata,
    closes: u32,
}

impl MemorySource {
    /// Create a source from pages.
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self {
            pages,
            metadata: SourceMetadata::new(),
            closes: 0,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: SourceMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// How many times the source has been closed.
    pub fn close_count(&self) -> u32 {
        self.closes
    }

    fn page(&self, index: u32) -> Result<&MemoryPage> {
        if self.closes > 0 {
            return Err(Error::TextExtract("source is closed".to_string()));
        }
        self.pages
            .get(index as usize)
            .ok_or(Error::PageOutOfRange(index, self.pages.len() as u32))
    }
}

impl PdfSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn page_lines(&self, index: u32) -> Result<Vec<String>> {
        Ok(self.page(index)?.lines.clone())
    }

    fn page_spans(&self, index: u32) -> Result<Vec<TextSpan>> {
        Ok(self.page(index)?.spans.clone())
    }

    fn close(&mut self) {
        self.closes += 1;
    }
}
