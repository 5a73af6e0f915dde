//! Assembly result and statistics.

use serde::{Deserialize, Serialize};

use crate::model::{ClassifiedLine, LineRole};

/// An assembled Markdown document with statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assembled {
    /// The Markdown text
    pub markdown: String,

    /// Counts gathered during assembly
    pub stats: ConversionStats,
}

/// Counts gathered while assembling a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages that produced a section
    pub pages_emitted: u32,

    /// Pages skipped because they had no usable text
    pub pages_skipped: u32,

    /// Heading lines emitted
    pub heading_count: u32,

    /// List items emitted
    pub list_item_count: u32,

    /// Paragraph lines emitted
    pub paragraph_count: u32,
}

impl ConversionStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one emitted line.
    pub fn add_line(&mut self, line: &ClassifiedLine) {
        match line.role {
            LineRole::Heading { .. } => self.heading_count += 1,
            LineRole::ListItem => self.list_item_count += 1,
            LineRole::Paragraph => self.paragraph_count += 1,
        }
    }

    /// Total number of emitted lines.
    pub fn line_count(&self) -> u32 {
        self.heading_count + self.list_item_count + self.paragraph_count
    }
}
