//! Classified lines.

use serde::{Deserialize, Serialize};

/// Structural role inferred for a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineRole {
    /// A heading with a Markdown level (2 = `##`, 3 = `###`)
    Heading {
        /// Heading level
        level: u8,
    },
    /// An unordered list item
    ListItem,
    /// Plain paragraph text
    Paragraph,
}

impl LineRole {
    /// Whether this role is a heading of any level.
    pub fn is_heading(&self) -> bool {
        matches!(self, LineRole::Heading { .. })
    }
}

/// A line tagged with its structural role, ready to be emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// The inferred role
    pub role: LineRole,
    /// Display text with list markers stripped and emphasis applied
    pub text: String,
}

impl ClassifiedLine {
    /// Create a classified line.
    pub fn new(role: LineRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Create a heading line.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(LineRole::Heading { level }, text)
    }

    /// Create a list item line.
    pub fn list_item(text: impl Into<String>) -> Self {
        Self::new(LineRole::ListItem, text)
    }

    /// Create a paragraph line.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(LineRole::Paragraph, text)
    }

    /// Render the line as a Markdown fragment.
    pub fn to_markdown(&self) -> String {
        match self.role {
            LineRole::Heading { level } => {
                format!("{} {}", "#".repeat(level.clamp(1, 6) as usize), self.text)
            }
            LineRole::ListItem => format!("- {}", self.text),
            LineRole::Paragraph => self.text.clone(),
        }
    }
}
