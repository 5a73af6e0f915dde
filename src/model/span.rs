//! Text spans and rows.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Font style flags carried by a span.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SpanFlags: u32 {
        /// Italic or oblique face
        const ITALIC = 1 << 1;
        /// Fixed-pitch face
        const MONOSPACE = 1 << 3;
        /// Bold, black or heavy face
        const BOLD = 1 << 4;
    }
}

impl SpanFlags {
    /// Infer style flags from a font's base name (e.g. "Helvetica-BoldOblique").
    pub fn from_font_name(font_name: &str) -> Self {
        let name = font_name.to_lowercase();
        let mut flags = SpanFlags::empty();
        if name.contains("bold") || name.contains("black") || name.contains("heavy") {
            flags |= SpanFlags::BOLD;
        }
        if name.contains("italic") || name.contains("oblique") {
            flags |= SpanFlags::ITALIC;
        }
        if name.contains("courier") || name.contains("mono") {
            flags |= SpanFlags::MONOSPACE;
        }
        flags
    }
}

/// A styled run of text at a known position on a page.
///
/// Coordinates are in page units with the origin at the top-left corner:
/// `y` grows downward and marks the top edge of the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Top edge, measured from the top of the page
    pub y: f32,
    /// Font size in points
    pub font_size: f32,
    /// Style flags
    pub flags: SpanFlags,
}

impl TextSpan {
    /// Create a span with no style flags.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            flags: SpanFlags::empty(),
        }
    }

    /// Set the style flags.
    pub fn with_flags(mut self, flags: SpanFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Spans sharing an approximate vertical position, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Vertical position of the row (rounded top edge)
    pub y: f64,
    /// Spans in ascending `x` order
    pub spans: Vec<TextSpan>,
}

impl Row {
    /// Concatenate the spans' trimmed text with single spaces.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
