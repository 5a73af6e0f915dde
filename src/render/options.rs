//! Rendering options.

/// Options controlling document assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit a `*Conversion Date: ...*` line in the header
    pub include_conversion_date: bool,

    /// Emit `## Page N` headings for multi-page documents
    pub page_headings: bool,

    /// Emit the `*Created: ...*` line when the source has a creation date
    pub include_creation_date: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the conversion date line.
    pub fn with_conversion_date(mut self, include: bool) -> Self {
        self.include_conversion_date = include;
        self
    }

    /// Enable or disable page headings.
    pub fn with_page_headings(mut self, include: bool) -> Self {
        self.page_headings = include;
        self
    }

    /// Enable or disable the creation date line.
    pub fn with_creation_date(mut self, include: bool) -> Self {
        self.include_creation_date = include;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_conversion_date: false,
            page_headings: true,
            include_creation_date: true,
        }
    }
}
