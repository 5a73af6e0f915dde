//! Conversion pipeline: open, extract, classify, assemble, write.
//!
//! # Example
//!
//! ```no_run
//! use specmark::convert::{convert_file, ConvertOptions};
//!
//! fn main() -> specmark::Result<()> {
//!     let options = ConvertOptions::new().with_review_notes(true);
//!     let result = convert_file("specifications/network strategy.pdf", None, &options)?;
//!     println!("wrote {}", result.output_path.display());
//!     Ok(())
//! }
//! ```

mod batch;
mod pdf;

pub use batch::{discover_inputs, run_batch, BatchReport};
pub use pdf::{convert_file, output_file_name, review_notes_file_name};

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::format::{normalize_line, Classifier, Vocabulary};
use crate::layout::{row_texts, RowOptions};
use crate::model::{display_pdf_date, DocumentInfo, PageLines};
use crate::render::{title_from_file_name, Assembled, Assembler, ConversionStats, RenderOptions};
use crate::source::PdfSource;

/// How raw lines are read from a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    /// Rebuild rows from positioned spans
    #[default]
    Layout,

    /// Use the PDF library's plain text lines as-is
    Simple,
}

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Line extraction mode
    pub mode: ExtractMode,

    /// Row reconstruction options (layout mode)
    pub rows: RowOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Heading keywords, bold terms and thresholds
    pub vocabulary: Vocabulary,

    /// Write a review notes file next to each output
    pub review_notes: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction mode.
    pub fn with_mode(mut self, mode: ExtractMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set row reconstruction options.
    pub fn with_row_options(mut self, rows: RowOptions) -> Self {
        self.rows = rows;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Set the vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Enable or disable review notes.
    pub fn with_review_notes(mut self, enabled: bool) -> Self {
        self.review_notes = enabled;
        self
    }
}

/// Result of converting one file.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Source PDF
    pub input_path: PathBuf,

    /// Written Markdown file
    pub output_path: PathBuf,

    /// Written review notes, if enabled
    pub review_notes_path: Option<PathBuf>,

    /// Pages in the source document
    pub page_count: u32,

    /// Assembly statistics
    pub stats: ConversionStats,
}

/// Convert an opened source into a Markdown document.
///
/// `source_name` is the source's file name (or path); it supplies the title
/// and the "Converted from" line. The source is closed exactly once before
/// this returns, whether conversion succeeded or not.
pub fn convert_source<S>(
    source: &mut S,
    source_name: &str,
    options: &ConvertOptions,
) -> Result<Assembled>
where
    S: PdfSource + ?Sized,
{
    let result = build_document(&*source, source_name, options);
    source.close();
    result
}

fn build_document<S>(source: &S, source_name: &str, options: &ConvertOptions) -> Result<Assembled>
where
    S: PdfSource + ?Sized,
{
    let classifier = Classifier::new(options.vocabulary.clone())?;
    let page_count = source.page_count();

    let mut pages = Vec::with_capacity(page_count as usize);
    for index in 0..page_count {
        let raw = match options.mode {
            ExtractMode::Layout => row_texts(source.page_spans(index)?, &options.rows),
            ExtractMode::Simple => source.page_lines(index)?,
        };
        let lines = classifier.classify_lines(raw.iter().map(|line| normalize_line(line)));
        log::debug!(
            "page {}: {} raw lines, {} kept",
            index + 1,
            raw.len(),
            lines.len()
        );
        pages.push(PageLines::new(index + 1, lines));
    }

    let created = source.metadata().creation_date().map(display_pdf_date);
    let info = DocumentInfo::new(
        title_from_file_name(source_name),
        display_name(source_name),
        page_count,
    )
    .with_created(created);

    let assembled = Assembler::new(options.render.clone()).assemble(&info, &pages);
    log::info!(
        "converted {} ({} of {} pages emitted)",
        info.source_name,
        assembled.stats.pages_emitted,
        page_count
    );
    Ok(assembled)
}

fn display_name(source_name: &str) -> String {
    Path::new(source_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_name.to_string())
}
