//! Markdown document assembly.

use std::path::Path;

use chrono::{Local, NaiveDateTime};

use crate::format::title_case;
use crate::model::{DocumentInfo, PageLines};

use super::cleanup::finalize;
use super::{Assembled, ConversionStats, RenderOptions};

/// Timestamp format used in generated headers and notes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Derive a display title from a file name: separators become spaces and
/// the result is title-cased. Runs of separators collapse to one space, so
/// `farm_online__guide.pdf` gives `Farm Online Guide`.
pub fn title_from_file_name<P: AsRef<Path>>(path: P) -> String {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let spaced = stem.replace(|c: char| c == '-' || c == '_', " ");
    title_case(spaced.split_whitespace().collect::<Vec<_>>().join(" ").as_str())
}

/// Assembles classified pages into one Markdown document.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: RenderOptions,
}

impl Assembler {
    /// Create an assembler.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Assemble a document, stamping any conversion date with the current
    /// local time.
    pub fn assemble(&self, info: &DocumentInfo, pages: &[PageLines]) -> Assembled {
        self.assemble_at(info, pages, Local::now().naive_local())
    }

    /// Assemble a document with an explicit conversion time.
    pub fn assemble_at(
        &self,
        info: &DocumentInfo,
        pages: &[PageLines],
        converted_at: NaiveDateTime,
    ) -> Assembled {
        let mut stats = ConversionStats::new();
        let mut blocks: Vec<String> = Vec::new();

        blocks.push(format!("# {}", info.title));
        blocks.push(format!("*Converted from PDF: {}*", info.source_name));
        if self.options.include_creation_date {
            if let Some(ref created) = info.created {
                blocks.push(format!("*Created: {}*", created));
            }
        }
        if self.options.include_conversion_date {
            blocks.push(format!(
                "*Conversion Date: {}*",
                converted_at.format(TIMESTAMP_FORMAT)
            ));
        }
        blocks.push("---".to_string());

        let emitted: Vec<&PageLines> = pages.iter().filter(|p| !p.is_empty()).collect();
        stats.pages_skipped = (pages.len() - emitted.len()) as u32;
        let with_page_headings = self.options.page_headings && info.page_count > 1;

        for (i, page) in emitted.iter().enumerate() {
            stats.pages_emitted += 1;
            if with_page_headings {
                blocks.push(format!("## Page {}", page.number));
            }
            for line in &page.lines {
                stats.add_line(line);
                blocks.push(line.to_markdown());
            }
            if i + 1 < emitted.len() {
                blocks.push("---".to_string());
            }
        }

        log::debug!(
            "assembled '{}': {} pages emitted, {} skipped, {} lines",
            info.title,
            stats.pages_emitted,
            stats.pages_skipped,
            stats.line_count()
        );

        Assembled {
            markdown: finalize(&blocks.join("\n\n")),
            stats,
        }
    }
}
