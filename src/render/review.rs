//! Companion "review notes" document written next to a conversion.

use chrono::NaiveDateTime;

use super::assembler::TIMESTAMP_FORMAT;

/// Inputs for the review notes template.
#[derive(Debug, Clone)]
pub struct ReviewNotes<'a> {
    /// Document title
    pub title: &'a str,
    /// Pages in the source document
    pub page_count: u32,
    /// Source PDF file name
    pub source_name: &'a str,
    /// Generated Markdown file name
    pub output_name: &'a str,
    /// When the notes were generated
    pub generated_at: NaiveDateTime,
}

impl ReviewNotes<'_> {
    /// Render the notes as Markdown.
    pub fn render(&self) -> String {
        let pages = if self.page_count == 1 { "page" } else { "pages" };
        format!(
            "# Review Notes for {title}\n\
             \n\
             ## Conversion Status\n\
             - PDF successfully converted to markdown\n\
             - {count} {pages} processed\n\
             - Manual review recommended for structure optimization\n\
             \n\
             ## Next Steps\n\
             1. Review the generated markdown for structure and formatting\n\
             2. Enhance headings and section organization as needed\n\
             3. Add any missing context or explanations\n\
             4. Consider creating a cleaned/polished version\n\
             \n\
             ## Files Generated\n\
             - Raw conversion: `{output}`\n\
             - Original PDF: `{source}`\n\
             \n\
             *Generated on: {at}*\n",
            title = self.title,
            count = self.page_count,
            pages = pages,
            output = self.output_name,
            source = self.source_name,
            at = self.generated_at.format(TIMESTAMP_FORMAT),
        )
    }
}
