//! Data model for extracted and classified content.

mod document;
mod line;
mod span;

pub use document::{
    display_pdf_date, parse_pdf_date, DocumentInfo, PageLines, SourceMetadata, CREATION_DATE_KEY,
};
pub use line::{ClassifiedLine, LineRole};
pub use span::{Row, SpanFlags, TextSpan};
