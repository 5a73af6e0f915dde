//! Document-level types.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ClassifiedLine;

/// Metadata key holding the document creation date.
pub const CREATION_DATE_KEY: &str = "creationDate";

/// Document metadata as a string-to-string mapping.
///
/// Keys follow the PDF Info dictionary, camel-cased (`title`, `author`,
/// `creationDate`, ...). Any key may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata(BTreeMap<String, String>);

impl SourceMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Raw creation date, if present and non-blank.
    pub fn creation_date(&self) -> Option<&str> {
        self.get(CREATION_DATE_KEY).filter(|d| !d.trim().is_empty())
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no metadata is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Descriptive information used for the document header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Display title
    pub title: String,
    /// File name of the source document (no directory)
    pub source_name: String,
    /// Creation date, already formatted for display
    pub created: Option<String>,
    /// Total number of pages in the source
    pub page_count: u32,
}

impl DocumentInfo {
    /// Create document info.
    pub fn new(title: impl Into<String>, source_name: impl Into<String>, page_count: u32) -> Self {
        Self {
            title: title.into(),
            source_name: source_name.into(),
            created: None,
            page_count,
        }
    }

    /// Set the display creation date.
    pub fn with_created(mut self, created: Option<String>) -> Self {
        self.created = created;
        self
    }
}

/// Classified lines of a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLines {
    /// Page number (1-indexed)
    pub number: u32,
    /// Lines in reading order
    pub lines: Vec<ClassifiedLine>,
}

impl PageLines {
    /// Create a page.
    pub fn new(number: u32, lines: Vec<ClassifiedLine>) -> Self {
        Self { number, lines }
    }

    /// Whether the page has nothing to emit.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSSOHH'mm'`).
///
/// Missing trailing components default to the start of the period. The
/// timezone suffix is ignored.
pub fn parse_pdf_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day).and_then(|date| date.and_hms_opt(hour, minute, second))
}

/// Format a raw metadata date for display, falling back to the raw value.
pub fn display_pdf_date(raw: &str) -> String {
    match parse_pdf_date(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_pdf_date() {
        let date = parse_pdf_date("D:20250911200446+02'00'").unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 9);
        assert_eq!(date.day(), 11);
        assert_eq!(date.hour(), 20);
        assert_eq!(date.second(), 46);
    }

    #[test]
    fn test_parse_pdf_date_minimal() {
        let date = parse_pdf_date("D:2024").unwrap();
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
        assert!(parse_pdf_date("D:20").is_none());
    }

    #[test]
    fn test_display_pdf_date() {
        assert_eq!(display_pdf_date("D:20240115103045Z"), "2024-01-15 10:30:45");
        assert_eq!(display_pdf_date("last spring"), "last spring");
    }

    #[test]
    fn test_metadata_creation_date() {
        let metadata = SourceMetadata::new().with("title", "Network Strategy");
        assert_eq!(metadata.creation_date(), None);

        let metadata = metadata.with(CREATION_DATE_KEY, "D:20250911");
        assert_eq!(metadata.creation_date(), Some("D:20250911"));
        assert_eq!(metadata.len(), 2);

        let blank = SourceMetadata::new().with(CREATION_DATE_KEY, "  ");
        assert_eq!(blank.creation_date(), None);
    }

    #[test]
    fn test_page_lines_empty() {
        assert!(PageLines::new(1, vec![]).is_empty());
        assert!(!PageLines::new(1, vec![ClassifiedLine::paragraph("text")]).is_empty());
    }
}
