//! Domain vocabulary driving the classifier.
//!
//! The keyword lists and thresholds are data, not code: a different
//! document family only needs a different [`Vocabulary`], which can be
//! loaded from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Keyword sets and thresholds used by the line classifier.
///
/// Every field has a default, so a JSON override may name only the fields
/// it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Terms that mark a short capitalised line as a section heading
    /// (matched as lower-case substrings)
    pub heading_keywords: Vec<String>,

    /// Terms rendered in bold wherever they occur, in their display spelling
    pub bold_terms: Vec<String>,

    /// Words that introduce a list item when they start a line
    pub list_lead_ins: Vec<String>,

    /// Lines shorter than this (in characters) are dropped as artifacts
    pub min_line_chars: usize,

    /// Maximum words for an all-caps heading
    pub max_caps_heading_words: usize,

    /// Maximum words for a colon-terminated heading
    pub max_colon_heading_words: usize,

    /// Maximum words for a keyword heading
    pub max_keyword_heading_words: usize,

    /// Apply bold-term emphasis inside headings as well
    pub emphasize_headings: bool,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            heading_keywords: to_strings(&[
                "strategy",
                "description",
                "features",
                "configuration",
                "applications",
                "support",
                "access",
                "update",
                "network",
            ]),
            bold_terms: to_strings(&["BlueControl", "FarmOnline+", "DSO"]),
            list_lead_ins: to_strings(&["via", "lvl", "remote", "latest", "over"]),
            min_line_chars: 3,
            max_caps_heading_words: 6,
            max_colon_heading_words: 8,
            max_keyword_heading_words: 5,
            emphasize_headings: false,
        }
    }
}

impl Vocabulary {
    /// Create the default vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the heading keywords.
    pub fn with_heading_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.heading_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the bold terms.
    pub fn with_bold_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bold_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the list lead-in words.
    pub fn with_list_lead_ins<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_lead_ins = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the minimum line length.
    pub fn with_min_line_chars(mut self, chars: usize) -> Self {
        self.min_line_chars = chars;
        self
    }

    /// Enable or disable emphasis inside headings.
    pub fn with_heading_emphasis(mut self, enabled: bool) -> Self {
        self.emphasize_headings = enabled;
        self
    }

    /// Parse a vocabulary from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let vocabulary: Vocabulary =
            serde_json::from_str(json).map_err(|e| Error::Vocabulary(e.to_string()))?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Load a vocabulary from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Vocabulary(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Check thresholds and terms.
    pub fn validate(&self) -> Result<()> {
        if self.max_caps_heading_words == 0
            || self.max_colon_heading_words == 0
            || self.max_keyword_heading_words == 0
        {
            return Err(Error::Vocabulary(
                "heading word limits must be at least 1".to_string(),
            ));
        }

        let lists = [
            ("heading_keywords", &self.heading_keywords),
            ("bold_terms", &self.bold_terms),
            ("list_lead_ins", &self.list_lead_ins),
        ];
        for (name, terms) in lists {
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(Error::Vocabulary(format!("{} contains an empty entry", name)));
            }
        }

        if self.list_lead_ins.iter().any(|w| w.trim().contains(char::is_whitespace)) {
            return Err(Error::Vocabulary(
                "list_lead_ins entries must be single words".to_string(),
            ));
        }

        Ok(())
    }

    /// Keywords lower-cased for matching.
    pub(crate) fn normalized_keywords(&self) -> Vec<String> {
        self.heading_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .collect()
    }

    /// Lead-in words lower-cased for matching.
    pub(crate) fn normalized_lead_ins(&self) -> Vec<String> {
        self.list_lead_ins
            .iter()
            .map(|w| w.trim().to_lowercase())
            .collect()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_is_valid() {
        let vocabulary = Vocabulary::default();
        assert!(vocabulary.validate().is_ok());
        assert!(vocabulary.heading_keywords.contains(&"network".to_string()));
        assert_eq!(vocabulary.min_line_chars, 3);
    }

    #[test]
    fn test_partial_json_override() {
        let vocabulary =
            Vocabulary::from_json_str(r#"{ "bold_terms": ["Gateway"], "min_line_chars": 5 }"#)
                .unwrap();
        assert_eq!(vocabulary.bold_terms, vec!["Gateway".to_string()]);
        assert_eq!(vocabulary.min_line_chars, 5);
        // untouched fields keep their defaults
        assert_eq!(vocabulary.max_caps_heading_words, 6);
        assert!(!vocabulary.heading_keywords.is_empty());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = Vocabulary::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Vocabulary(_)));

        let err = Vocabulary::from_json_str(r#"{ "max_colon_heading_words": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("at least 1"));

        let err = Vocabulary::from_json_str(r#"{ "bold_terms": ["DSO", " "] }"#).unwrap_err();
        assert!(err.to_string().contains("bold_terms"));

        let err = Vocabulary::from_json_str(r#"{ "list_lead_ins": ["go to"] }"#).unwrap_err();
        assert!(err.to_string().contains("single words"));
    }

    #[test]
    fn test_builder() {
        let vocabulary = Vocabulary::new()
            .with_heading_keywords(["Pricing"])
            .with_list_lead_ins(["Using"])
            .with_heading_emphasis(true);
        assert_eq!(vocabulary.normalized_keywords(), vec!["pricing".to_string()]);
        assert_eq!(vocabulary.normalized_lead_ins(), vec!["using".to_string()]);
        assert!(vocabulary.emphasize_headings);
    }
}
