//! Bold-term emphasis.

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Rewrites configured terms to `**Term**` wherever they occur.
///
/// Matching is case-insensitive and whole-word. A word boundary is only
/// required on a side where the term itself starts or ends with a word
/// character, so terms such as `FarmOnline+` still match. Every match is
/// replaced by the term's configured spelling.
#[derive(Debug, Clone)]
pub struct Emphasizer {
    pattern: Option<Regex>,
    display: HashMap<String, String>,
}

impl Emphasizer {
    /// Build an emphasizer for the given display spellings.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut display = HashMap::new();
        let mut ordered: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            let key = term.to_lowercase();
            if !display.contains_key(&key) {
                display.insert(key, term.to_string());
                ordered.push(term.to_string());
            }
        }

        if ordered.is_empty() {
            return Ok(Self {
                pattern: None,
                display,
            });
        }

        // longest first so overlapping terms prefer the longer match
        ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let alternatives: Vec<String> = ordered.iter().map(|t| term_pattern(t)).collect();
        let pattern = Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))
            .map_err(|e| Error::Vocabulary(format!("bold terms: {}", e)))?;

        Ok(Self {
            pattern: Some(pattern),
            display,
        })
    }

    /// Whether any terms are configured.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// Apply emphasis to a line.
    pub fn apply(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures| {
                let matched = &caps[0];
                let shown = self
                    .display
                    .get(&matched.to_lowercase())
                    .map(String::as_str)
                    .unwrap_or(matched);
                format!("**{}**", shown)
            })
            .into_owned()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn term_pattern(term: &str) -> String {
    let starts_word = term.chars().next().is_some_and(is_word_char);
    let ends_word = term.chars().last().is_some_and(is_word_char);
    format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(term),
        if ends_word { r"\b" } else { "" }
    )
}
