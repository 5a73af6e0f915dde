//! Line classifier: turns raw text lines into classified Markdown lines.

use crate::error::Result;
use crate::model::ClassifiedLine;

use super::emphasis::Emphasizer;
use super::rules::{rule_table, Rule, RuleContext};
use super::vocabulary::Vocabulary;

/// Classifies lines with an ordered rule table and applies bold-term
/// emphasis.
///
/// Classification is per line: the result for a line depends only on the
/// line itself and the vocabulary, never on neighbouring lines.
#[derive(Debug, Clone)]
pub struct Classifier {
    vocabulary: Vocabulary,
    context: RuleContext,
    rules: Vec<Rule>,
    emphasis: Emphasizer,
}

impl Classifier {
    /// Build a classifier for a vocabulary.
    pub fn new(vocabulary: Vocabulary) -> Result<Self> {
        vocabulary.validate()?;
        let emphasis = Emphasizer::new(&vocabulary.bold_terms)?;
        let context = RuleContext {
            keywords: vocabulary.normalized_keywords(),
            lead_ins: vocabulary.normalized_lead_ins(),
            max_caps_words: vocabulary.max_caps_heading_words,
            max_colon_words: vocabulary.max_colon_heading_words,
            max_keyword_words: vocabulary.max_keyword_heading_words,
        };

        Ok(Self {
            vocabulary,
            context,
            rules: rule_table(),
            emphasis,
        })
    }

    /// Name of the first rule matching a line, or `None` if the line is
    /// discarded as too short.
    pub fn matching_rule(&self, line: &str) -> Option<&'static str> {
        let line = self.accept(line)?;
        self.rules
            .iter()
            .find(|r| r.matches(line, &self.context))
            .map(|r| r.name)
    }

    /// Classify a single line.
    ///
    /// Returns `None` for blank lines and lines shorter than the vocabulary's
    /// minimum length.
    pub fn classify_line(&self, line: &str) -> Option<ClassifiedLine> {
        let line = self.accept(line)?;
        let mut classified = self
            .rules
            .iter()
            .find_map(|r| r.apply(line, &self.context))
            .unwrap_or_else(|| ClassifiedLine::paragraph(line));

        if !classified.role.is_heading() || self.vocabulary.emphasize_headings {
            classified.text = self.emphasis.apply(&classified.text);
        }

        Some(classified)
    }

    /// Classify a sequence of lines, dropping discarded ones.
    pub fn classify_lines<I, S>(&self, lines: I) -> Vec<ClassifiedLine>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.classify_line(line.as_ref()))
            .collect()
    }

    fn accept<'a>(&self, line: &'a str) -> Option<&'a str> {
        let line = line.trim();
        if line.is_empty() || line.chars().count() < self.vocabulary.min_line_chars {
            None
        } else {
            Some(line)
        }
    }
}
