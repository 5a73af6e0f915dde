//! The ordered rule table.
//!
//! Each rule pairs a predicate with a formatter. The classifier evaluates
//! rules in table order and the first predicate that holds decides the
//! line's role, so a line that would satisfy several rules is always
//! formatted by the earliest one.

use crate::model::ClassifiedLine;

use super::text::{is_all_caps, numeric_marker_len, title_case, word_count};

/// Bullet glyphs recognised at the start of a list item.
pub const BULLET_GLYPHS: [char; 5] = ['•', '●', '▪', '◦', '‣'];

/// Dash characters recognised at the start of a list item.
pub const DASHES: [char; 3] = ['-', '–', '—'];

/// Normalized vocabulary view the predicates work against.
#[derive(Debug, Clone)]
pub struct RuleContext {
    /// Lower-cased heading keywords
    pub keywords: Vec<String>,
    /// Lower-cased list lead-in words
    pub lead_ins: Vec<String>,
    /// Word limit for all-caps headings
    pub max_caps_words: usize,
    /// Word limit for colon headings
    pub max_colon_words: usize,
    /// Word limit for keyword headings
    pub max_keyword_words: usize,
}

type Predicate = fn(&str, &RuleContext) -> bool;
type Formatter = fn(&str, &RuleContext) -> ClassifiedLine;

/// One entry of the rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable rule name, used in logs and tests
    pub name: &'static str,
    matches: Predicate,
    format: Formatter,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

impl Rule {
    /// Whether the rule applies to a trimmed, non-empty line.
    pub fn matches(&self, line: &str, ctx: &RuleContext) -> bool {
        (self.matches)(line, ctx)
    }

    /// Format a line this rule matched.
    pub fn format(&self, line: &str, ctx: &RuleContext) -> ClassifiedLine {
        (self.format)(line, ctx)
    }

    /// Format the line if the rule applies.
    pub fn apply(&self, line: &str, ctx: &RuleContext) -> Option<ClassifiedLine> {
        if self.matches(line, ctx) {
            Some(self.format(line, ctx))
        } else {
            None
        }
    }
}

/// The rule table in priority order. The last rule always matches.
pub fn rule_table() -> Vec<Rule> {
    vec![
        Rule {
            name: "all_caps_heading",
            matches: is_caps_heading,
            format: |line, _| ClassifiedLine::heading(2, title_case(line)),
        },
        Rule {
            name: "colon_heading",
            matches: is_colon_heading,
            format: |line, _| ClassifiedLine::heading(3, line),
        },
        Rule {
            name: "keyword_heading",
            matches: is_keyword_heading,
            format: |line, _| ClassifiedLine::heading(3, line),
        },
        Rule {
            name: "list_item",
            matches: |line, ctx| list_content(line, ctx).is_some(),
            format: |line, ctx| ClassifiedLine::list_item(list_content(line, ctx).unwrap_or(line)),
        },
        Rule {
            name: "paragraph",
            matches: |_, _| true,
            format: |line, _| ClassifiedLine::paragraph(line),
        },
    ]
}

fn is_caps_heading(line: &str, ctx: &RuleContext) -> bool {
    is_all_caps(line) && word_count(line) <= ctx.max_caps_words
}

fn is_colon_heading(line: &str, ctx: &RuleContext) -> bool {
    line.ends_with(':') && word_count(line) <= ctx.max_colon_words
}

fn is_keyword_heading(line: &str, ctx: &RuleContext) -> bool {
    let starts_upper = line.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper
        || word_count(line) > ctx.max_keyword_words
        || line.ends_with('.')
        || line.ends_with(',')
    {
        return false;
    }
    // a line opening like a list item is not a title
    if list_content(line, ctx).is_some() {
        return false;
    }
    let lower = line.to_lowercase();
    ctx.keywords.iter().any(|k| lower.contains(k.as_str()))
}

/// Content of a list item with its marker removed, or `None` when the line
/// does not open like a list item.
///
/// Bullets, dashes and numeric markers are stripped; lead-in words are part
/// of the content and stay.
pub fn list_content<'a>(line: &'a str, ctx: &RuleContext) -> Option<&'a str> {
    let first = line.chars().next()?;

    if BULLET_GLYPHS.contains(&first) || DASHES.contains(&first) {
        let rest = line[first.len_utf8()..].trim_start();
        return (!rest.is_empty()).then_some(rest);
    }

    if let Some(len) = numeric_marker_len(line) {
        let rest = line[len..].trim_start();
        return (!rest.is_empty()).then_some(rest);
    }

    let lower = line.to_lowercase();
    let has_lead_in = ctx.lead_ins.iter().any(|word| {
        lower
            .strip_prefix(word.as_str())
            .is_some_and(|rest| rest.starts_with(char::is_whitespace))
    });
    has_lead_in.then_some(line)
}
