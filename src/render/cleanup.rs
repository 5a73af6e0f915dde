//! Whitespace cleanup for assembled Markdown.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Collapse runs of blank lines to a single blank line.
///
/// Trailing whitespace is stripped from every line first, so lines holding
/// only spaces count as blank.
pub fn collapse_blank_lines(text: &str) -> String {
    let trimmed = text
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    RE_BLANK_RUN.replace_all(&trimmed, "\n\n").into_owned()
}

/// Final normalisation: collapse blank lines, trim the ends, and terminate
/// with exactly one newline.
pub fn finalize(text: &str) -> String {
    let collapsed = collapse_blank_lines(text);
    let body = collapsed.trim_matches('\n');
    if body.is_empty() {
        String::new()
    } else {
        format!("{}\n", body)
    }
}
