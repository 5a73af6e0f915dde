//! Small text helpers shared by the rules.

use unicode_normalization::UnicodeNormalization;

const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Normalize an extracted line: NFC, ligatures expanded, whitespace runs
/// collapsed to single spaces, trimmed.
pub fn normalize_line(line: &str) -> String {
    let mut expanded = String::with_capacity(line.len());
    for c in line.nfc() {
        match LIGATURES.iter().find(|(lig, _)| *lig == c) {
            Some((_, replacement)) => expanded.push_str(replacement),
            None => expanded.push(c),
        }
    }
    expanded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-separated words.
pub fn word_count(line: &str) -> usize {
    line.split_whitespace().count()
}

/// True when the line has at least one cased letter and none are lower-case.
pub fn is_all_caps(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Title-case a string: the first cased letter after any uncased character
/// is upper-cased, every other letter is lower-cased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = c.is_uppercase() || c.is_lowercase();
    }
    out
}

/// Byte length of a leading `<digits>.` marker, e.g. `12.` in `12. Item`.
///
/// A dot followed by another digit (`1.5 GHz`) is a decimal, not a marker.
pub fn numeric_marker_len(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || bytes.get(digits) != Some(&b'.') {
        return None;
    }
    match bytes.get(digits + 1) {
        Some(b) if b.is_ascii_digit() => None,
        _ => Some(digits + 1),
    }
}
