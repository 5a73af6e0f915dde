//! Row reconstruction: grouping spans into visual lines.
//!
//! Spans are bucketed by their top edge rounded to a fixed granularity.
//! Spans that land in the same bucket are treated as one visual line. This
//! is an approximation: two spans a hair apart across a rounding boundary
//! end up in different rows.

use std::collections::BTreeMap;

use crate::model::{Row, TextSpan};

/// Options for row reconstruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowOptions {
    /// Size of a vertical bucket in page units (1.0 = nearest whole unit)
    pub granularity: f32,
}

impl RowOptions {
    /// Create row options with the default granularity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bucket granularity.
    pub fn with_granularity(mut self, granularity: f32) -> Self {
        self.granularity = granularity;
        self
    }

    /// Granularity actually used; invalid values fall back to 1.0.
    pub fn effective_granularity(&self) -> f32 {
        if self.granularity.is_finite() && self.granularity > 0.0 {
            self.granularity
        } else {
            1.0
        }
    }
}

impl Default for RowOptions {
    fn default() -> Self {
        Self { granularity: 1.0 }
    }
}

/// Group spans into rows, top of page first.
///
/// Spans with blank text are dropped. Within a row spans are ordered by
/// ascending `x`; ties keep their extraction order.
pub fn group_rows(spans: Vec<TextSpan>, options: &RowOptions) -> Vec<Row> {
    let granularity = options.effective_granularity() as f64;
    let mut buckets: BTreeMap<i64, Vec<TextSpan>> = BTreeMap::new();

    for span in spans {
        if span.text.trim().is_empty() {
            continue;
        }
        let key = (span.y as f64 / granularity).round() as i64;
        buckets.entry(key).or_default().push(span);
    }

    buckets
        .into_iter()
        .map(|(key, mut spans)| {
            spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
            Row {
                y: key as f64 * granularity,
                spans,
            }
        })
        .collect()
}

/// Group spans into rows and return each row's text.
pub fn row_texts(spans: Vec<TextSpan>, options: &RowOptions) -> Vec<String> {
    group_rows(spans, options)
        .iter()
        .map(Row::text)
        .filter(|t| !t.is_empty())
        .collect()
}
