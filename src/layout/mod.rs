//! Layout reconstruction from positioned text spans.

mod rows;

pub use rows::{group_rows, row_texts, RowOptions};
