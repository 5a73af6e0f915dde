//! Rendering of classified pages into the final Markdown document.

mod assembler;
mod cleanup;
mod options;
mod result;
mod review;

pub use assembler::{title_from_file_name, Assembler, TIMESTAMP_FORMAT};
pub use cleanup::{collapse_blank_lines, finalize};
pub use options::RenderOptions;
pub use result::{Assembled, ConversionStats};
pub use review::ReviewNotes;
