//! Batch conversion of a directory of PDFs.

use std::fs;
use std::path::{Path, PathBuf};

use super::{convert_file, ConvertOptions, ConvertResult};
use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files converted successfully, in processing order
    pub converted: Vec<ConvertResult>,

    /// Files that failed, with the error for each
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    /// Number of files attempted.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// Whether every file converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Find PDF files (case-insensitive `.pdf`) directly inside `dir`, sorted by
/// path.
///
/// A missing directory or one without PDFs is [`Error::NoInput`].
pub fn discover_inputs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("cannot read {}: {}", dir.display(), e);
            return Err(Error::NoInput(dir.to_path_buf()));
        }
    };

    let mut inputs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_pdf_extension(path))
        .collect();
    inputs.sort();

    if inputs.is_empty() {
        return Err(Error::NoInput(dir.to_path_buf()));
    }
    Ok(inputs)
}

/// Convert each input in order. A failure is recorded and the run moves on
/// to the next file.
///
/// `on_progress` is called after each file with the file and its outcome.
pub fn run_batch<F>(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    options: &ConvertOptions,
    mut on_progress: F,
) -> BatchReport
where
    F: FnMut(&Path, std::result::Result<&ConvertResult, &Error>),
{
    let mut report = BatchReport::default();

    for input in inputs {
        match convert_file(input, output_dir, options) {
            Ok(result) => {
                on_progress(input, Ok(&result));
                report.converted.push(result);
            }
            Err(e) => {
                log::warn!("failed to convert {}: {}", input.display(), e);
                on_progress(input, Err(&e));
                report.failed.push((input.clone(), e));
            }
        }
    }

    log::info!(
        "batch finished: {} converted, {} failed",
        report.converted.len(),
        report.failed.len()
    );
    report
}
