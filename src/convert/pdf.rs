//! Converting PDF files on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;

use super::{convert_source, ConvertOptions, ConvertResult};
use crate::error::{Error, Result};
use crate::render::{title_from_file_name, ReviewNotes};
use crate::source::{LopdfSource, PdfSource};

/// Markdown file name for a source document.
///
/// The stem is lower-cased with spaces and underscores turned into dashes,
/// so `DSO Network Strategy_110925.pdf` becomes `dso-network-strategy-110925.md`.
pub fn output_file_name<P: AsRef<Path>>(path: P) -> String {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.md", stem.replace(|c: char| c == ' ' || c == '_', "-").to_lowercase())
}

/// Review notes file name for a Markdown output name.
pub fn review_notes_file_name(output_name: &str) -> String {
    let stem = output_name.strip_suffix(".md").unwrap_or(output_name);
    format!("{}-review-notes.md", stem)
}

/// Convert a PDF file and write the Markdown next to it, or into
/// `output_dir` when given.
pub fn convert_file<P: AsRef<Path>>(
    input: P,
    output_dir: Option<&Path>,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    let input = input.as_ref();
    let source_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let mut source = LopdfSource::open(input)?;
    let page_count = source.page_count();
    let assembled = convert_source(&mut source, &source_name, options)?;

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => parent_dir(input),
    };
    fs::create_dir_all(&dir).map_err(|source| Error::Write {
        path: dir.clone(),
        source,
    })?;

    let output_name = output_file_name(input);
    let output_path = dir.join(&output_name);
    write_atomic(&output_path, &assembled.markdown)?;
    log::info!("wrote {}", output_path.display());

    let review_notes_path = if options.review_notes {
        let notes = ReviewNotes {
            title: &title_from_file_name(input),
            page_count,
            source_name: &source_name,
            output_name: &output_name,
            generated_at: Local::now().naive_local(),
        };
        let path = dir.join(review_notes_file_name(&output_name));
        write_atomic(&path, &notes.render())?;
        Some(path)
    } else {
        None
    };

    Ok(ConvertResult {
        input_path: input.to_path_buf(),
        output_path,
        review_notes_path,
        page_count,
        stats: assembled.stats,
    })
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Write a file through a temporary file in the same directory.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source: io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(parent_dir(path)).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("specifications/DSO BlueControl Network Strategy_110925_200446.pdf"),
            "dso-bluecontrol-network-strategy-110925-200446.md"
        );
        assert_eq!(output_file_name("plain.pdf"), "plain.md");
    }

    #[test]
    fn test_review_notes_file_name() {
        assert_eq!(
            review_notes_file_name("network-strategy.md"),
            "network-strategy-review-notes.md"
        );
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("file.pdf")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("a/file.pdf")), PathBuf::from("a"));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");

        write_atomic(&path, "first\n").unwrap();
        write_atomic(&path, "second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.md");

        let err = write_atomic(&path, "text").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }

    #[test]
    fn test_convert_file_rejects_invalid_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.pdf");
        fs::write(&input, "not a pdf").unwrap();

        let err = convert_file(&input, None, &ConvertOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
        assert!(!dir.path().join("broken.md").exists());
    }
}
