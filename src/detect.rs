//! PDF signature detection.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Bytes inspected when looking for the signature. Some producers put
/// junk before the header, which readers are expected to tolerate.
const HEADER_WINDOW: usize = 1024;

/// Whether the data contains a PDF header near its start.
pub fn is_pdf(data: &[u8]) -> bool {
    let window = &data[..data.len().min(HEADER_WINDOW)];
    window
        .windows(PDF_MAGIC.len())
        .any(|w| w == PDF_MAGIC)
}

/// Whether a path names a file with a `.pdf` extension (any case).
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Check that a file exists, is readable, and starts like a PDF.
///
/// Every failure is reported as [`Error::Open`].
pub fn check_pdf_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| Error::open(path, e.to_string()))?;

    let mut header = Vec::with_capacity(HEADER_WINDOW);
    file.by_ref()
        .take(HEADER_WINDOW as u64)
        .read_to_end(&mut header)
        .map_err(|e| Error::open(path, e.to_string()))?;

    if is_pdf(&header) {
        Ok(())
    } else {
        Err(Error::open(path, "not a PDF document"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3"));
        assert!(is_pdf(b"\x00\x00junk%PDF-1.4"));
        assert!(!is_pdf(b"PK\x03\x04"));
        assert!(!is_pdf(b""));
    }

    #[test]
    fn test_has_pdf_extension() {
        assert!(has_pdf_extension("spec.pdf"));
        assert!(has_pdf_extension("SPEC.PDF"));
        assert!(!has_pdf_extension("spec.md"));
        assert!(!has_pdf_extension("pdf"));
    }

    #[test]
    fn test_check_pdf_file() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.pdf");
        let err = check_pdf_file(&missing).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));

        let text = dir.path().join("notes.pdf");
        let mut f = File::create(&text).unwrap();
        f.write_all(b"just some text").unwrap();
        let err = check_pdf_file(&text).unwrap_err();
        assert!(err.to_string().contains("not a PDF"));

        let pdf = dir.path().join("ok.pdf");
        std::fs::write(&pdf, b"%PDF-1.4\n").unwrap();
        assert!(check_pdf_file(&pdf).is_ok());
    }
}
