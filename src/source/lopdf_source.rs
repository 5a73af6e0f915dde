//! [`PdfSource`] backed by lopdf.

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId};

use super::content::{decode_text_simple, extract_spans};
use super::PdfSource;
use crate::detect::check_pdf_file;
use crate::error::{Error, Result};
use crate::model::{SourceMetadata, TextSpan, CREATION_DATE_KEY};

/// Info dictionary entries copied into [`SourceMetadata`].
const INFO_KEYS: [(&[u8], &str); 8] = [
    (b"Title", "title"),
    (b"Author", "author"),
    (b"Subject", "subject"),
    (b"Keywords", "keywords"),
    (b"Creator", "creator"),
    (b"Producer", "producer"),
    (b"CreationDate", CREATION_DATE_KEY),
    (b"ModDate", "modDate"),
];

/// A PDF document opened from disk.
pub struct LopdfSource {
    path: PathBuf,
    doc: Option<Document>,
    pages: Vec<ObjectId>,
    metadata: SourceMetadata,
}

impl LopdfSource {
    /// Open a PDF file.
    ///
    /// Missing files, unreadable files, files without a PDF header and
    /// documents lopdf cannot load are all reported as [`Error::Open`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        check_pdf_file(path)?;

        let doc = Document::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::open(path, "document is encrypted"),
            other => Error::open(path, other.to_string()),
        })?;

        if doc.is_encrypted() {
            log::warn!("{} is encrypted; text may be unreadable", path.display());
        }

        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let metadata = read_metadata(&doc);
        log::debug!("opened {} ({} pages)", path.display(), pages.len());

        Ok(Self {
            path: path.to_path_buf(),
            doc: Some(doc),
            pages,
            metadata,
        })
    }

    /// Path the document was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`PdfSource::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.doc.is_none()
    }

    fn document(&self) -> Result<&Document> {
        self.doc
            .as_ref()
            .ok_or_else(|| Error::TextExtract(format!("{} is closed", self.path.display())))
    }

    fn page_id(&self, index: u32) -> Result<ObjectId> {
        self.pages
            .get(index as usize)
            .copied()
            .ok_or(Error::PageOutOfRange(index, self.pages.len() as u32))
    }
}

impl PdfSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn page_lines(&self, index: u32) -> Result<Vec<String>> {
        self.page_id(index)?;
        let doc = self.document()?;
        let text = doc
            .extract_text(&[index + 1])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", index + 1, e)))?;
        Ok(text.lines().map(str::to_string).collect())
    }

    fn page_spans(&self, index: u32) -> Result<Vec<TextSpan>> {
        let page_id = self.page_id(index)?;
        let doc = self.document()?;
        extract_spans(doc, page_id)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", index + 1, e)))
    }

    fn close(&mut self) {
        if self.doc.take().is_some() {
            log::debug!("closed {}", self.path.display());
        }
    }
}

fn read_metadata(doc: &Document) -> SourceMetadata {
    let mut metadata = SourceMetadata::new();
    metadata.insert("format", format!("PDF {}", doc.version));

    if let Some(info) = info_dictionary(doc) {
        for (key, name) in INFO_KEYS {
            if let Some(value) = string_from_dict(info, key) {
                metadata.insert(name, value);
            }
        }
    }
    metadata
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = match dict.get(key).ok()? {
        Object::String(bytes, _) => decode_text_simple(bytes),
        Object::Name(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        _ => return None,
    };
    let value = value.trim_end_matches('\0').trim().to_string();
    (!value.is_empty()).then_some(value)
}
