//! Integration tests for the conversion pipeline.

use std::cell::Cell;
use std::fs;
use std::rc::Rc;

use specmark::convert::{convert_source, discover_inputs, run_batch, ConvertOptions, ExtractMode};
use specmark::error::{Error, ErrorKind, Result};
use specmark::model::{SourceMetadata, TextSpan};
use specmark::source::PdfSource;

/// Mock source that counts closes and can fail on a given page.
struct MockSource {
    pages: Vec<Vec<String>>,
    metadata: SourceMetadata,
    fail_on: Option<u32>,
    closes: Rc<Cell<u32>>,
}

impl MockSource {
    fn new(pages: Vec<Vec<&str>>) -> (Self, Rc<Cell<u32>>) {
        let closes = Rc::new(Cell::new(0));
        let source = Self {
            pages: pages
                .into_iter()
                .map(|p| p.into_iter().map(str::to_string).collect())
                .collect(),
            metadata: SourceMetadata::new(),
            fail_on: None,
            closes: Rc::clone(&closes),
        };
        (source, closes)
    }

    fn failing_on(mut self, index: u32) -> Self {
        self.fail_on = Some(index);
        self
    }
}

impl PdfSource for MockSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn page_lines(&self, index: u32) -> Result<Vec<String>> {
        if self.fail_on == Some(index) {
            return Err(Error::TextExtract(format!("page {} is damaged", index + 1)));
        }
        self.pages
            .get(index as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(index, self.page_count()))
    }

    fn page_spans(&self, index: u32) -> Result<Vec<TextSpan>> {
        let lines = self.page_lines(index)?;
        Ok(lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| TextSpan::new(text, 72.0, 72.0 + i as f32 * 14.0, 11.0))
            .collect())
    }

    fn close(&mut self) {
        self.closes.set(self.closes.get() + 1);
    }
}

fn simple() -> ConvertOptions {
    ConvertOptions::new().with_mode(ExtractMode::Simple)
}

#[test]
fn test_source_closed_once_on_success() {
    let (mut source, closes) = MockSource::new(vec![vec!["NETWORK STRATEGY", "Some text here"]]);

    let assembled = convert_source(&mut source, "network-strategy.pdf", &simple()).unwrap();

    assert_eq!(closes.get(), 1);
    assert_eq!(
        assembled.markdown,
        "# Network Strategy\n\n*Converted from PDF: network-strategy.pdf*\n\n---\n\n## Network Strategy\n\nSome text here\n"
    );
}

#[test]
fn test_source_closed_once_on_failure() {
    let (source, closes) = MockSource::new(vec![vec!["first page"], vec!["second page"]]);
    let mut source = source.failing_on(1);

    let err = convert_source(&mut source, "broken.pdf", &simple()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Extract);
    assert_eq!(closes.get(), 1);
}

#[test]
fn test_layout_mode_matches_simple_for_single_column() {
    let pages = vec![vec!["BLUECONTROL FEATURES", "Remote access via DSO cloud"]];
    let (mut a, _) = MockSource::new(pages.clone());
    let (mut b, _) = MockSource::new(pages);

    let layout = convert_source(&mut a, "spec.pdf", &ConvertOptions::new()).unwrap();
    let plain = convert_source(&mut b, "spec.pdf", &simple()).unwrap();

    assert_eq!(layout.markdown, plain.markdown);
    assert!(layout
        .markdown
        .contains("## Bluecontrol Features\n\n- Remote access via **DSO** cloud\n"));
}

#[test]
fn test_blank_pages_skipped() {
    let (mut source, _) = MockSource::new(vec![
        vec!["Intro text"],
        vec![],
        vec!["  ", ""],
        vec!["Closing text"],
    ]);

    let assembled = convert_source(&mut source, "spec.pdf", &simple()).unwrap();
    let md = &assembled.markdown;

    assert!(md.contains("## Page 1\n\nIntro text\n\n---\n\n## Page 4\n\nClosing text\n"));
    assert!(!md.contains("## Page 2"));
    assert!(!md.contains("## Page 3"));
    assert!(!md.ends_with("---\n"));
    assert_eq!(assembled.stats.pages_emitted, 2);
    assert_eq!(assembled.stats.pages_skipped, 2);
}

#[test]
fn test_no_triple_newlines_in_output() {
    let (mut source, _) = MockSource::new(vec![
        vec!["NETWORK STRATEGY", "", "", "", "", "Body line"],
        vec!["Configuration:", "- item one"],
    ]);

    let md = convert_source(&mut source, "spec.pdf", &simple())
        .unwrap()
        .markdown;

    assert!(!md.contains("\n\n\n"));
    assert!(md.ends_with('\n') && !md.ends_with("\n\n"));
}

#[test]
fn test_discover_inputs_no_pdfs() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "not a pdf").unwrap();

    let err = discover_inputs(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoInput);
    assert!(err.to_string().contains("No PDF files found"));
}

#[test]
fn test_batch_reports_invalid_pdf_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a-broken.pdf"), "this is not a pdf").unwrap();
    fs::write(dir.path().join("b-empty.pdf"), "").unwrap();

    let inputs = discover_inputs(dir.path()).unwrap();
    assert_eq!(inputs.len(), 2);

    let mut calls = 0;
    let report = run_batch(&inputs, None, &ConvertOptions::new(), |_, outcome| {
        calls += 1;
        assert!(outcome.is_err());
    });

    assert_eq!(calls, 2);
    assert_eq!(report.failed.len(), 2);
    assert!(report
        .failed
        .iter()
        .all(|(_, e)| e.kind() == ErrorKind::Open));
    assert!(!dir.path().join("a-broken.md").exists());
}
