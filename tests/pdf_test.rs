//! End-to-end tests against PDFs generated with lopdf.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use specmark::convert::{convert_file, discover_inputs, run_batch, ConvertOptions};
use specmark::source::{LopdfSource, PdfSource};

/// Text placed on a page: (text, x, baseline y, font size).
type Placed<'a> = (&'a str, i64, i64, i64);

fn placed_operations(items: &[Placed]) -> Vec<Operation> {
    let mut operations = Vec::new();
    for &(text, x, y, size) in items {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
        operations.push(Operation::new("Td", vec![x.into(), y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
        operations.push(Operation::new("ET", vec![]));
    }
    operations
}

fn content_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    operations: Vec<Operation>,
) -> ObjectId {
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    })
}

/// Write a PDF whose pages hold the given text items.
fn write_pdf(path: &Path, pages: &[Vec<Placed>]) {
    write_pdf_operations(path, pages.iter().map(|items| placed_operations(items)).collect());
}

/// Write a PDF with one page per content operation list.
fn write_pdf_operations(path: &Path, pages: Vec<Vec<Operation>>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = pages
        .into_iter()
        .map(|operations| content_page(&mut doc, pages_id, resources_id, operations).into())
        .collect();
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Sample Specification"),
        "CreationDate" => Object::string_literal("D:20250911200446+02'00'"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.save(path).unwrap();
}

fn sample_pages() -> Vec<Vec<Placed<'static>>> {
    vec![
        vec![
            ("NETWORK STRATEGY", 72, 760, 16),
            ("Remote access via", 72, 730, 11),
            ("DSO cloud", 170, 730, 11),
            ("Configuration:", 72, 700, 11),
        ],
        vec![],
        vec![("Plain text paragraph line.", 72, 760, 11)],
    ]
}

fn sample_pdf(dir: &Path) -> PathBuf {
    let path = dir.join("sample_spec.pdf");
    write_pdf(&path, &sample_pages());
    path
}

#[test]
fn test_lopdf_source_reads_pages_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_pdf(dir.path());

    let mut source = LopdfSource::open(&path).unwrap();
    assert_eq!(source.page_count(), 3);
    assert_eq!(source.metadata().get("title"), Some("Sample Specification"));
    assert!(source.metadata().creation_date().is_some());

    let spans = source.page_spans(0).unwrap();
    assert_eq!(spans.len(), 4);
    let heading = spans.iter().find(|s| s.text == "NETWORK STRATEGY").unwrap();
    let body = spans.iter().find(|s| s.text == "Configuration:").unwrap();
    assert!(heading.y < body.y);
    assert_eq!(heading.x, 72.0);

    assert!(source.page_spans(1).unwrap().is_empty());
    assert!(source.page_spans(3).is_err());

    source.close();
    assert!(source.is_closed());
    assert!(source.page_spans(0).is_err());
}

#[test]
fn test_convert_file_layout_mode() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_pdf(dir.path());
    let out = dir.path().join("out");

    let result = convert_file(&input, Some(&out), &ConvertOptions::new()).unwrap();

    assert_eq!(result.output_path, out.join("sample-spec.md"));
    assert_eq!(result.page_count, 3);
    assert!(result.review_notes_path.is_none());

    let md = fs::read_to_string(&result.output_path).unwrap();
    assert_eq!(
        md,
        "# Sample Spec\n\n\
         *Converted from PDF: sample_spec.pdf*\n\n\
         *Created: 2025-09-11 20:04:46*\n\n\
         ---\n\n\
         ## Page 1\n\n\
         ## Network Strategy\n\n\
         - Remote access via **DSO** cloud\n\n\
         ### Configuration:\n\n\
         ---\n\n\
         ## Page 3\n\n\
         Plain text paragraph line.\n"
    );
}

#[test]
fn test_convert_file_writes_review_notes() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_pdf(dir.path());

    let options = ConvertOptions::new().with_review_notes(true);
    let result = convert_file(&input, None, &options).unwrap();

    assert_eq!(result.output_path, dir.path().join("sample-spec.md"));
    let notes_path = result.review_notes_path.unwrap();
    assert_eq!(notes_path, dir.path().join("sample-spec-review-notes.md"));

    let notes = fs::read_to_string(notes_path).unwrap();
    assert!(notes.starts_with("# Review Notes for Sample Spec\n"));
    assert!(notes.contains("- 3 pages processed\n"));
    assert!(notes.contains("- Raw conversion: `sample-spec.md`\n"));
}

#[test]
fn test_batch_converts_valid_and_reports_invalid() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(&dir.path().join("b-good.pdf"), &sample_pages());
    fs::write(dir.path().join("a-bad.pdf"), "%PDF-1.4 but nothing else").unwrap();

    let inputs = discover_inputs(dir.path()).unwrap();
    let report = run_batch(&inputs, None, &ConvertOptions::new(), |_, _| {});

    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("a-bad.pdf"));
    assert!(dir.path().join("b-good.md").exists());
}

#[test]
fn test_flipped_page_transform_keeps_reading_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("flipped.pdf");
    let flip = |y: i64| -> Vec<Object> {
        vec![1.into(), 0.into(), 0.into(), (-1).into(), 72.into(), y.into()]
    };
    write_pdf_operations(
        &input,
        vec![vec![
            Operation::new("q", vec![]),
            Operation::new("cm", vec![1.into(), 0.into(), 0.into(), (-1).into(), 0.into(), 842.into()]),
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Tm", flip(100)),
            Operation::new("Tj", vec![Object::string_literal("FIRST LINE HERE")]),
            Operation::new("Tm", flip(200)),
            Operation::new("Tj", vec![Object::string_literal("Second body line text.")]),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ]],
    );

    let result = convert_file(&input, None, &ConvertOptions::new()).unwrap();
    let md = fs::read_to_string(result.output_path).unwrap();

    assert!(md.ends_with("---\n\n## First Line Here\n\nSecond body line text.\n"));
}
