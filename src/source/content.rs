//! Positioned text extraction from page content streams.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::{SpanFlags, TextSpan};

/// Default page height (US Letter) when no MediaBox can be found.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// TJ adjustments larger than this (thousandths of an em) read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Fraction of the font size above the baseline taken as the top edge.
const ASCENT_RATIO: f32 = 0.8;

/// Extract positioned spans from a page.
///
/// Span `y` values are converted to top edges measured from the top of the
/// page so that smaller values come first in reading order.
pub(crate) fn extract_spans(doc: &Document, page_id: ObjectId) -> Result<Vec<TextSpan>> {
    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::TextExtract(e.to_string()))?;
    let data = page_content(doc, page_id)?;
    let content = Content::decode(&data).map_err(|e| Error::TextExtract(e.to_string()))?;

    let mut extractor = SpanExtractor::new(doc, &fonts, page_height(doc, page_id));
    for op in &content.operations {
        extractor.apply(&op.operator, &op.operands);
    }

    Ok(extractor.spans)
}

/// Concatenated content streams of a page. A page without contents is empty.
fn page_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let page = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::TextExtract(e.to_string()))?;

    let contents = match page.get(b"Contents") {
        Ok(contents) => contents,
        Err(_) => return Ok(Vec::new()),
    };

    let refs: Vec<ObjectId> = match contents {
        Object::Reference(id) => vec![*id],
        Object::Array(items) => items.iter().filter_map(|o| o.as_reference().ok()).collect(),
        _ => return Err(Error::TextExtract("invalid content stream".to_string())),
    };

    let mut data = Vec::new();
    for id in refs {
        if let Ok(Object::Stream(stream)) = doc.get_object(id) {
            let bytes = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            data.extend_from_slice(&bytes);
            data.push(b' ');
        }
    }
    Ok(data)
}

/// Height of a page from its (possibly inherited) MediaBox.
pub(crate) fn page_height(doc: &Document, page_id: ObjectId) -> f32 {
    let mut current = doc.get_dictionary(page_id).ok();
    // guard against cyclic Parent links
    for _ in 0..32 {
        let Some(dict) = current else { break };
        if let Ok(media_box) = dict.get(b"MediaBox").and_then(Object::as_array) {
            if media_box.len() >= 4 {
                let bottom = number(&media_box[1]).unwrap_or(0.0);
                let top = number(&media_box[3]).unwrap_or(DEFAULT_PAGE_HEIGHT);
                return (top - bottom).abs();
            }
        }
        current = dict
            .get(b"Parent")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
            .ok();
    }
    DEFAULT_PAGE_HEIGHT
}

struct SpanExtractor<'a> {
    doc: &'a Document,
    fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
    page_height: f32,
    ctm: Matrix,
    saved_ctm: Vec<Matrix>,
    state: TextState,
    spans: Vec<TextSpan>,
}

impl<'a> SpanExtractor<'a> {
    fn new(doc: &'a Document, fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>, page_height: f32) -> Self {
        Self {
            doc,
            fonts,
            page_height,
            ctm: Matrix::default(),
            saved_ctm: Vec::new(),
            state: TextState::default(),
            spans: Vec::new(),
        }
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            "q" => self.saved_ctm.push(self.ctm),
            "Q" => {
                if let Some(saved) = self.saved_ctm.pop() {
                    self.ctm = saved;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.ctm = m.multiply(&self.ctm);
                }
            }
            "BT" => {
                self.state.in_text = true;
                self.state.matrix = Matrix::default();
            }
            "ET" => self.state.in_text = false,
            "Tf" => {
                if operands.len() >= 2 {
                    if let Object::Name(key) = &operands[0] {
                        self.state.flags = SpanFlags::from_font_name(&self.base_font(key));
                        self.state.font_key = key.clone();
                    }
                    self.state.font_size = number(&operands[1]).unwrap_or(12.0);
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    self.state.leading = leading;
                }
            }
            "Td" | "TD" => {
                if operands.len() >= 2 {
                    let tx = number(&operands[0]).unwrap_or(0.0);
                    let ty = number(&operands[1]).unwrap_or(0.0);
                    if operator == "TD" {
                        self.state.leading = -ty;
                    }
                    self.state.matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.state.matrix = m;
                }
            }
            "T*" => self.state.matrix.next_line(self.state.leading),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode(bytes);
                    self.push(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.decode_array(items);
                    self.push(text);
                }
            }
            "'" | "\"" => {
                self.state.matrix.next_line(self.state.leading);
                let index = if operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(index) {
                    let text = self.decode(bytes);
                    self.push(text);
                }
            }
            _ => {}
        }
    }

    fn base_font(&self, key: &[u8]) -> String {
        self.fonts
            .get(key)
            .and_then(|font| font.get(b"BaseFont").ok())
            .and_then(|name| name.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .unwrap_or_else(|| String::from_utf8_lossy(key).into_owned())
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(&self.state.font_key)
            .and_then(|font| font.get_font_encoding(self.doc).ok());
        match encoding {
            Some(ref enc) => {
                Document::decode_text(enc, bytes).unwrap_or_else(|_| decode_text_simple(bytes))
            }
            None => decode_text_simple(bytes),
        }
    }

    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                Object::Integer(_) | Object::Real(_) => {
                    let adjustment = -number(item).unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(char::is_whitespace)
                    {
                        combined.push(' ');
                    }
                }
                _ => {}
            }
        }
        combined
    }

    fn push(&mut self, text: String) {
        if !self.state.in_text || text.trim().is_empty() {
            return;
        }
        let device = self.state.matrix.multiply(&self.ctm);
        let (x, baseline) = device.position();
        let size = self.state.font_size * device.scale();
        let top = self.page_height - (baseline + size * ASCENT_RATIO);
        self.spans
            .push(TextSpan::new(text, x, top, size).with_flags(self.state.flags));
    }
}

#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    matrix: Matrix,
    font_key: Vec<u8>,
    font_size: f32,
    leading: f32,
    flags: SpanFlags,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            matrix: Matrix::default(),
            font_key: Vec::new(),
            font_size: 12.0,
            leading: 12.0,
            flags: SpanFlags::empty(),
        }
    }
}

/// Affine matrix `[a b c d e f]`, used for both the text matrix and the CTM.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl Matrix {
    fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        let v: Vec<f32> = operands[..6].iter().map(|o| number(o).unwrap_or(0.0)).collect();
        Some(Self::new(v[0], v[1], v[2], v[3], v[4], v[5]))
    }

    /// `self × other`, so `self` is applied first.
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decode string bytes without a font encoding: UTF-16BE with BOM, then
/// UTF-8, then Latin-1.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
