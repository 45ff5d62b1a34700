//! Per-page text runs from PDF content streams

use std::collections::{BTreeMap, HashMap};

use encoding_rs::{UTF_16BE, WINDOWS_1252};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use thiserror::Error;

use super::cmap::ToUnicodeCMap;

/// Inserted between adjacent text runs when building page text
pub const RUN_SEPARATOR: &str = " ";

/// TJ adjustments at or below this (thousandths of an em) are word gaps
const WORD_GAP_THRESHOLD: f64 = -200.0;

/// Bound on reference chains and Resources inheritance walks
const MAX_RESOLVE_DEPTH: usize = 32;

/// PDF text extraction errors
#[derive(Error, Debug)]
pub enum PdfTextError {
    #[error("Failed to load PDF: {0}")]
    LoadError(String),
    #[error("Page {0} not found (document has {1} pages)")]
    PageNotFound(u32, u32),
    #[error("Failed to read content of page {page}: {reason}")]
    ContentError { page: u32, reason: String },
}

/// Page-addressable text
///
/// Pages are numbered from 1 to `page_count()` inclusive.
pub trait PageText {
    type Error: std::fmt::Display;

    fn page_count(&self) -> u32;

    /// All text on the page, runs joined with [`RUN_SEPARATOR`]
    fn page_text(&self, page_number: u32) -> Result<String, Self::Error>;
}

/// A decoded PDF document that yields text per page
pub struct PdfTextSource {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfTextSource {
    /// Parse a PDF held in memory
    pub fn load(bytes: &[u8]) -> Result<Self, PdfTextError> {
        let document =
            Document::load_mem(bytes).map_err(|e| PdfTextError::LoadError(e.to_string()))?;
        let pages = document.get_pages();
        Ok(Self { document, pages })
    }

    /// Text runs of a page in content stream order.
    ///
    /// Consecutive `Tj` and `TJ` operators that continue at the current
    /// text position form one run. A run ends when the text position is set
    /// (`Td`, `TD`, `Tm`, `T*`, `'`, `"`), the font changes, or the text
    /// object ends. Runs that decode to nothing are dropped.
    pub fn page_runs(&self, page_number: u32) -> Result<Vec<String>, PdfTextError> {
        let page_id = *self
            .pages
            .get(&page_number)
            .ok_or(PdfTextError::PageNotFound(page_number, self.page_count()))?;

        let content_error = |reason: String| PdfTextError::ContentError {
            page: page_number,
            reason,
        };
        let data = self
            .document
            .get_page_content(page_id)
            .map_err(|e| content_error(e.to_string()))?;
        let content = Content::decode(&data).map_err(|e| content_error(e.to_string()))?;

        let fonts = self.page_fonts(page_id);
        let mut font: Option<&FontDecoder> = None;
        let mut runs = Vec::new();
        let mut run = String::new();

        for op in &content.operations {
            match op.operator.as_str() {
                "Tf" => {
                    end_run(&mut runs, &mut run);
                    font = match op.operands.first() {
                        Some(Object::Name(name)) => fonts.get(name.as_slice()),
                        _ => None,
                    };
                }
                "BT" | "ET" | "Td" | "TD" | "Tm" | "T*" => end_run(&mut runs, &mut run),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        run.push_str(&decode_string(font, bytes));
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        push_array(&mut run, font, items);
                    }
                }
                // next line, then show
                "'" | "\"" => {
                    end_run(&mut runs, &mut run);
                    if let Some(Object::String(bytes, _)) = op.operands.last() {
                        run.push_str(&decode_string(font, bytes));
                    }
                }
                _ => {}
            }
        }
        end_run(&mut runs, &mut run);

        tracing::trace!(page = page_number, runs = runs.len(), "Extracted text runs");
        Ok(runs)
    }

    fn page_fonts(&self, page_id: ObjectId) -> HashMap<Vec<u8>, FontDecoder> {
        let mut fonts = HashMap::new();

        let Some(resources) = self.page_resources(page_id) else {
            return fonts;
        };
        let Some(font_dict) = resources
            .get(b"Font")
            .ok()
            .and_then(|object| self.resolve_dict(object))
        else {
            return fonts;
        };

        for (name, font) in font_dict.iter() {
            if let Some(font) = self.resolve_dict(font) {
                fonts.insert(name.clone(), FontDecoder::from_font(&self.document, font));
            }
        }
        fonts
    }

    /// Page Resources, inherited from ancestor Pages nodes when absent
    fn page_resources(&self, page_id: ObjectId) -> Option<&Dictionary> {
        let mut node = self.document.get_object(page_id).ok()?.as_dict().ok()?;

        for _ in 0..MAX_RESOLVE_DEPTH {
            if let Ok(resources) = node.get(b"Resources") {
                return self.resolve_dict(resources);
            }
            node = match node.get(b"Parent") {
                Ok(Object::Reference(parent)) => {
                    self.document.get_object(*parent).ok()?.as_dict().ok()?
                }
                _ => return None,
            };
        }
        None
    }

    fn resolve_dict<'a>(&'a self, object: &'a Object) -> Option<&'a Dictionary> {
        resolve(&self.document, object)?.as_dict().ok()
    }
}

impl PageText for PdfTextSource {
    type Error = PdfTextError;

    fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    fn page_text(&self, page_number: u32) -> Result<String, PdfTextError> {
        Ok(self.page_runs(page_number)?.join(RUN_SEPARATOR))
    }
}

/// How string operands shown with one font turn into text
struct FontDecoder {
    to_unicode: Option<ToUnicodeCMap>,
    composite: bool,
}

impl FontDecoder {
    fn from_font(document: &Document, font: &Dictionary) -> Self {
        let composite = matches!(
            font.get(b"Subtype"),
            Ok(Object::Name(subtype)) if subtype.as_slice() == b"Type0"
        );
        let default_code_len = if composite { 2 } else { 1 };

        let to_unicode = font
            .get(b"ToUnicode")
            .ok()
            .and_then(|object| resolve(document, object))
            .and_then(|object| object.as_stream().ok())
            .and_then(stream_bytes)
            .map(|data| ToUnicodeCMap::parse(&data, default_code_len))
            .filter(|cmap| {
                tracing::trace!(
                    codes = cmap.len(),
                    code_len = cmap.code_len(),
                    "Parsed ToUnicode map"
                );
                !cmap.is_empty()
            });

        Self {
            to_unicode,
            composite,
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        if let Some(cmap) = &self.to_unicode {
            return cmap.decode(bytes);
        }
        // glyph ids without a ToUnicode map carry no recoverable text
        if self.composite && !bytes.starts_with(&[0xFE, 0xFF]) {
            return String::new();
        }
        decode_plain(bytes)
    }
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    let mut current = object;
    for _ in 0..MAX_RESOLVE_DEPTH {
        match current {
            Object::Reference(id) => current = document.get_object(*id).ok()?,
            other => return Some(other),
        }
    }
    None
}

fn stream_bytes(stream: &Stream) -> Option<Vec<u8>> {
    if stream.dict.get(b"Filter").is_ok() {
        stream.decompressed_content().ok()
    } else {
        Some(stream.content.clone())
    }
}

/// UTF-16BE when the string carries a byte order mark, Windows-1252 otherwise
fn decode_plain(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => UTF_16BE.decode_without_bom_handling(rest).0.into_owned(),
        _ => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
    }
}

fn decode_string(font: Option<&FontDecoder>, bytes: &[u8]) -> String {
    match font {
        Some(font) => font.decode(bytes),
        None => decode_plain(bytes),
    }
}

fn push_array(run: &mut String, font: Option<&FontDecoder>, items: &[Object]) {
    for item in items {
        match item {
            Object::String(bytes, _) => run.push_str(&decode_string(font, bytes)),
            Object::Integer(adjustment) => push_word_gap(run, *adjustment as f64),
            Object::Real(adjustment) => push_word_gap(run, f64::from(*adjustment)),
            _ => {}
        }
    }
}

fn end_run(runs: &mut Vec<String>, run: &mut String) {
    if !run.is_empty() {
        runs.push(std::mem::take(run));
    }
}

fn push_word_gap(run: &mut String, adjustment: f64) {
    if adjustment <= WORD_GAP_THRESHOLD && !run.is_empty() && !run.ends_with(' ') {
        run.push(' ');
    }
}
