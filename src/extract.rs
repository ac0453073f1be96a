//! PDF document properties and page text.
//!
//! Each file is read and parsed once. Metadata and text are reported as two
//! independent results; the scanner persists a record only when both are `Ok`.

use std::path::Path;

use lopdf::{Dictionary, Document, Object};

use crate::error::HarvestError;
use crate::models::PdfMetadata;
use crate::pdf_date::parse_pdf_date;

/// Outcome of reading one PDF.
#[derive(Debug)]
pub struct PdfExtraction {
    pub metadata: Result<PdfMetadata, HarvestError>,
    pub content: Result<String, HarvestError>,
}

impl PdfExtraction {
    fn failed(err: HarvestError) -> Self {
        Self {
            metadata: Err(err.clone()),
            content: Err(err),
        }
    }
}

pub fn extract_pdf(path: &Path) -> PdfExtraction {
    let doc = match std::fs::read(path)
        .map_err(|e| HarvestError::file_read(path, e))
        .and_then(|bytes| load_document(path, &bytes))
    {
        Ok(doc) => doc,
        Err(e) => return PdfExtraction::failed(e),
    };

    PdfExtraction {
        metadata: extract_metadata(path, &doc),
        content: Ok(extract_content(path, &doc)),
    }
}

fn load_document(path: &Path, bytes: &[u8]) -> Result<Document, HarvestError> {
    let doc = Document::load_mem(bytes).map_err(|e| HarvestError::file_read(path, e))?;
    if doc.is_encrypted() {
        return Err(HarvestError::file_read(path, "document is encrypted"));
    }
    Ok(doc)
}

/// Reads the trailer `/Info` dictionary. A document without one has no properties.
pub fn extract_metadata(path: &Path, doc: &Document) -> Result<PdfMetadata, HarvestError> {
    let info = match info_dictionary(doc) {
        Ok(Some(info)) => info,
        Ok(None) => return Ok(PdfMetadata::default()),
        Err(reason) => return Err(HarvestError::file_read(path, reason)),
    };

    Ok(PdfMetadata {
        title: text_string(doc, info, b"Title"),
        author: text_string(doc, info, b"Author"),
        subject: text_string(doc, info, b"Subject"),
        creator: text_string(doc, info, b"Creator"),
        creation_date: parse_pdf_date(text_string(doc, info, b"CreationDate").as_deref()),
        modification_date: parse_pdf_date(text_string(doc, info, b"ModDate").as_deref()),
    })
}

/// Concatenates page text in page order with no separator.
///
/// A page whose text cannot be extracted contributes nothing.
pub fn extract_content(path: &Path, doc: &Document) -> String {
    let mut content = String::new();
    for page_number in doc.get_pages().into_keys() {
        match doc.extract_text(&[page_number]) {
            Ok(text) => content.push_str(page_text(&text)),
            Err(e) => tracing::warn!(
                path = %path.display(),
                page = page_number,
                error = %e,
                "page text extraction failed"
            ),
        }
    }
    content
}

/// lopdf closes every text object with a line break; the one ending the page
/// is not part of the page's text.
fn page_text(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}

fn info_dictionary(doc: &Document) -> Result<Option<&Dictionary>, String> {
    let info = match doc.trailer.get(b"Info") {
        Ok(obj) => obj,
        Err(_) => return Ok(None),
    };
    match info {
        Object::Reference(id) => doc
            .get_dictionary(*id)
            .map(Some)
            .map_err(|e| format!("unreadable /Info dictionary: {}", e)),
        Object::Dictionary(dict) => Ok(Some(dict)),
        other => Err(format!("/Info is not a dictionary: {:?}", other)),
    }
}

fn text_string(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    let mut value = dict.get(key).ok()?;
    if let Object::Reference(id) = value {
        value = doc.get_object(*id).ok()?;
    }
    match value {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        _ => None,
    }
}

/// Decodes a PDF text string: UTF-16BE or UTF-8 with a byte-order mark,
/// otherwise PDFDocEncoding (read as Latin-1).
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(utf8) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(utf8).into_owned();
    }
    bytes.iter().map(|&b| b as char).collect()
}
