//! Data types that flow from extraction into the store.

use chrono::NaiveDateTime;

/// Document properties read from a PDF's `/Info` dictionary.
///
/// Any field may be absent; dates are already normalized to UTC.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
    pub modification_date: Option<NaiveDateTime>,
}

/// One row of `pdf_metadata`, before the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfRecord {
    pub path: String,
    pub metadata: PdfMetadata,
    pub content: String,
}

impl PdfRecord {
    pub fn new(path: impl Into<String>, metadata: PdfMetadata, content: String) -> Self {
        Self {
            path: path.into(),
            metadata,
            content,
        }
    }
}

/// A persisted record together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: i64,
    pub record: PdfRecord,
}

/// Counters reported at the end of a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// PDF files discovered under the root.
    pub files_found: u64,
    /// Records written to the store.
    pub records_saved: u64,
    /// Files skipped because metadata or text extraction failed.
    pub extraction_failed: u64,
    /// Files whose insert failed.
    pub store_failed: u64,
}
