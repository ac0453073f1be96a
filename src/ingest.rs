//! Scan orchestration.
//!
//! Walks the root, extracts each PDF, and inserts one record per file whose
//! metadata and text were both read. Files are handled one at a time; a
//! failure on one file is reported and the scan moves on.

use anyhow::Result;
use std::path::Path;

use crate::config::{Config, ScanConfig};
use crate::discover;
use crate::error::HarvestError;
use crate::extract;
use crate::models::{PdfRecord, ScanReport};
use crate::store::{self, MemoryStore, MetadataStore};

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// List candidate files without extracting or persisting.
    pub dry_run: bool,
    /// Maximum number of PDFs to process.
    pub limit: Option<usize>,
}

/// Entry point for `pdfmeta scan`.
pub async fn run_scan_command(config: &Config, root: &Path, options: &ScanOptions) -> Result<()> {
    if !root.is_dir() {
        return Err(HarvestError::InvalidDirectory(root.to_path_buf()).into());
    }

    let store: Box<dyn MetadataStore> = if options.dry_run {
        Box::new(MemoryStore::new())
    } else {
        store::open(config).await?
    };
    let result = run_scan(root, &config.scan, store.as_ref(), options).await;
    store.close().await;
    let report = result?;

    if options.dry_run {
        println!("scan {} (dry-run)", root.display());
    } else {
        println!("scan {}", root.display());
    }
    println!("  pdf files found: {}", report.files_found);
    if !options.dry_run {
        println!("  records saved: {}", report.records_saved);
        println!("  extraction failed: {}", report.extraction_failed);
        println!("  database failed: {}", report.store_failed);
    }
    println!("ok");

    Ok(())
}

/// Scans `root` and persists every fully extracted PDF into `store`.
///
/// Only an invalid root or a failure to set up the walk is returned as an
/// error; everything that goes wrong for a single file is counted in the
/// report instead.
pub async fn run_scan(
    root: &Path,
    scan: &ScanConfig,
    store: &dyn MetadataStore,
    options: &ScanOptions,
) -> Result<ScanReport> {
    if !root.is_dir() {
        return Err(HarvestError::InvalidDirectory(root.to_path_buf()).into());
    }

    let mut pdfs = discover::find_pdfs(root, scan)?;
    if let Some(limit) = options.limit {
        pdfs.truncate(limit);
    }

    let mut report = ScanReport {
        files_found: pdfs.len() as u64,
        ..ScanReport::default()
    };

    tracing::info!(
        root = %root.display(),
        backend = store.backend_name(),
        files = pdfs.len(),
        dry_run = options.dry_run,
        "scan started"
    );

    if options.dry_run {
        for path in &pdfs {
            println!("  {}", path.display());
        }
        return Ok(report);
    }

    for path in &pdfs {
        let path_str = path.to_string_lossy().to_string();
        let extraction = extract::extract_pdf(path);

        let record = match (extraction.content, extraction.metadata) {
            (Ok(content), Ok(metadata)) => PdfRecord::new(path_str.as_str(), metadata, content),
            (content, metadata) => {
                if let Err(e) = content {
                    println!("Error extracting text from {}: {}", path_str, e);
                }
                if let Err(e) = metadata {
                    println!("Error extracting metadata from {}: {}", path_str, e);
                }
                report.extraction_failed += 1;
                continue;
            }
        };

        println!("Processing {}...", path_str);
        match store.insert(&record).await {
            Ok(id) => {
                println!("Data with ID {} saved to database.", id);
                report.records_saved += 1;
            }
            Err(e) => {
                println!("Error saving {} to database: {}", path_str, e);
                report.store_failed += 1;
            }
        }
    }

    tracing::info!(
        saved = report.records_saved,
        extraction_failed = report.extraction_failed,
        store_failed = report.store_failed,
        "scan finished"
    );

    Ok(report)
}
