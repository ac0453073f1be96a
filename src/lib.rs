//! # pdfmeta
//!
//! Walks a directory tree, reads the document properties and page text of
//! every PDF it finds, and stores one `pdf_metadata` row per readable file.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌────────────┐   ┌─────────────┐
//! │ discover  │──▶│  extract   │──▶│    store    │
//! │ walkdir   │   │ lopdf +    │   │ Postgres /  │
//! │ *.pdf     │   │ pdf_date   │   │ SQLite      │
//! └───────────┘   └────────────┘   └─────────────┘
//! ```
//!
//! Files are processed sequentially. A file that cannot be read or stored is
//! reported and skipped; the scan always runs to the end.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Metadata, record and report types |
//! | [`error`] | Error kinds |
//! | [`pdf_date`] | PDF date string conversion |
//! | [`extract`] | Document properties and page text |
//! | [`discover`] | PDF file discovery |
//! | [`ingest`] | Scan orchestration |
//! | [`store`] | Storage trait and backends |
//! | [`db`] | Connection pools |
//! | [`migrate`] | Table definitions |
//! | [`stats`] | Row counts |

pub mod config;
pub mod db;
pub mod discover;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod migrate;
pub mod models;
pub mod pdf_date;
pub mod stats;
pub mod store;
