//! Storage abstraction for harvested PDF records.
//!
//! The [`MetadataStore`] trait is the seam between the scanner and the
//! relational backend. Postgres is the production target, SQLite serves
//! local runs and tests, and [`memory::MemoryStore`] keeps rows in process.

pub mod memory;
pub mod postgres;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{Backend, Config};
use crate::db;
use crate::error::HarvestError;
use crate::models::PdfRecord;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use sqlite::SqliteStore;

/// Row counts for the `stats` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub records: i64,
    pub distinct_paths: i64,
    pub with_creation_date: i64,
}

/// Destination for [`PdfRecord`]s.
///
/// Every operation reports failure as [`HarvestError::Database`] so the
/// scanner can log it and move on to the next file.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Short backend label for log lines.
    fn backend_name(&self) -> &'static str;

    /// Creates `pdf_metadata` if it does not exist. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<(), HarvestError>;

    /// Ensures the schema, inserts one row, commits, and returns the new id.
    async fn insert(&self, record: &PdfRecord) -> Result<i64, HarvestError>;

    async fn stats(&self) -> Result<StoreStats, HarvestError>;

    /// Releases pooled connections.
    async fn close(&self) {}
}

/// Opens the store selected by `[db].backend`.
pub async fn open(config: &Config) -> Result<Box<dyn MetadataStore>> {
    match config.db.backend {
        Backend::Postgres => Ok(Box::new(PgStore::new(db::connect_postgres(&config.db)))),
        Backend::Sqlite => {
            let path = config
                .db
                .path
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("db.path must be set for the sqlite backend"))?;
            let pool = db::connect_sqlite(path).await?;
            Ok(Box::new(SqliteStore::new(pool)))
        }
    }
}
