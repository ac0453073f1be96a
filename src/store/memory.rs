//! In-memory [`MetadataStore`] for tests and embedding the scanner without a database.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{MetadataStore, StoreStats};
use crate::error::HarvestError;
use crate::models::{PdfRecord, StoredRecord};

#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<StoredRecord>>,
    schema_checks: RwLock<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row in insertion order.
    pub fn records(&self) -> Vec<StoredRecord> {
        self.rows.read().map(|rows| rows.clone()).unwrap_or_default()
    }

    /// Number of times [`MetadataStore::ensure_schema`] ran.
    pub fn schema_checks(&self) -> u64 {
        self.schema_checks.read().map(|n| *n).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> HarvestError {
    HarvestError::Database("memory store lock poisoned".to_string())
}

#[async_trait]
impl MetadataStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ensure_schema(&self) -> Result<(), HarvestError> {
        *self.schema_checks.write().map_err(poisoned)? += 1;
        Ok(())
    }

    async fn insert(&self, record: &PdfRecord) -> Result<i64, HarvestError> {
        self.ensure_schema().await?;
        let mut rows = self.rows.write().map_err(poisoned)?;
        let id = rows.last().map(|r| r.id + 1).unwrap_or(1);
        rows.push(StoredRecord {
            id,
            record: record.clone(),
        });
        Ok(id)
    }

    async fn stats(&self) -> Result<StoreStats, HarvestError> {
        let rows = self.rows.read().map_err(poisoned)?;
        let paths: HashSet<&str> = rows.iter().map(|r| r.record.path.as_str()).collect();
        Ok(StoreStats {
            records: rows.len() as i64,
            distinct_paths: paths.len() as i64,
            with_creation_date: rows
                .iter()
                .filter(|r| r.record.metadata.creation_date.is_some())
                .count() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PdfMetadata;

    #[tokio::test]
    async fn ids_start_at_one_and_duplicates_are_kept() {
        let store = MemoryStore::new();
        let record = PdfRecord::new("a.pdf", PdfMetadata::default(), String::new());
        assert_eq!(store.insert(&record).await.unwrap(), 1);
        assert_eq!(store.insert(&record).await.unwrap(), 2);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.records, 2);
        assert_eq!(stats.distinct_paths, 1);
        assert_eq!(stats.with_creation_date, 0);
        assert_eq!(store.schema_checks(), 2);
    }
}
