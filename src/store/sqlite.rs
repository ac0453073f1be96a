//! SQLite-backed [`MetadataStore`].

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{MetadataStore, StoreStats};
use crate::error::HarvestError;
use crate::migrate::SQLITE_SCHEMA;
use crate::models::PdfRecord;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn ensure_schema(&self) -> Result<(), HarvestError> {
        sqlx::query(SQLITE_SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, record: &PdfRecord) -> Result<i64, HarvestError> {
        self.ensure_schema().await?;

        let meta = &record.metadata;
        let mut tx = self.pool.begin().await?;
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO pdf_metadata
                (path, title, author, subject, creator, creation_date, modification_date, content)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&record.path)
        .bind(&meta.title)
        .bind(&meta.author)
        .bind(&meta.subject)
        .bind(&meta.creator)
        .bind(meta.creation_date)
        .bind(meta.modification_date)
        .bind(&record.content)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(id)
    }

    async fn stats(&self) -> Result<StoreStats, HarvestError> {
        let (records, distinct_paths, with_creation_date): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(DISTINCT path), COUNT(creation_date) FROM pdf_metadata",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(StoreStats {
            records,
            distinct_paths,
            with_creation_date,
        })
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
