//! Postgres-backed [`MetadataStore`].

use async_trait::async_trait;
use sqlx::PgPool;

use super::{MetadataStore, StoreStats};
use crate::error::HarvestError;
use crate::migrate::POSTGRES_SCHEMA;
use crate::models::PdfRecord;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ensure_schema(&self) -> Result<(), HarvestError> {
        sqlx::query(POSTGRES_SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, record: &PdfRecord) -> Result<i64, HarvestError> {
        self.ensure_schema().await?;

        let meta = &record.metadata;
        let mut tx = self.pool.begin().await?;
        // SERIAL ids decode as INT4
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO pdf_metadata
                (path, title, author, subject, creator, creation_date, modification_date, content)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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

        Ok(i64::from(id))
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
