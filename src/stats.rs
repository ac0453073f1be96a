//! Row counts for the `pdf_metadata` table, printed by `pdfmeta stats`.

use anyhow::Result;

use crate::config::Config;
use crate::store::{self, MetadataStore, StoreStats};

pub async fn run_stats(config: &Config) -> Result<()> {
    let store = store::open(config).await?;
    let result = collect(store.as_ref()).await;
    store.close().await;
    let stats = result?;

    println!("pdf_metadata ({})", store.backend_name());
    println!("  records: {}", stats.records);
    println!("  distinct paths: {}", stats.distinct_paths);
    println!("  with creation date: {}", stats.with_creation_date);

    Ok(())
}

async fn collect(store: &dyn MetadataStore) -> Result<StoreStats> {
    store.ensure_schema().await?;
    Ok(store.stats().await?)
}
