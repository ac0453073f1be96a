//! `pdf_metadata` table definitions and the `init` command.

use anyhow::Result;

use crate::config::Config;
use crate::store;

/// Postgres DDL. `SERIAL` keeps compatibility with tables created by earlier tooling.
pub const POSTGRES_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS pdf_metadata (
        id SERIAL PRIMARY KEY,
        path TEXT,
        title TEXT,
        author TEXT,
        subject TEXT,
        creator TEXT,
        creation_date TIMESTAMP,
        modification_date TIMESTAMP,
        content TEXT
    )
"#;

pub const SQLITE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS pdf_metadata (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        path TEXT,
        title TEXT,
        author TEXT,
        subject TEXT,
        creator TEXT,
        creation_date TIMESTAMP,
        modification_date TIMESTAMP,
        content TEXT
    )
"#;

/// Creates `pdf_metadata` in the configured store if it is missing.
pub async fn run_init(config: &Config) -> Result<()> {
    let store = store::open(config).await?;
    store.ensure_schema().await?;
    store.close().await;
    Ok(())
}
