use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable consulted when `[db].password` is not set.
pub const PASSWORD_ENV: &str = "PDFMETA_DB_PASSWORD";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Postgres,
    Sqlite,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
    /// SQLite database file; required when `backend = "sqlite"`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Upper bound on waiting for a connection before an insert fails.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: None,
            path: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    5432
}
fn default_database() -> String {
    "meta".to_string()
}
fn default_user() -> String {
    "postgres".to_string()
}
fn default_connect_timeout_secs() -> u64 {
    5
}

impl DbConfig {
    /// Password from the config file, else from [`PASSWORD_ENV`], else empty.
    pub fn resolved_password(&self) -> String {
        self.password
            .clone()
            .or_else(|| std::env::var(PASSWORD_ENV).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScanConfig {
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Config {
    /// All-defaults configuration: local Postgres, no extra excludes.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.db.port == 0 {
        bail!("db.port must be > 0");
    }

    if config.db.connect_timeout_secs == 0 {
        bail!("db.connect_timeout_secs must be > 0");
    }

    if config.db.backend == Backend::Sqlite && config.db.path.is_none() {
        bail!("db.path must be set when db.backend is 'sqlite'");
    }

    for pattern in &config.scan.exclude_globs {
        globset::Glob::new(pattern)
            .with_context(|| format!("Invalid scan.exclude_globs pattern: '{}'", pattern))?;
    }

    Ok(())
}
