//! # pdfmeta CLI
//!
//! ```bash
//! pdfmeta init                        # create the pdf_metadata table
//! pdfmeta scan ./papers               # harvest every PDF under ./papers
//! pdfmeta scan                        # prompt for the directory
//! pdfmeta scan ./papers --dry-run     # list the PDFs that would be read
//! pdfmeta stats                       # row counts
//! ```
//!
//! Database settings come from `--config` (TOML). Without a config file the
//! tool targets a local Postgres database named `meta`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use pdfmeta::config::{self, Config};
use pdfmeta::error::HarvestError;
use pdfmeta::ingest::{self, ScanOptions};
use pdfmeta::{migrate, stats};

const DEFAULT_CONFIG: &str = "./config/pdfmeta.toml";

/// Harvest PDF document properties and text into a relational table.
#[derive(Parser)]
#[command(name = "pdfmeta", version)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When the default path does not exist, built-in defaults are used.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the `pdf_metadata` table if it does not exist.
    Init,

    /// Walk a directory and store one record per readable PDF.
    Scan {
        /// Root directory. Prompted for on stdin when omitted.
        dir: Option<PathBuf>,

        /// List the PDFs that would be processed without reading or storing them.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of PDFs to process.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show row counts for `pdf_metadata`.
    Stats,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        if let Some(HarvestError::InvalidDirectory(_)) = err.downcast_ref::<HarvestError>() {
            println!("Invalid directory path. Please provide a valid path.");
        }
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = resolve_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_init(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Scan {
            dir,
            dry_run,
            limit,
        } => {
            let dir = match dir {
                Some(dir) => dir,
                None => prompt_directory()?,
            };
            let options = ScanOptions { dry_run, limit };
            ingest::run_scan_command(&cfg, &dir, &options).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}

fn resolve_config(path: &Path) -> Result<Config> {
    if path == Path::new(DEFAULT_CONFIG) && !path.exists() {
        tracing::debug!("no config file at {}, using defaults", DEFAULT_CONFIG);
        return Ok(Config::minimal());
    }
    config::load_config(path)
}

fn prompt_directory() -> Result<PathBuf> {
    print!("Enter the path of the designated directory: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim_end_matches(&['\r', '\n'][..])))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
