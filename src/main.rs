//! # Magnolia Loader CLI (`mgnl-load`)
//!
//! Loads one page of content from a Magnolia delivery endpoint and writes the
//! normalized documents as JSON.
//!
//! ## Usage
//!
//! ```bash
//! mgnl-load --config ./config/magnolia.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mgnl-load load` | Fetch and convert documents, print JSON |
//! | `mgnl-load check` | Validate the config and show resolved settings |
//!
//! ## Examples
//!
//! ```bash
//! # Pretty JSON to stdout
//! mgnl-load load
//!
//! # JSON Lines into a file, only documents changed this year
//! mgnl-load load --format jsonl --output out/tours.jsonl --since 2024-01-01
//!
//! # Debug logging
//! RUST_LOG=magnolia_loader=debug mgnl-load load
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use magnolia_loader::config;
use magnolia_loader::export::OutputFormat;
use magnolia_loader::load_cmd::{self, LoadOptions};

/// Magnolia Loader CLI: turn Magnolia delivery content into plain-text documents.
#[derive(Parser)]
#[command(
    name = "mgnl-load",
    about = "Load Magnolia delivery content as plain-text documents",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/magnolia.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the configured endpoint and write documents.
    ///
    /// Date filters apply to each document's `lastModified`; documents
    /// without one are dropped when a filter is given.
    Load {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only keep documents modified on or after this date (YYYY-MM-DD).
        #[arg(long)]
        since: Option<String>,

        /// Only keep documents modified on or before this date (YYYY-MM-DD).
        #[arg(long)]
        until: Option<String>,

        /// Maximum number of documents to write.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Validate the config file and print the resolved settings.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Load {
            format,
            output,
            since,
            until,
            limit,
        } => {
            let opts = LoadOptions {
                format,
                output,
                since,
                until,
                limit,
            };
            load_cmd::run_load(&cfg, opts).await?;
        }
        Commands::Check => {
            load_cmd::run_check(&cfg)?;
        }
    }

    Ok(())
}
