//! `mgnl-load load` and `mgnl-load check` commands.
//!
//! `load` runs the loader once, then applies optional post-load filters
//! before writing the documents out. Filters never change what is fetched;
//! the endpoint is always read in full (one page).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::config::Config;
use crate::export::{write_documents, OutputFormat};
use crate::loader::MagnoliaLoader;
use crate::models::Document;
use crate::traits::DocumentLoader;

/// Options for [`run_load`], mirroring the CLI flags.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    /// Keep documents modified on or after this date (YYYY-MM-DD).
    pub since: Option<String>,
    /// Keep documents modified on or before this date (YYYY-MM-DD).
    pub until: Option<String>,
    pub limit: Option<usize>,
}

pub async fn run_load(config: &Config, opts: LoadOptions) -> Result<()> {
    let loader_config = config.loader_config()?;
    let loader = MagnoliaLoader::new(loader_config)?;

    let documents = load_filtered(&loader, &opts).await?;
    write_documents(&documents, opts.format, opts.output.as_deref())
}

/// Load through any [`DocumentLoader`] and apply the date/limit filters.
pub async fn load_filtered(loader: &dyn DocumentLoader, opts: &LoadOptions) -> Result<Vec<Document>> {
    let documents = loader
        .load_documents()
        .await
        .with_context(|| format!("Failed to load {}", loader.source_label()))?;

    filter_documents(documents, opts.since.as_deref(), opts.until.as_deref(), opts.limit)
}

/// Apply `--since` / `--until` on `lastModified`, then `--limit`.
///
/// When a date bound is given, documents without a parsable `lastModified`
/// are dropped.
pub fn filter_documents(
    mut documents: Vec<Document>,
    since: Option<&str>,
    until: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<Document>> {
    if let Some(since_str) = since {
        let since_date = NaiveDate::parse_from_str(since_str, "%Y-%m-%d")
            .with_context(|| format!("Invalid --since date: '{}'", since_str))?;
        let since_ts = since_date
            .and_hms_opt(0, 0, 0)
            .context("invalid start of day")?
            .and_utc();
        documents.retain(|doc| doc.last_modified_at().is_some_and(|ts| ts >= since_ts));
    }

    if let Some(until_str) = until {
        let until_date = NaiveDate::parse_from_str(until_str, "%Y-%m-%d")
            .with_context(|| format!("Invalid --until date: '{}'", until_str))?;
        let until_ts = until_date
            .and_hms_opt(23, 59, 59)
            .context("invalid end of day")?
            .and_utc();
        documents.retain(|doc| doc.last_modified_at().is_some_and(|ts| ts <= until_ts));
    }

    if let Some(lim) = limit {
        documents.truncate(lim);
    }

    Ok(documents)
}

/// Validate the config and print the resolved settings.
pub fn run_check(config: &Config) -> Result<()> {
    let loader_config = config.loader_config()?;

    println!("{:<18} {}", "collection", loader_config.collection());
    println!("{:<18} {}", "endpoint", loader_config.base_url());
    println!("{:<18} {}", "content property", loader_config.content_property());
    match loader_config.credentials() {
        Some(creds) => println!(
            "{:<18} {:?} (user: {})",
            "auth",
            loader_config.auth_scheme(),
            creds.username()
        ),
        None => println!("{:<18} none", "auth"),
    }
    if let Some(timeout) = loader_config.timeout() {
        println!("{:<18} {}s", "timeout", timeout.as_secs());
    }

    Ok(())
}
