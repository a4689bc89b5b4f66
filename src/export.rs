//! Write loaded documents as JSON.
//!
//! Produces either a pretty-printed JSON array or JSON Lines (one document per
//! line, handy for piping into an indexer).

use anyhow::Result;
use clap::ValueEnum;
use std::path::Path;

use crate::models::Document;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// One JSON object per line.
    Jsonl,
}

pub fn render(documents: &[Document], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(documents)?),
        OutputFormat::Jsonl => {
            let mut out = String::new();
            for doc in documents {
                out.push_str(&serde_json::to_string(doc)?);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Write documents to `output`, or stdout when `None`.
pub fn write_documents(
    documents: &[Document],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = render(documents, format)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &rendered)?;
            eprintln!("Wrote {} documents to {}", documents.len(), path.display());
        }
        None => {
            print!("{}", rendered);
            if format == OutputFormat::Json {
                println!();
            }
        }
    }

    Ok(())
}
