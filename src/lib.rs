//! # Magnolia Loader
//!
//! Fetches content nodes from a Magnolia headless-CMS delivery endpoint and
//! turns each one into a plain-text [`Document`](models::Document) with a fixed
//! metadata projection, ready for downstream indexing or embedding.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Magnolia   │──▶│   Fetcher    │──▶│ Transformer  │──▶ Vec<Document>
//! │ Delivery API │   │ one GET/JSON │   │ HTML → text  │
//! └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use magnolia_loader::config::LoaderConfig;
//! use magnolia_loader::loader::MagnoliaLoader;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = LoaderConfig::new(
//!     "tours",
//!     "http://your-magnolia-cms/.rest/delivery/tours/v1",
//!     "body",
//! )?;
//! let loader = MagnoliaLoader::new(config)?;
//! for doc in loader.load().await? {
//!     println!("{} {}", doc.metadata.url, doc.page_content.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and validated loader settings |
//! | [`models`] | Delivery envelope, content records, documents |
//! | [`fetch`] | Delivery endpoint client |
//! | [`transform`] | Record → document conversion, HTML → text |
//! | [`loader`] | The Magnolia loader |
//! | [`traits`] | `DocumentLoader` extension trait |
//! | [`export`] | JSON / JSON Lines output |
//! | [`load_cmd`] | CLI command implementations |

pub mod config;
pub mod export;
pub mod fetch;
pub mod load_cmd;
pub mod loader;
pub mod models;
pub mod traits;
pub mod transform;
