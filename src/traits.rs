//! Extension trait for document loaders.
//!
//! [`DocumentLoader`] is the seam between a content source and whatever
//! consumes its documents (the `mgnl-load` CLI, or an embedding/indexing
//! pipeline in a host application). [`MagnoliaLoader`](crate::loader::MagnoliaLoader)
//! is the built-in implementation.
//!
//! # Example
//!
//! ```rust
//! use anyhow::Result;
//! use async_trait::async_trait;
//! use magnolia_loader::models::Document;
//! use magnolia_loader::traits::DocumentLoader;
//!
//! pub struct FixtureLoader {
//!     documents: Vec<Document>,
//! }
//!
//! #[async_trait]
//! impl DocumentLoader for FixtureLoader {
//!     fn name(&self) -> &str { "fixtures" }
//!     fn description(&self) -> &str { "Serve documents from memory" }
//!
//!     async fn load_documents(&self) -> Result<Vec<Document>> {
//!         Ok(self.documents.clone())
//!     }
//! }
//! ```

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Document;

/// A source that produces normalized documents.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Instance name (for Magnolia, the collection).
    fn name(&self) -> &str;

    /// One-line description of what this loader reads.
    fn description(&self) -> &str;

    /// Loader type identifier. Defaults to `"custom"`.
    fn loader_type(&self) -> &str {
        "custom"
    }

    /// Label used to tag documents from this loader: `"{type}:{name}"`.
    fn source_label(&self) -> String {
        format!("{}:{}", self.loader_type(), self.name())
    }

    /// Load every document this source currently exposes.
    async fn load_documents(&self) -> Result<Vec<Document>>;
}
