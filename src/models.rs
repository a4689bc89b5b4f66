//! Core data models used throughout the loader.
//!
//! These types represent the raw delivery payload coming from Magnolia and the
//! normalized documents handed to downstream indexing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw content node from the delivery endpoint.
///
/// Magnolia guarantees the `@name`, `@path`, `@id` and `@nodeType` system
/// fields; everything else is author-defined and looked up by key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ContentRecord(Map<String, Value>);

impl ContentRecord {
    pub const ID: &'static str = "@id";
    pub const PATH: &'static str = "@path";
    pub const NAME: &'static str = "@name";
    pub const NODE_TYPE: &'static str = "@nodeType";
    pub const LAST_MODIFIED_BY: &'static str = "mgnl:lastModifiedBy";
    pub const LAST_MODIFIED: &'static str = "mgnl:lastModified";

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, or `None` if absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> &str {
        self.get_str(Self::ID).unwrap_or_default()
    }

    pub fn path(&self) -> &str {
        self.get_str(Self::PATH).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.get_str(Self::NAME).unwrap_or_default()
    }

    pub fn node_type(&self) -> &str {
        self.get_str(Self::NODE_TYPE).unwrap_or_default()
    }

    pub fn last_modified_by(&self) -> Option<&str> {
        self.get_str(Self::LAST_MODIFIED_BY)
    }

    pub fn last_modified(&self) -> Option<&str> {
        self.get_str(Self::LAST_MODIFIED)
    }
}

impl From<Map<String, Value>> for ContentRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Envelope returned by a delivery endpoint.
///
/// Only `results` is required; Magnolia omits `offset` and `limit` on some
/// endpoint configurations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeliveryResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
    pub results: Vec<ContentRecord>,
}

/// Normalized document: plain-text body plus a fixed metadata projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub id: String,
    pub path: String,
    pub name: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    pub url: String,
    pub collection: String,
}

impl Document {
    /// `lastModified` parsed as an RFC 3339 timestamp.
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.metadata
            .last_modified
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}
