//! Magnolia content loader.
//!
//! [`MagnoliaLoader::load`] is the single entry point: one fetch against the
//! configured endpoint, then one [`Document`] per record, in delivery order.
//! A failed fetch yields no documents at all.

use async_trait::async_trait;
use tracing::info;

use crate::config::LoaderConfig;
use crate::fetch::{ClientBuildError, DeliveryClient, FetchError, HttpDeliveryClient};
use crate::models::Document;
use crate::traits::DocumentLoader;
use crate::transform::to_document;

pub struct MagnoliaLoader {
    config: LoaderConfig,
    client: Box<dyn DeliveryClient>,
}

impl MagnoliaLoader {
    /// Create a loader backed by [`HttpDeliveryClient`].
    pub fn new(config: LoaderConfig) -> Result<Self, ClientBuildError> {
        let client = HttpDeliveryClient::new(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a loader that fetches through `client`.
    pub fn with_client(config: LoaderConfig, client: impl DeliveryClient + 'static) -> Self {
        Self {
            config,
            client: Box::new(client),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Fetch the configured endpoint and convert every record.
    pub async fn load(&self) -> Result<Vec<Document>, FetchError> {
        let response = self.client.fetch(self.config.base_url()).await?;

        let documents: Vec<Document> = response
            .results
            .iter()
            .map(|record| to_document(record, &self.config))
            .collect();

        info!(
            collection = self.config.collection(),
            documents = documents.len(),
            "loaded Magnolia documents"
        );

        Ok(documents)
    }
}

#[async_trait]
impl DocumentLoader for MagnoliaLoader {
    fn name(&self) -> &str {
        self.config.collection()
    }

    fn description(&self) -> &str {
        "Load content nodes from a Magnolia delivery endpoint"
    }

    fn loader_type(&self) -> &str {
        "magnolia"
    }

    async fn load_documents(&self) -> anyhow::Result<Vec<Document>> {
        Ok(self.load().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentRecord, DeliveryResponse};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const BASE_URL: &str = "http://your-magnolia-cms/.rest/delivery/tours/v1";

    /// Returns a canned envelope (or an error) and counts calls.
    struct StubClient {
        response: Option<DeliveryResponse>,
        calls: Arc<AtomicUsize>,
        urls: Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl StubClient {
        fn ok(response: DeliveryResponse) -> Self {
            Self {
                response: Some(response),
                calls: Arc::new(AtomicUsize::new(0)),
                urls: Arc::new(std::sync::Mutex::new(Vec::new())),
            }
        }

        fn failing() -> Self {
            Self {
                response: None,
                calls: Arc::new(AtomicUsize::new(0)),
                urls: Arc::new(std::sync::Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl DeliveryClient for StubClient {
        async fn fetch(&self, url: &str) -> Result<DeliveryResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());
            match &self.response {
                Some(r) => Ok(r.clone()),
                None => Err(FetchError::new(url, "HTTP 503 Service Unavailable")),
            }
        }
    }

    fn config() -> LoaderConfig {
        LoaderConfig::new("tours", BASE_URL, "body").unwrap()
    }

    fn record(id: &str, path: &str, body: &str) -> ContentRecord {
        serde_json::from_value(json!({
            "@name": path.trim_start_matches('/'),
            "@path": path,
            "@id": id,
            "@nodeType": "mgnl:content",
            "body": body,
        }))
        .unwrap()
    }

    fn envelope(results: Vec<ContentRecord>) -> DeliveryResponse {
        DeliveryResponse {
            total: results.len() as u64,
            offset: 0,
            limit: 50,
            results,
        }
    }

    fn malaysia_record() -> ContentRecord {
        serde_json::from_value(json!({
            "@name": "A-Taste-of-Malaysia",
            "@path": "/magnolia-travels/A-Taste-of-Malaysia",
            "@id": "a358f3ad-5a03-4f5d-b0ab-cb2219100472",
            "@nodeType": "mgnl:content",
            "name": "A Taste of Malaysia",
            "location": "Kuala Lumpur, Malaysia",
            "author": "Magnolia Travels",
            "body": "<p>Get to know amazing Malaysia in a unique way - by learning about and tasting its delicious food. Malaysia isn&rsquo;t just about beautiful beaches, stunning scenery and historic temples.</p>\n<p>We&#39;ll spend the first week sampling Kuala Lumpur&#39;s delicious cosmopolitan restaurants and sights.</p> ",
            "destination": [
                {
                    "@name": "asia",
                    "@path": "/destinations/asia",
                    "@id": "7ec72c48-c33f-418e-b2ff-44cfb4bbb1f2",
                    "@nodeType": "mgnl:category",
                    "displayName": "Asia & the Pacific"
                }
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_single_record() {
        let stub = StubClient::ok(DeliveryResponse {
            total: 36,
            offset: 0,
            limit: 50,
            results: vec![malaysia_record()],
        });
        let calls = stub.calls.clone();
        let urls = stub.urls.clone();
        let loader = MagnoliaLoader::with_client(config(), stub);

        let documents = loader.load().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(urls.lock().unwrap().as_slice(), [BASE_URL.to_string()]);
        assert_eq!(documents.len(), 1);
        let doc = &documents[0];
        assert_eq!(doc.metadata.id, "a358f3ad-5a03-4f5d-b0ab-cb2219100472");
        assert_eq!(doc.metadata.path, "/magnolia-travels/A-Taste-of-Malaysia");
        assert_eq!(
            doc.metadata.url,
            "http://your-magnolia-cms/.rest/delivery/tours/v1/magnolia-travels/A-Taste-of-Malaysia"
        );
        assert!(doc.page_content.starts_with("Get to know amazing Malaysia"));
        assert!(doc.page_content.contains("We'll spend the first week"));
        assert!(!doc.page_content.contains('<'));
        assert!(!doc.page_content.contains('>'));
    }

    #[tokio::test]
    async fn test_load_preserves_order() {
        let records = vec![
            record("3", "/c", "<p>c</p>"),
            record("1", "/a", "<p>a</p>"),
            record("2", "/b", "<p>b</p>"),
        ];
        let loader = MagnoliaLoader::with_client(config(), StubClient::ok(envelope(records)));

        let documents = loader.load().await.unwrap();
        let ids: Vec<&str> = documents.iter().map(|d| d.metadata.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
        let bodies: Vec<&str> = documents.iter().map(|d| d.page_content.as_str()).collect();
        assert_eq!(bodies, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_load_empty_results() {
        let loader = MagnoliaLoader::with_client(config(), StubClient::ok(envelope(vec![])));
        let documents = loader.load().await.unwrap();
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn test_load_propagates_fetch_error() {
        let stub = StubClient::failing();
        let calls = stub.calls.clone();
        let loader = MagnoliaLoader::with_client(config(), stub);

        let err = loader.load().await.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.url(), BASE_URL);
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[tokio::test]
    async fn test_each_load_fetches_again() {
        let stub = StubClient::ok(envelope(vec![record("1", "/a", "a")]));
        let calls = stub.calls.clone();
        let loader = MagnoliaLoader::with_client(config(), stub);

        loader.load().await.unwrap();
        loader.load().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_document_loader_trait() {
        let loader = MagnoliaLoader::with_client(
            config(),
            StubClient::ok(envelope(vec![record("1", "/a", "a")])),
        );
        let dyn_loader: &dyn DocumentLoader = &loader;

        assert_eq!(dyn_loader.source_label(), "magnolia:tours");
        let documents = dyn_loader.load_documents().await.unwrap();
        assert_eq!(documents.len(), 1);
    }
}
