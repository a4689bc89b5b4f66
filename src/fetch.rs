//! Delivery endpoint client.
//!
//! Issues a single `GET` against a Magnolia delivery endpoint and parses the
//! JSON envelope. There is no retry, pagination, or caching: one call, one
//! page.
//!
//! Every failure (transport error, non-2xx status, malformed body) comes back
//! as the same [`FetchError`], carrying the requested URL and the cause.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::LoaderConfig;
use crate::models::DeliveryResponse;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
#[error("Failed to fetch \"{url}\" from Magnolia: {message}")]
pub struct FetchError {
    url: String,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl FetchError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        url: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The URL that was being fetched.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The underlying HTTP client could not be constructed (TLS backend setup).
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

/// Source of delivery envelopes.
///
/// [`HttpDeliveryClient`] is the real implementation; tests and embedders can
/// supply their own.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<DeliveryResponse, FetchError>;
}

/// `reqwest`-backed delivery client.
pub struct HttpDeliveryClient {
    client: reqwest::Client,
    /// Precomputed `Authorization` header value, if credentials are set.
    authorization: Option<String>,
}

impl HttpDeliveryClient {
    pub fn new(config: &LoaderConfig) -> Result<Self, ClientBuildError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            authorization: config.authorization_header(),
        })
    }
}

#[async_trait]
impl DeliveryClient for HttpDeliveryClient {
    async fn fetch(&self, url: &str) -> Result<DeliveryResponse, FetchError> {
        debug!(url, auth = self.authorization.is_some(), "fetching delivery page");

        let mut request = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if let Some(ref authorization) = self.authorization {
            request = request.header("Authorization", authorization);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::with_source(url, e.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(url, format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::with_source(url, e.to_string(), e))?;

        let envelope: DeliveryResponse = serde_json::from_slice(&body)
            .map_err(|e| FetchError::with_source(url, format!("invalid JSON body: {}", e), e))?;

        info!(
            url,
            total = envelope.total,
            results = envelope.results.len(),
            "fetched delivery page"
        );

        Ok(envelope)
    }
}
