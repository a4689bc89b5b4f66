//! Loader configuration.
//!
//! Two layers live here:
//!
//! - [`Config`] / [`MagnoliaConfig`]: the raw TOML shape read by [`load_config`].
//! - [`LoaderConfig`]: the validated, immutable value the loader runs with.
//!   It can be built from a file or programmatically via [`LoaderConfig::new`].
//!
//! ```toml
//! [magnolia]
//! collection = "tours"
//! base_url = "http://your-magnolia-cms/.rest/delivery/tours/v1"
//! content_property = "body"
//! # username = "superuser"
//! # password = "superuser"
//! # auth_scheme = "basic"   # or "legacy"
//! # timeout_secs = 30
//! ```

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Validation failures for loader configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("magnolia.{0} must not be empty")]
    Empty(&'static str),
    #[error("magnolia.base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("magnolia.username and magnolia.password must be set together")]
    PartialCredentials,
    #[error("magnolia.timeout_secs must be > 0")]
    InvalidTimeout,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub magnolia: MagnoliaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MagnoliaConfig {
    pub collection: String,
    pub base_url: String,
    pub content_property: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub auth_scheme: AuthScheme,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Validate the raw file settings into a [`LoaderConfig`].
    pub fn loader_config(&self) -> Result<LoaderConfig, ConfigError> {
        let m = &self.magnolia;
        let credentials = Credentials::from_parts(m.username.clone(), m.password.clone())?;

        let mut config = LoaderConfig::new(&m.collection, &m.base_url, &m.content_property)?
            .with_auth_scheme(m.auth_scheme);
        if let Some(credentials) = credentials {
            config = config.with_credentials(credentials);
        }
        if let Some(secs) = m.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs))?;
        }
        Ok(config)
    }
}

/// How the authorization header value is formed from the credentials.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// `Basic <base64(username:password)>`.
    #[default]
    Basic,
    /// `Authorization <base64(username:password)>`, as sent by older Magnolia
    /// loaders. Only for servers that expect exactly that value.
    Legacy,
}

impl AuthScheme {
    fn prefix(self) -> &'static str {
        match self {
            AuthScheme::Basic => "Basic",
            AuthScheme::Legacy => "Authorization",
        }
    }
}

/// A username/password pair. Both halves are always present.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        match Self::from_parts(Some(username.into()), Some(password.into()))? {
            Some(credentials) => Ok(credentials),
            None => Err(ConfigError::PartialCredentials),
        }
    }

    /// Pair up optional halves. Empty strings count as absent.
    ///
    /// Both absent yields `Ok(None)`; exactly one present is an error.
    pub fn from_parts(
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        let username = username.filter(|u| !u.is_empty());
        let password = password.filter(|p| !p.is_empty());
        match (username, password) {
            (Some(username), Some(password)) => Ok(Some(Self { username, password })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::PartialCredentials),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Authorization header value for the given scheme.
    pub fn header_value(&self, scheme: AuthScheme) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("{} {}", scheme.prefix(), encoded)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Validated loader settings. Immutable once built.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    collection: String,
    base_url: String,
    content_property: String,
    credentials: Option<Credentials>,
    auth_scheme: AuthScheme,
    timeout: Option<Duration>,
}

impl LoaderConfig {
    pub fn new(
        collection: impl Into<String>,
        base_url: impl Into<String>,
        content_property: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let collection = collection.into();
        let base_url = base_url.into();
        let content_property = content_property.into();

        if collection.trim().is_empty() {
            return Err(ConfigError::Empty("collection"));
        }
        if base_url.trim().is_empty() {
            return Err(ConfigError::Empty("base_url"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        if content_property.trim().is_empty() {
            return Err(ConfigError::Empty("content_property"));
        }

        Ok(Self {
            collection,
            base_url,
            content_property,
            credentials: None,
            auth_scheme: AuthScheme::default(),
            timeout: None,
        })
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        self.timeout = Some(timeout);
        Ok(self)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn content_property(&self) -> &str {
        &self.content_property
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.auth_scheme
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The authorization header value, if credentials are configured.
    pub fn authorization_header(&self) -> Option<String> {
        self.credentials
            .as_ref()
            .map(|c| c.header_value(self.auth_scheme))
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    config
        .loader_config()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}
