//! Client builder for constructing [`ApiClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeout, default JSON headers)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`ApiClient`] methods)
//! - Resolving the base URL from the environment (see `apiconn_config`)
//!
//! # Invariants
//! - `base_url` is required and must be an http(s) URL
//! - The timeout defaults to 30 seconds

use std::time::Duration;

use apiconn_config::{Config, constants::DEFAULT_TIMEOUT_SECS, environment::DEFAULT_HEADERS};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::SecretString;

use crate::client::ApiClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`ApiClient`].
///
/// # Example
///
/// ```rust,ignore
/// use apiconn_client::ApiClient;
///
/// let client = ApiClient::builder()
///     .base_url("http://localhost:5001".to_string())
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ApiClientBuilder {
    base_url: Option<String>,
    api_key: Option<SecretString>,
    timeout: Duration,
    metrics: Option<MetricsCollector>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            metrics: None,
        }
    }
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL, e.g. `http://localhost:5001`.
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Send `Authorization: Bearer <key>` on every request.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Record request counts, latency and errors through `metrics`.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Pre-fill the builder from a resolved [`Config`].
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.api_key = config.connection.api_key.clone();
        self.timeout = config.connection.timeout;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    fn default_headers() -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in DEFAULT_HEADERS {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::InvalidRequest(format!("header {}: {}", name, e)))?;
            headers.insert(name, HeaderValue::from_static(value));
        }
        Ok(headers)
    }

    /// Build the [`ApiClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or not http(s).
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url.trim().to_string());

        let parsed = url::Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(Self::default_headers()?)
            .build()?;

        Ok(ApiClient {
            http,
            base_url,
            api_key: self.api_key,
            timeout: self.timeout,
            metrics: self.metrics,
        })
    }
}
