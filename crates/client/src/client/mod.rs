//! Backend REST client and API methods.
//!
//! This module provides [`ApiClient`], the single entry point the CLI, TUI
//! and tests use to talk to the proxy backend.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `connections`, `providers`, `query`, `history`, `settings`, `api_keys`,
//!   `server`: thin method wrappers over [`crate::endpoints`]
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Retries, backoff, or credential refresh (none are performed)
//!
//! # Invariants
//! - The base URL never ends with `/`
//! - The API key, when set, is only sent as a bearer credential

pub mod builder;

mod api_keys;
mod connections;
mod history;
mod providers;
mod query;
mod server;
mod settings;

use std::time::Duration;

use secrecy::SecretString;

use crate::metrics::MetricsCollector;

/// REST client for the proxy backend.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use apiconn_client::ApiClient;
///
/// let client = ApiClient::builder()
///     .base_url("http://localhost:5001".to_string())
///     .build()?;
/// let connections = client.list_connections().await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: Option<SecretString>,
    pub(crate) timeout: Duration,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl ApiClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ApiClientBuilder {
        builder::ApiClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
