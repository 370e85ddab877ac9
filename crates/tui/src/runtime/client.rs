//! API client construction for the TUI.
//!
//! The builder logic lives in `apiconn_client`; this only attaches the
//! metrics collector the binary decided on.

use anyhow::{Context, Result};
use apiconn_client::{ApiClient, MetricsCollector};
use apiconn_config::Config;

/// Build the shared client from loaded configuration.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the HTTP client
/// cannot be constructed.
pub fn create_client(config: &Config, metrics: MetricsCollector) -> Result<ApiClient> {
    ApiClient::builder()
        .from_config(config)
        .metrics(metrics)
        .build()
        .context("Failed to build API client")
}
