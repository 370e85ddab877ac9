//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Distinguish commands that talk to the backend from offline ones.
//! - Build the REST client and SDK client from the resolved config.
//!
//! Does NOT handle:
//! - Configuration loading (done in `main()`).
//! - CLI argument definitions (see `args` module).
//!
//! Invariants:
//! - Offline contexts cannot be turned into clients.

use anyhow::{Context, Result};
use apiconn_client::{ApiClient, MetricsCollector};
use apiconn_config::Config;
use apiconn_embed::{EmbedClient, EmbedOptions};
use secrecy::SecretString;

pub(crate) enum ConfigCommandContext {
    /// Resolved config plus whether request metrics are recorded.
    Real(Box<Config>, bool),
    /// For commands that never contact the backend.
    Offline,
}

impl ConfigCommandContext {
    pub(crate) fn into_real_config(self) -> Result<Config> {
        match self {
            ConfigCommandContext::Real(config, _) => Ok(*config),
            ConfigCommandContext::Offline => {
                anyhow::bail!(
                    "Internal error: attempted to use an offline context for an operation requiring a backend"
                )
            }
        }
    }

    /// A REST client for the resolved backend.
    pub(crate) fn api_client(self) -> Result<ApiClient> {
        let metrics_enabled = matches!(self, ConfigCommandContext::Real(_, true));
        let config = self.into_real_config()?;
        let mut builder = ApiClient::builder().from_config(&config);
        if metrics_enabled {
            builder = builder.metrics(MetricsCollector::new());
        }
        builder.build().context("Failed to build API client")
    }

    /// An SDK client using the same backend and key.
    ///
    /// Without a configured key an empty bearer is sent.
    pub(crate) fn embed_client(self) -> Result<EmbedClient> {
        let metrics_enabled = matches!(self, ConfigCommandContext::Real(_, true));
        let config = self.into_real_config()?;
        let key = config
            .connection
            .api_key
            .clone()
            .unwrap_or_else(|| SecretString::new("".into()));
        let client = EmbedClient::new(key, EmbedOptions::from_config(&config))
            .context("Failed to build SDK client")?;
        Ok(if metrics_enabled {
            client.with_metrics(MetricsCollector::new())
        } else {
            client
        })
    }
}
