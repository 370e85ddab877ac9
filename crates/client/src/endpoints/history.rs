//! Query history endpoint.

use apiconn_config::environment::paths;
use reqwest::Client;
use secrecy::SecretString;

use crate::endpoints::request::authorize;
use crate::endpoints::{decode_json, send_request};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::HistoryEntry;

/// Recent queries, newest first. The backend caps the list at 50.
pub async fn list_history(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<HistoryEntry>> {
    let url = format!("{}{}", base_url, paths::HISTORY);
    let builder = authorize(client.get(&url), api_key);
    let response = send_request(builder, paths::HISTORY, "GET", metrics).await?;
    decode_json(response, "history").await
}
