//! Backend liveness endpoint.

use reqwest::Client;
use secrecy::SecretString;

use crate::endpoints::request::authorize;
use crate::endpoints::{decode_json, send_request};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::ServerStatus;

/// `GET /`, which answers with a short status message.
pub async fn ping(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    metrics: Option<&MetricsCollector>,
) -> Result<ServerStatus> {
    let url = format!("{}/", base_url);
    let builder = authorize(client.get(&url), api_key);
    let response = send_request(builder, "/", "GET", metrics).await?;
    decode_json(response, "server status").await
}
