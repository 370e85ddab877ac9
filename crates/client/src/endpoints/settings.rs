//! User settings endpoints.

use apiconn_config::environment::paths;
use reqwest::Client;
use secrecy::SecretString;

use crate::endpoints::request::authorize;
use crate::endpoints::{decode_json, send_request};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{MessageResponse, Settings};

pub async fn get_settings(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    metrics: Option<&MetricsCollector>,
) -> Result<Settings> {
    let url = format!("{}{}", base_url, paths::SETTINGS);
    let builder = authorize(client.get(&url), api_key);
    let response = send_request(builder, paths::SETTINGS, "GET", metrics).await?;
    decode_json(response, "settings").await
}

/// Replace the stored settings with `settings`.
pub async fn save_settings(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    settings: &Settings,
    metrics: Option<&MetricsCollector>,
) -> Result<MessageResponse> {
    let url = format!("{}{}", base_url, paths::SETTINGS);
    let builder = authorize(client.post(&url), api_key).json(settings);
    let response = send_request(builder, paths::SETTINGS, "POST", metrics).await?;
    decode_json(response, "settings response").await
}
