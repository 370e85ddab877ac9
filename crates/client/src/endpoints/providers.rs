//! Provider catalog endpoints.

use apiconn_config::environment::paths;
use reqwest::Client;
use secrecy::SecretString;

use crate::endpoints::request::authorize;
use crate::endpoints::{decode_json, encode_path_segment, send_request};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{Provider, ProviderCategories};

/// List providers, optionally restricted to one category.
pub async fn list_providers(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    category: Option<&str>,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<Provider>> {
    let url = format!("{}{}", base_url, paths::PROVIDERS);
    let mut builder = authorize(client.get(&url), api_key);
    if let Some(category) = category.filter(|c| !c.trim().is_empty()) {
        builder = builder.query(&[("category", category)]);
    }
    let response = send_request(builder, paths::PROVIDERS, "GET", metrics).await?;
    decode_json(response, "providers").await
}

/// Providers grouped by category.
pub async fn provider_categories(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    metrics: Option<&MetricsCollector>,
) -> Result<ProviderCategories> {
    let url = format!("{}{}", base_url, paths::PROVIDER_CATEGORIES);
    let builder = authorize(client.get(&url), api_key);
    let response = send_request(builder, paths::PROVIDER_CATEGORIES, "GET", metrics).await?;
    decode_json(response, "provider categories").await
}

/// Search providers by name or description. A blank term returns an empty list
/// without contacting the backend.
pub async fn search_providers(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    term: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<Provider>> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }
    let url = format!("{}{}", base_url, paths::PROVIDER_SEARCH);
    let builder = authorize(client.get(&url), api_key).query(&[("q", term)]);
    let response = send_request(builder, paths::PROVIDER_SEARCH, "GET", metrics).await?;
    decode_json(response, "provider search results").await
}

/// Fetch a single provider by key.
pub async fn get_provider(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    key: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Provider> {
    let path = format!("{}/{}", paths::PROVIDERS, encode_path_segment(key));
    let url = format!("{}{}", base_url, path);
    let builder = authorize(client.get(&url), api_key);
    let response = send_request(builder, &path, "GET", metrics).await?;
    decode_json(response, "provider").await
}
