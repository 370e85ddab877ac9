//! Stored API key endpoints.

use apiconn_config::environment::paths;
use reqwest::Client;
use secrecy::SecretString;

use crate::endpoints::request::authorize;
use crate::endpoints::{decode_json, encode_path_segment, send_request};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{
    ApiKey, ApiKeyTestResult, ApiKeyUpdate, CreatedApiKey, MessageResponse, NewApiKey, ResourceId,
};

fn key_path(id: &ResourceId) -> String {
    format!("{}/{}", paths::API_KEYS, encode_path_segment(&id.to_string()))
}

pub async fn list_api_keys(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<ApiKey>> {
    let url = format!("{}{}", base_url, paths::API_KEYS);
    let builder = authorize(client.get(&url), api_key);
    let response = send_request(builder, paths::API_KEYS, "GET", metrics).await?;
    decode_json(response, "api keys").await
}

pub async fn create_api_key(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    new_key: &NewApiKey,
    metrics: Option<&MetricsCollector>,
) -> Result<CreatedApiKey> {
    new_key.validate()?;
    let url = format!("{}{}", base_url, paths::API_KEYS);
    let builder = authorize(client.post(&url), api_key).json(new_key);
    let response = send_request(builder, paths::API_KEYS, "POST", metrics).await?;
    decode_json(response, "created api key").await
}

/// Update only the fields set in `update`.
pub async fn update_api_key(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    id: &ResourceId,
    update: &ApiKeyUpdate,
    metrics: Option<&MetricsCollector>,
) -> Result<MessageResponse> {
    if update.is_empty() {
        return Err(ClientError::InvalidRequest(
            "at least one field must be updated".to_string(),
        ));
    }
    let path = key_path(id);
    let url = format!("{}{}", base_url, path);
    let builder = authorize(client.put(&url), api_key).json(update);
    let response = send_request(builder, &path, "PUT", metrics).await?;
    decode_json(response, "update response").await
}

pub async fn delete_api_key(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    id: &ResourceId,
    metrics: Option<&MetricsCollector>,
) -> Result<MessageResponse> {
    let path = key_path(id);
    let url = format!("{}{}", base_url, path);
    let builder = authorize(client.delete(&url), api_key);
    let response = send_request(builder, &path, "DELETE", metrics).await?;
    decode_json(response, "delete response").await
}

/// Ask the backend to try a stored key against its service.
///
/// Services without a tester yield an `ApiError` (400) with the backend's
/// explanation.
pub async fn test_api_key(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    id: &ResourceId,
    metrics: Option<&MetricsCollector>,
) -> Result<ApiKeyTestResult> {
    let path = format!("{}/test", key_path(id));
    let url = format!("{}{}", base_url, path);
    let builder = authorize(client.post(&url), api_key);
    let response = send_request(builder, &path, "POST", metrics).await?;
    decode_json(response, "api key test result").await
}
