//! Connection endpoints.

use apiconn_config::environment::paths;
use reqwest::Client;
use secrecy::SecretString;

use crate::endpoints::request::authorize;
use crate::endpoints::{decode_json, encode_path_segment, send_request};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{
    Connection, ConnectionTest, CreatedConnection, MessageResponse, NewConnection, ResourceId,
    TestConnectionResult,
};

/// List saved connections.
pub async fn list_connections(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    metrics: Option<&MetricsCollector>,
) -> Result<Vec<Connection>> {
    let url = format!("{}{}", base_url, paths::CONNECTIONS);
    let builder = authorize(client.get(&url), api_key);
    let response = send_request(builder, paths::CONNECTIONS, "GET", metrics).await?;
    decode_json(response, "connections").await
}

/// Create a connection. Blank `name` or `base_url` is rejected without a request.
pub async fn create_connection(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    connection: &NewConnection,
    metrics: Option<&MetricsCollector>,
) -> Result<CreatedConnection> {
    connection.validate()?;
    let url = format!("{}{}", base_url, paths::CONNECTIONS);
    let builder = authorize(client.post(&url), api_key).json(connection);
    let response = send_request(builder, paths::CONNECTIONS, "POST", metrics).await?;
    decode_json(response, "created connection").await
}

/// Delete a connection by id.
pub async fn delete_connection(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    id: &ResourceId,
    metrics: Option<&MetricsCollector>,
) -> Result<MessageResponse> {
    let path = format!(
        "{}/{}",
        paths::CONNECTIONS,
        encode_path_segment(&id.to_string())
    );
    let url = format!("{}{}", base_url, path);
    let builder = authorize(client.delete(&url), api_key);
    let response = send_request(builder, &path, "DELETE", metrics).await?;
    decode_json(response, "delete response").await
}

/// Probe an upstream API with unsaved connection details.
///
/// A 2xx answer is returned as-is, even when it reports `success: false`.
/// Authentication and validation failures come back as `ApiError` carrying
/// the backend's message.
pub async fn test_connection(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    test: &ConnectionTest,
    metrics: Option<&MetricsCollector>,
) -> Result<TestConnectionResult> {
    let url = format!("{}{}", base_url, paths::TEST_CONNECTION);
    let builder = authorize(client.post(&url), api_key).json(test);
    let response = send_request(builder, paths::TEST_CONNECTION, "POST", metrics).await?;
    decode_json(response, "connection test result").await
}
