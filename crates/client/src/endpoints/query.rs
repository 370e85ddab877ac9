//! Natural-language query endpoint.

use apiconn_config::environment::paths;
use reqwest::Client;
use secrecy::SecretString;

use crate::endpoints::request::authorize;
use crate::endpoints::{decode_json, send_request};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{QueryRequest, QueryResponse};

/// Ask the backend to interpret and execute a query against a connection.
pub async fn run_query(
    client: &Client,
    base_url: &str,
    api_key: Option<&SecretString>,
    request: &QueryRequest,
    metrics: Option<&MetricsCollector>,
) -> Result<QueryResponse> {
    if request.query.trim().is_empty() {
        return Err(ClientError::InvalidRequest("query is required".to_string()));
    }
    let url = format!("{}{}", base_url, paths::QUERY);
    let builder = authorize(client.post(&url), api_key).json(request);
    let response = send_request(builder, paths::QUERY, "POST", metrics).await?;
    decode_json(response, "query response").await
}
