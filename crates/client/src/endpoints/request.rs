//! Shared request execution for every backend endpoint.
//!
//! Responsibilities:
//! - Attach the bearer credential when one is configured.
//! - Log each request and response, and record metrics.
//! - Turn non-2xx responses into [`ClientError::ApiError`].
//!
//! Does NOT handle:
//! - Retries or backoff. A failed request is reported once, as-is.
//! - Response body decoding (see [`decode_json`]).
//!
//! Invariants:
//! - The API key is only ever exposed into the `Authorization` header.
//! - `ApiError.message` is the backend's `error` field when present, else the raw body.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::error::{ClientError, Result};
use crate::metrics::{CallOutcome, MetricsCollector};
use crate::models::ErrorBody;

/// Add `Authorization: Bearer <key>` when an API key is configured.
pub(crate) fn authorize(builder: RequestBuilder, api_key: Option<&SecretString>) -> RequestBuilder {
    match api_key {
        Some(key) => builder.bearer_auth(key.expose_secret()),
        None => builder,
    }
}

/// Pull a human message out of an error body.
///
/// `{"error": "..."}` yields the error text; anything else yields the body itself.
pub fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => "Empty error response".to_string(),
        Err(_) => body.to_string(),
    }
}

/// Send a request, logging and measuring it, and map non-2xx statuses to errors.
pub async fn send_request(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    info!("API Request: {} {}", method, endpoint);
    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }

    let started = Instant::now();
    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => {
            let err = ClientError::from(e);
            error!(endpoint, method, error = %err, "API request failed before a response");
            if let Some(m) = metrics {
                m.record_outcome(endpoint, method, started.elapsed(), CallOutcome::Failed(&err));
            }
            return Err(err);
        }
    };

    let status = response.status().as_u16();
    let elapsed = started.elapsed();
    info!("API Response: {} {}", status, endpoint);

    if response.status().is_success() {
        if let Some(m) = metrics {
            m.record_outcome(endpoint, method, elapsed, CallOutcome::Ok(status));
        }
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    error!(status, endpoint, body = %body, "API Error");
    match status {
        401 => warn!("Unauthorized access"),
        500 => error!("Server error occurred"),
        _ => {}
    }

    let err = ClientError::ApiError {
        status,
        url,
        message: extract_error_message(&body),
    };
    if let Some(m) = metrics {
        m.record_outcome(endpoint, method, elapsed, CallOutcome::Rejected(status, &err));
    }
    Err(err)
}

/// Decode a JSON body, reporting shape mismatches as [`ClientError::InvalidResponse`].
pub async fn decode_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
}
