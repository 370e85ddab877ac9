//! Natural-language query command.
//!
//! Responsibilities:
//! - Send one query against a saved connection and print the response.
//!
//! Does NOT handle:
//! - Caching (the REST client never caches; see `render --query` for the SDK path).
//!
//! Invariants:
//! - A response with `success: false` is printed and then reported as an error.

use anyhow::Result;
use apiconn_client::{ApiClient, QueryRequest, ResourceId};
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::OutputTarget;
use crate::progress::Spinner;

pub async fn run(
    client: ApiClient,
    text: &str,
    connection: &str,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    let request = QueryRequest {
        query: text.trim().to_string(),
        connection_id: ResourceId::from(connection),
    };
    info!(connection_id = %request.connection_id, "Running query");

    let spinner = Spinner::new(out.progress_enabled(), "Querying");
    let response = match cancel.run(client.query(&request)).await {
        Ok(response) => response,
        Err(e) => {
            spinner.clear();
            return Err(e);
        }
    };
    spinner.finish();

    let output = out.formatter().format_query_response(&response)?;
    out.emit(&output)?;

    if !response.success {
        anyhow::bail!(
            "Query failed: {}",
            response.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}
