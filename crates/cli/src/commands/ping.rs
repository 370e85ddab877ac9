//! Backend reachability check.

use anyhow::Result;
use apiconn_client::ApiClient;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::OutputTarget;
use crate::formatters::OperationOutput;

pub async fn run(client: ApiClient, out: &OutputTarget, cancel: &CancellationToken) -> Result<()> {
    let base_url = client.base_url().to_string();
    info!(base_url = %base_url, "Pinging backend");

    let status = cancel.run(client.ping()).await?;
    let output = out.formatter().format_operation(&OperationOutput {
        operation: "ping".to_string(),
        target: base_url,
        success: true,
        message: status.message,
    })?;
    out.emit(&output)
}
