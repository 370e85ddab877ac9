//! API keys command implementation.
//!
//! Responsibilities:
//! - List, add, update, delete, and test stored upstream API keys.
//!
//! Does NOT handle:
//! - Reading key values back (the backend never returns them).
//!
//! Invariants:
//! - Key values missing from flags are prompted for with hidden input.
//! - `update` with no fields set is rejected locally.

use anyhow::Result;
use apiconn_client::{ApiClient, ApiKeyUpdate, NewApiKey, ResourceId};
use clap::{Subcommand, ValueEnum};
use secrecy::ExposeSecret;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::OutputTarget;
use crate::formatters::OperationOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyStatus {
    Active,
    Inactive,
}

impl KeyStatus {
    fn as_str(self) -> &'static str {
        match self {
            KeyStatus::Active => "active",
            KeyStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ApiKeysCommand {
    /// List stored keys (default)
    List,
    /// Store a new key
    Add {
        /// Display name
        name: String,
        /// Service the key belongs to (e.g., openai)
        service: String,
        /// Key value (prompted if omitted)
        #[arg(long)]
        value: Option<String>,
    },
    /// Change a stored key
    Update {
        /// Key id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        service: Option<String>,
        /// New key value
        #[arg(long)]
        value: Option<String>,
        #[arg(long, value_enum)]
        status: Option<KeyStatus>,
    },
    /// Delete a stored key
    Delete {
        /// Key id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Check a stored key against its service
    Test {
        /// Key id
        id: String,
    },
}

pub async fn run(
    client: ApiClient,
    command: ApiKeysCommand,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        ApiKeysCommand::List => {
            let keys = cancel.run(client.list_api_keys()).await?;
            let output = out.formatter().format_api_keys(&keys)?;
            out.emit(&output)
        }
        ApiKeysCommand::Add {
            name,
            service,
            value,
        } => {
            let key_value = match value {
                Some(v) => v,
                None => crate::interactive::prompt_secret("Key value")?
                    .expose_secret()
                    .to_string(),
            };
            let new_key = NewApiKey {
                name,
                service,
                key_value,
            };
            new_key.validate()?;
            info!(name = %new_key.name, service = %new_key.service, "Storing API key");
            let created = cancel.run(client.create_api_key(&new_key)).await?;
            emit_operation(out, "create", format!("api key {}", created.id), true, created.message)
        }
        ApiKeysCommand::Update {
            id,
            name,
            service,
            value,
            status,
        } => {
            let update = ApiKeyUpdate {
                name,
                service,
                key_value: value,
                status: status.map(|s| s.as_str().to_string()),
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to update: pass --name, --service, --value or --status");
            }
            let id = ResourceId::from(id.as_str());
            let response = cancel.run(client.update_api_key(&id, &update)).await?;
            emit_operation(out, "update", format!("api key {id}"), true, response.message)
        }
        ApiKeysCommand::Delete { id, force } => {
            if !force && !crate::interactive::confirm_delete(&id, "API key")? {
                return Ok(());
            }
            let id = ResourceId::from(id.as_str());
            let response = cancel.run(client.delete_api_key(&id)).await?;
            emit_operation(out, "delete", format!("api key {id}"), true, response.message)
        }
        ApiKeysCommand::Test { id } => {
            let id = ResourceId::from(id.as_str());
            let result = cancel.run(client.test_api_key(&id)).await?;
            let message = if result.success {
                result.message.clone().unwrap_or_else(|| "API key is valid".to_string())
            } else {
                result
                    .error
                    .clone()
                    .or_else(|| result.message.clone())
                    .unwrap_or_else(|| "API key test failed".to_string())
            };
            emit_operation(out, "test", format!("api key {id}"), result.success, message.clone())?;
            if !result.success {
                anyhow::bail!("{}", message);
            }
            Ok(())
        }
    }
}

fn emit_operation(
    out: &OutputTarget,
    operation: &str,
    target: String,
    success: bool,
    message: String,
) -> Result<()> {
    let output = out.formatter().format_operation(&OperationOutput {
        operation: operation.to_string(),
        target,
        success,
        message,
    })?;
    out.emit(&output)
}
