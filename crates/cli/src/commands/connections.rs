//! Connections command implementation.
//!
//! Responsibilities:
//! - List saved connections.
//! - Create connections from credential flags, optionally testing first.
//! - Delete connections with confirmation.
//! - Test unsaved credentials against an upstream API.
//!
//! Does NOT handle:
//! - Direct REST calls (handled by the client crate).
//! - Output formatting details (see formatters module).
//!
//! Invariants:
//! - Secrets missing from flags are prompted for with hidden input.
//! - Delete requires confirmation unless `--force` is given.

use anyhow::Result;
use apiconn_client::{ApiClient, Credentials, NewConnection, ResourceId};
use clap::{Args, Subcommand, ValueEnum};
use secrecy::ExposeSecret;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::OutputTarget;
use crate::formatters::OperationOutput;
use crate::progress::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthKind {
    #[value(name = "api_key", alias = "api-key")]
    ApiKey,
    Bearer,
    Basic,
    None,
}

/// Credential flags shared by `add` and `test`.
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Authentication type used against the upstream API
    #[arg(short, long, value_enum, default_value = "none")]
    pub auth: AuthKind,

    /// API key value (api_key auth; prompted if omitted)
    #[arg(long)]
    pub key: Option<String>,

    /// Header carrying the API key (defaults to X-API-Key)
    #[arg(long)]
    pub header: Option<String>,

    /// Bearer token (bearer auth; prompted if omitted)
    #[arg(long)]
    pub token: Option<String>,
}

impl AuthArgs {
    fn credentials(self) -> Result<Credentials> {
        Ok(match self.auth {
            AuthKind::ApiKey => Credentials::ApiKey {
                key: secret_or_prompt(self.key, "API key")?,
                header: self.header,
            },
            AuthKind::Bearer => Credentials::Bearer {
                token: secret_or_prompt(self.token, "Bearer token")?,
            },
            AuthKind::Basic => Credentials::Basic,
            AuthKind::None => Credentials::None,
        })
    }
}

fn secret_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(crate::interactive::prompt_secret(prompt)?
            .expose_secret()
            .to_string()),
    }
}

#[derive(Debug, Subcommand)]
pub enum ConnectionsCommand {
    /// List saved connections (default)
    List,
    /// Save a new connection
    Add {
        /// Display name
        name: String,
        /// Upstream API base URL (e.g., https://api.github.com)
        #[arg(id = "upstream_url", value_name = "BASE_URL")]
        upstream_url: String,
        #[command(flatten)]
        auth: AuthArgs,
        /// Test the credentials before saving; abort if the test fails
        #[arg(long)]
        test_first: bool,
    },
    /// Delete a saved connection
    Delete {
        /// Connection id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Test credentials against an upstream API without saving
    Test {
        /// Upstream API base URL
        #[arg(id = "upstream_url", value_name = "BASE_URL")]
        upstream_url: String,
        #[command(flatten)]
        auth: AuthArgs,
    },
}

pub async fn run(
    client: ApiClient,
    command: ConnectionsCommand,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        ConnectionsCommand::List => run_list(client, out, cancel).await,
        ConnectionsCommand::Add {
            name,
            upstream_url,
            auth,
            test_first,
        } => {
            let connection = NewConnection::new(name, upstream_url, &auth.credentials()?);
            run_add(client, connection, test_first, out, cancel).await
        }
        ConnectionsCommand::Delete { id, force } => {
            run_delete(client, &id, force, out, cancel).await
        }
        ConnectionsCommand::Test { upstream_url, auth } => {
            let connection = NewConnection::new("", upstream_url, &auth.credentials()?);
            run_test(client, &connection, out, cancel).await
        }
    }
}

async fn run_list(client: ApiClient, out: &OutputTarget, cancel: &CancellationToken) -> Result<()> {
    info!("Listing connections");

    let spinner = Spinner::new(out.progress_enabled(), "Loading connections");
    let connections = cancel.run(client.list_connections()).await?;
    spinner.finish();

    let output = out.formatter().format_connections(&connections)?;
    out.emit(&output)
}

async fn run_add(
    client: ApiClient,
    connection: NewConnection,
    test_first: bool,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    connection.validate()?;

    if test_first {
        let result = cancel.run(client.test_connection(&connection.as_test())).await?;
        if !result.success {
            anyhow::bail!("{}", result.summary());
        }
    }

    info!(name = %connection.name, "Creating connection");
    let created = cancel.run(client.create_connection(&connection)).await?;

    let output = out.formatter().format_operation(&OperationOutput {
        operation: "create".to_string(),
        target: format!("connection {} ({})", created.id, created.name),
        success: true,
        message: created.message,
    })?;
    out.emit(&output)
}

async fn run_delete(
    client: ApiClient,
    id: &str,
    force: bool,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    if !force && !crate::interactive::confirm_delete(id, "connection")? {
        return Ok(());
    }

    info!(id, "Deleting connection");
    let id = ResourceId::from(id);
    let response = cancel.run(client.delete_connection(&id)).await?;

    let output = out.formatter().format_operation(&OperationOutput {
        operation: "delete".to_string(),
        target: format!("connection {}", id),
        success: true,
        message: response.message,
    })?;
    out.emit(&output)
}

async fn run_test(
    client: ApiClient,
    connection: &NewConnection,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    if connection.base_url.is_empty() {
        anyhow::bail!("base_url is required");
    }

    let spinner = Spinner::new(out.progress_enabled(), "Testing connection");
    let result = cancel.run(client.test_connection(&connection.as_test())).await?;
    spinner.finish();

    let output = out.formatter().format_test_result(&result)?;
    out.emit(&output)?;

    if !result.success {
        anyhow::bail!("{}", result.summary());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_from_flags() {
        let args = AuthArgs {
            auth: AuthKind::ApiKey,
            key: Some("k-1".to_string()),
            header: Some("X-Token".to_string()),
            token: None,
        };
        assert_eq!(
            args.credentials().unwrap(),
            Credentials::ApiKey {
                key: "k-1".to_string(),
                header: Some("X-Token".to_string())
            }
        );

        let args = AuthArgs {
            auth: AuthKind::None,
            key: None,
            header: None,
            token: None,
        };
        assert_eq!(args.credentials().unwrap(), Credentials::None);
    }
}
