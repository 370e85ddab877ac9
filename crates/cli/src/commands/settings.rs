//! Settings command implementation.
//!
//! Responsibilities:
//! - Show backend settings merged over the built-in defaults.
//! - Change one value and save the whole settings document.
//! - Save settings from a JSON file, or reset them to defaults.
//!
//! Invariants:
//! - `set` values parse as JSON when possible (`true`, `30`), else as strings.
//! - Every save sends the complete document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use apiconn_client::{ApiClient, Settings};
use clap::Subcommand;
use serde_json::Value;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::OutputTarget;
use crate::formatters::OperationOutput;

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show current settings (default)
    Show,
    /// Change one setting
    Set {
        /// Section (e.g., notifications)
        section: String,
        /// Key within the section (e.g., email)
        key: String,
        /// New value; JSON literals are parsed, anything else is a string
        value: String,
    },
    /// Toggle a boolean setting
    Toggle {
        section: String,
        key: String,
    },
    /// Save settings from a JSON file, replacing the stored document
    Save {
        /// JSON file of `{section: {key: value}}`
        file: PathBuf,
    },
    /// Restore the built-in defaults
    Reset,
}

pub async fn run(
    client: ApiClient,
    command: SettingsCommand,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = cancel.run(client.get_settings()).await?.with_defaults();
            let output = out.formatter().format_settings(&settings)?;
            out.emit(&output)
        }
        SettingsCommand::Set {
            section,
            key,
            value,
        } => {
            let mut settings = cancel.run(client.get_settings()).await?.with_defaults();
            settings.set(&section, &key, parse_value(&value));
            save(client, &settings, format!("{section}.{key}"), out, cancel).await
        }
        SettingsCommand::Toggle { section, key } => {
            let mut settings = cancel.run(client.get_settings()).await?.with_defaults();
            let now = settings.toggle(&section, &key);
            info!(section = %section, key = %key, now, "Toggled setting");
            save(client, &settings, format!("{section}.{key}"), out, cancel).await
        }
        SettingsCommand::Save { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let settings: Settings = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid settings JSON in {}", file.display()))?;
            save(client, &settings, "settings".to_string(), out, cancel).await
        }
        SettingsCommand::Reset => {
            save(client, &Settings::defaults(), "settings".to_string(), out, cancel).await
        }
    }
}

async fn save(
    client: ApiClient,
    settings: &Settings,
    target: String,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    let response = cancel.run(client.save_settings(settings)).await?;
    let output = out.formatter().format_operation(&OperationOutput {
        operation: "save".to_string(),
        target,
        success: true,
        message: response.message,
    })?;
    out.emit(&output)
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("45"), json!(45));
        assert_eq!(parse_value("dark"), json!("dark"));
        assert_eq!(parse_value("\"en\""), json!("en"));
    }
}
