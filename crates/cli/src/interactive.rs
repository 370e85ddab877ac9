//! User interaction helpers for the CLI.
//!
//! Responsibilities:
//! - Confirmation before destructive operations.
//! - Hidden-input prompts for secrets.
//!
//! Does NOT handle:
//! - Non-interactive defaults (callers skip prompts with `--force` or flags).

use anyhow::{Context, Result};
use dialoguer::{Confirm, Password};
use secrecy::SecretString;

/// Ask before deleting `item_type` `item_name`. Defaults to "no".
pub fn confirm_delete(item_name: &str, item_type: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Are you sure you want to delete {} '{}'?",
            item_type, item_name
        ))
        .default(false)
        .interact()
        .context("Failed to read confirmation")?;

    if !confirmed {
        eprintln!("Delete cancelled.");
    }
    Ok(confirmed)
}

/// Read a secret without echoing it.
pub fn prompt_secret(prompt: &str) -> Result<SecretString> {
    let value = Password::new()
        .with_prompt(prompt)
        .interact()
        .context("Failed to read secret")?;
    Ok(SecretString::new(value.into()))
}
