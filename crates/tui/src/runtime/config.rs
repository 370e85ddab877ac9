//! Configuration loading and preference persistence for the TUI.
//!
//! Invariants:
//! - Precedence: CLI args > env vars (`.env` included) > defaults.
//! - `load_dotenv()` runs before the environment is read.
//! - The `ConfigManager` sits behind a mutex so concurrent saves never
//!   interleave writes to the state file.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use apiconn_config::{Config, ConfigLoader, ConfigManager};
use tokio::sync::Mutex;

use crate::app::App;
use crate::cli::Cli;

/// Resolve configuration from the environment and CLI overrides.
///
/// # Errors
///
/// Returns an error if `.env` is malformed, an environment variable fails
/// to parse, or the resolved base URL is invalid.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new().load_dotenv()?.from_env()?;

    if let Some(environment) = cli.environment {
        loader = loader.with_environment(environment);
    }
    if let Some(url) = &cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(key) = &cli.api_key {
        loader = loader.with_api_key(key.clone());
    }

    loader
        .build()
        .map_err(|e| anyhow!("Failed to load config: {}", e))
}

/// Write the app's preferences before leaving the event loop.
///
/// # Errors
///
/// Returns an error if the state file cannot be written.
pub async fn save_and_quit(app: &App, config_manager: &Arc<Mutex<ConfigManager>>) -> Result<()> {
    let state = app.persisted_state();
    let manager = config_manager.lock().await;
    manager.save(&state)?;
    Ok(())
}
