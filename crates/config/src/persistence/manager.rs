//! Reading and writing the preferences file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::path::default_state_path;
use super::state::PersistedState;
use crate::loader::env_var_or_none;

/// Owns the location of the preferences file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    state_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager at `APICONN_STATE_PATH`, or the platform default location.
    pub fn new() -> Result<Self> {
        let state_path = match env_var_or_none("APICONN_STATE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_state_path()?,
        };
        Ok(Self::new_with_path(state_path))
    }

    /// Creates a manager for a specific file (primarily for tests).
    pub fn new_with_path(state_path: PathBuf) -> Self {
        Self { state_path }
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Loads persisted state, falling back to defaults on any failure.
    pub fn load(&self) -> PersistedState {
        if !self.state_path.exists() {
            return PersistedState::default();
        }

        let parsed = std::fs::read_to_string(&self.state_path)
            .map_err(anyhow::Error::from)
            .and_then(|content| {
                serde_json::from_str::<PersistedState>(&content).map_err(anyhow::Error::from)
            });

        match parsed {
            Ok(state) => state.sanitize(),
            Err(e) => {
                tracing::warn!(
                    path = %self.state_path.display(),
                    error = %e,
                    "Failed to read preferences, using defaults"
                );
                PersistedState::default()
            }
        }
    }

    /// Saves persisted state to disk.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created
    /// or the file cannot be written.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.state_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let temp_path = self.state_path.with_extension("tmp");
        let content = serde_json::to_string_pretty(state)?;
        std::fs::write(&temp_path, content).context("Failed to write temporary preferences file")?;
        std::fs::rename(&temp_path, &self.state_path)
            .context("Failed to move preferences file into place")?;
        Ok(())
    }
}
