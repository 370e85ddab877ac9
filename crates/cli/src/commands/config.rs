//! Config command implementation.
//!
//! Responsibilities:
//! - Show the configuration resolved from flags, environment, and `.env`.
//! - Show the path of the persisted dashboard state.
//!
//! Invariants:
//! - The API key is never printed, only whether one is set.

use anyhow::Result;
use apiconn_config::{Config, ConfigManager};
use clap::Subcommand;

use crate::commands::OutputTarget;
use crate::formatters::ConfigView;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved configuration (default)
    Show,
    /// Print the path of the persisted dashboard state file
    Path,
}

pub fn run(config: &Config, command: ConfigCommand, out: &OutputTarget) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let output = out.formatter().format_config(&ConfigView::from(config))?;
            out.emit(&output)
        }
        ConfigCommand::Path => {
            let manager = ConfigManager::new()?;
            println!("{}", manager.state_path().display());
            Ok(())
        }
    }
}
