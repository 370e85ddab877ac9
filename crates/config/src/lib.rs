//! Configuration management for API Connector.
//!
//! This crate resolves which backend the dashboard, CLI and embed SDK talk to
//! (environment, base URLs, endpoint paths), loads settings from `.env` and
//! environment variables, and persists UI preferences between runs.

pub mod constants;
pub mod environment;
mod loader;
pub mod persistence;
pub mod types;

pub use environment::{ApiEndpoints, EndpointOverrides, Environment};
pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use persistence::{ConfigManager, PersistedState};
pub use types::{ColorTheme, Config, ConnectionConfig, EmbedSettings, Theme};
