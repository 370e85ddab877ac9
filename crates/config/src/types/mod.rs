//! Configuration type definitions for API Connector.
//!
//! Responsibilities:
//! - Define the resolved `Config` (environment, connection, embed settings).
//! - Define the persisted `ColorTheme` and its runtime `Theme` expansion.
//!
//! Does NOT handle:
//! - Configuration loading from `.env` or environment variables (see `loader` module).
//! - Persisting UI preferences (see `persistence` module).
//!
//! Invariants:
//! - The API key is held as `secrecy::SecretString` so it never lands in logs.
//! - `ColorTheme` is the persisted representation; `Theme` is the runtime representation.

pub(crate) mod connection;
mod theme;

pub use connection::{Config, ConnectionConfig, EmbedSettings};
pub use theme::{ColorTheme, Theme};
