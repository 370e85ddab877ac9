//! Persistence of dashboard preferences.
//!
//! Responsibilities:
//! - Locate the preferences file in the platform config directory.
//! - Read and write `PersistedState` (favourite providers, last connection, theme).
//!
//! Does NOT handle:
//! - Loading environment variables (see `loader`).
//! - Backend-side settings (those live on the server, see `crates/client`).
//!
//! Invariants:
//! - A missing or corrupt file never blocks startup; defaults are used instead.
//! - Writes go through a temporary file and a rename.

mod manager;
mod path;
mod state;

pub use manager::ConfigManager;
pub use path::default_state_path;
pub use state::PersistedState;
