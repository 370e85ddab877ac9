//! Runtime components for the TUI application.
//!
//! - Terminal management (`TerminalGuard`)
//! - Client construction
//! - Configuration loading and preference persistence
//! - Async side effect handlers for API calls
//!
//! Does NOT handle:
//! - UI rendering or input handling (see `apiconn_tui::app` and `apiconn_tui::ui`).
//! - Wire formats and endpoints (see `apiconn_client`).

pub mod client;
pub mod config;
pub mod side_effects;
pub mod terminal;
