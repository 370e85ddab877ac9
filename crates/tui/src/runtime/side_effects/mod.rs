//! Async side effect handlers for TUI actions.
//!
//! Responsibilities:
//! - Run the API calls that trigger actions ask for.
//! - Spawn each call on the task tracker so the event loop never blocks.
//! - Send results back through the action channel.
//!
//! Does NOT handle:
//! - Application state changes (the result actions do that in `App::update`).
//! - Rendering or terminal management.
//!
//! Invariants:
//! - Every API call runs in its own tracked task.
//! - Every call answers with exactly one result action, success or error.
//! - Loads set `Loading(true)` before spawning; result actions clear it.

mod catalog;
mod connections;
mod dispatcher;
mod query;
mod settings;

use std::sync::Arc;

use apiconn_client::ApiClient;

pub use dispatcher::handle_side_effects;
pub use tokio_util::task::TaskTracker;

/// Client shared across spawned tasks. Calls take `&self`, so no lock is
/// needed.
pub type SharedClient = Arc<ApiClient>;
