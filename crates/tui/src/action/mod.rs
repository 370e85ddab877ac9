//! Action protocol for async TUI event handling.
//!
//! # Module Structure
//!
//! - `redaction`: logging wrapper (`RedactedAction`)
//! - `variants`: the `Action` enum and its payload types
//!
//! # What This Module Does NOT Handle
//!
//! - Action handling logic (see `App::update`)
//! - Async task execution (see `runtime::side_effects`)

pub mod redaction;
pub mod variants;

pub use redaction::RedactedAction;
pub use variants::{Action, ApiResult, DashboardData};
