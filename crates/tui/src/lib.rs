//! API Connector TUI library.
//!
//! Application state, input handling and screens of the terminal dashboard,
//! plus the runtime pieces (side effects, terminal guard) the binary wires
//! together.
//!
//! # Example
//!
//! ```rust
//! use apiconn_tui::{Action, App};
//! use crossterm::event::{KeyCode, KeyEvent};
//!
//! let mut app = App::new("http://localhost:8000", Default::default());
//! if let Some(action) = app.handle_input(KeyEvent::from(KeyCode::Tab)) {
//!     let _followup = app.update(action);
//! }
//! ```

pub mod action;
pub mod app;
pub mod cli;
pub mod runtime;
pub mod ui;

pub use action::Action;
pub use app::{App, CurrentScreen, FOOTER_HEIGHT, HEADER_HEIGHT};
pub use ui::popup::Popup;
pub use ui::toast::{Toast, ToastLevel};
