//! Client-side page logic shared by the CLI and TUI.
//!
//! Everything here is pure: it takes data already fetched through
//! [`crate::ApiClient`] and filters, pages, groups or summarizes it.

mod dashboard;
mod history;
mod notifications;
mod providers;
mod time;

pub use dashboard::{ActivityItem, DashboardStats};
pub use history::{Page, filter_history};
pub use notifications::{NotificationCenter, NotificationFilter};
pub use providers::{example_queries_for, filter_providers, group_by_category, popular_providers};
pub use time::format_timestamp;
