//! REST API endpoint implementations.
//!
//! One free function per backend route. Each takes the shared
//! `reqwest::Client`, the base URL, the optional bearer key and an optional
//! metrics collector; [`crate::ApiClient`] wraps them as methods.

mod api_keys;
mod connections;
mod history;
mod providers;
mod query;
pub mod request;
mod server;
mod settings;
pub mod url_encoding;

pub use api_keys::{create_api_key, delete_api_key, list_api_keys, test_api_key, update_api_key};
pub use connections::{create_connection, delete_connection, list_connections, test_connection};
pub use history::list_history;
pub use providers::{get_provider, list_providers, provider_categories, search_providers};
pub use query::run_query;
pub use request::{decode_json, extract_error_message, send_request};
pub use server::ping;
pub use settings::{get_settings, save_settings};
pub use url_encoding::encode_path_segment;
