//! Testing utilities for API Connector client tests.
//!
//! Fixture loading and small model builders shared by this crate's tests and
//! by the CLI and TUI test suites. Available when running tests or when the
//! `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use apiconn_client::testing::{load_fixture, sample_connection};
//!
//! let providers = load_fixture("providers/list_providers.json");
//! let conn = sample_connection(1, "GitHub", "https://api.github.com");
//! ```

use std::path::Path;

use crate::models::{
    AuthType, Connection, HistoryEntry, HistoryStatus, Provider, ResourceId,
};

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

pub fn sample_connection(id: i64, name: &str, base_url: &str) -> Connection {
    Connection {
        id: ResourceId::Int(id),
        name: name.to_string(),
        base_url: base_url.to_string(),
        auth_type: AuthType::Bearer,
        auth_data: None,
        headers: None,
        created_at: Some("2024-01-01T09:00:00".to_string()),
    }
}

pub fn sample_history_entry(id: i64, query: &str, status: HistoryStatus) -> HistoryEntry {
    HistoryEntry {
        id: ResourceId::Int(id),
        user_query: query.to_string(),
        interpreted_query: None,
        api_endpoint: Some(format!("https://api.example.com/items/{}", id)),
        status,
        response_data: None,
        created_at: "2024-03-05T14:07:00".to_string(),
        api_connection_id: Some(ResourceId::Int(1)),
    }
}

/// `count` history entries, every fifth one failed.
pub fn sample_history(count: usize) -> Vec<HistoryEntry> {
    (1..=count as i64)
        .map(|i| {
            let status = if i % 5 == 0 {
                HistoryStatus::Error
            } else {
                HistoryStatus::Success
            };
            sample_history_entry(i, &format!("Query number {}", i), status)
        })
        .collect()
}

pub fn sample_provider(key: &str, name: &str, category: &str, base_url: &str) -> Provider {
    Provider {
        key: key.to_string(),
        name: name.to_string(),
        category: Some(category.to_string()),
        description: format!("{} REST API", name),
        auth_type: AuthType::ApiKey,
        base_url: base_url.to_string(),
        example_queries: vec![format!("Get data from {}", name)],
    }
}
