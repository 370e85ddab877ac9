//! History command implementation.
//!
//! Responsibilities:
//! - Fetch query history, filter it by a search term, and print one page.
//! - Resolve connection ids to names for display.
//!
//! Invariants:
//! - Filtering and paging happen client-side; the backend returns everything.
//! - A failed connection lookup only loses the names, not the history.

use std::collections::HashMap;

use anyhow::Result;
use apiconn_client::views::{Page, filter_history};
use apiconn_client::{ApiClient, HistoryEntry, ResourceId};
use tracing::{info, warn};

use crate::cancellation::CancellationToken;
use crate::commands::OutputTarget;
use crate::formatters::{HistoryPageOutput, HistoryRow};
use crate::progress::Spinner;

pub async fn run(
    client: ApiClient,
    search: Option<&str>,
    page: usize,
    per_page: usize,
    out: &OutputTarget,
    cancel: &CancellationToken,
) -> Result<()> {
    info!(page, per_page, "Listing history");

    let spinner = Spinner::new(out.progress_enabled(), "Loading history");
    let entries = cancel.run(client.list_history()).await?;
    let names = match cancel.run(client.list_connections()).await {
        Ok(connections) => connections
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect::<HashMap<_, _>>(),
        Err(e) if e.is::<crate::cancellation::Cancelled>() => return Err(e),
        Err(e) => {
            warn!(error = %e, "Connection names unavailable for history");
            HashMap::new()
        }
    };
    spinner.finish();

    let output = build_page(&entries, &names, search.unwrap_or(""), page, per_page);
    let rendered = out.formatter().format_history(&output)?;
    out.emit(&rendered)
}

fn build_page(
    entries: &[HistoryEntry],
    names: &HashMap<ResourceId, String>,
    search: &str,
    page: usize,
    per_page: usize,
) -> HistoryPageOutput {
    let filtered = filter_history(entries, search);
    let current = Page::of(&filtered, page, per_page);
    HistoryPageOutput {
        entries: current
            .items
            .iter()
            .map(|entry| {
                let connection = entry
                    .api_connection_id
                    .as_ref()
                    .map(|id| names.get(id).cloned().unwrap_or_else(|| id.to_string()));
                HistoryRow::new(entry, connection)
            })
            .collect(),
        page: current.page,
        total_pages: current.total_pages,
        total_items: current.total_items,
        label: current.range_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(n: usize) -> Vec<HistoryEntry> {
        (1..=n)
            .map(|i| {
                serde_json::from_value(json!({
                    "id": i,
                    "user_query": if i % 2 == 0 { format!("repos {i}") } else { format!("weather {i}") },
                    "api_endpoint": "/endpoint",
                    "status": "success",
                    "created_at": "2024-01-01T00:00:00",
                    "api_connection_id": 1
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_build_page_resolves_names() {
        let mut names = HashMap::new();
        names.insert(ResourceId::Int(1), "GitHub".to_string());
        let page = build_page(&entries(3), &names, "", 1, 10);
        assert_eq!(page.entries.len(), 3);
        assert_eq!(page.entries[0].connection.as_deref(), Some("GitHub"));
        assert_eq!(page.label, "Showing 1 to 3 of 3 entries");
    }

    #[test]
    fn test_build_page_filters_then_pages() {
        let page = build_page(&entries(25), &HashMap::new(), "repos", 2, 10);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].connection.as_deref(), Some("1"));
        assert_eq!(page.label, "Showing 11 to 12 of 12 entries");
    }
}
