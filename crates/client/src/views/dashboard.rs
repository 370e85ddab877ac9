//! Dashboard statistics derived from history, connections and providers.

use apiconn_config::constants::RECENT_ACTIVITY_LIMIT;

use crate::models::{Connection, HistoryEntry, HistoryStatus, NotificationKind, Provider};
use crate::views::format_timestamp;

/// One line of the recent activity feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityItem {
    pub kind: NotificationKind,
    pub message: String,
    /// Display time, empty for system summary lines.
    pub time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_queries: usize,
    pub successful_queries: usize,
    pub failed_queries: usize,
    /// Whole percent; 100 when no queries have run.
    pub success_rate: u32,
    /// Percent rounded to two decimals; 0 when no queries have run.
    pub error_rate: f64,
    pub active_connections: usize,
    pub providers_available: usize,
    pub recent_activity: Vec<ActivityItem>,
}

impl DashboardStats {
    pub fn compute(
        history: &[HistoryEntry],
        connections: &[Connection],
        providers: &[Provider],
    ) -> Self {
        let total_queries = history.len();
        let successful_queries = history
            .iter()
            .filter(|h| h.status == HistoryStatus::Success)
            .count();
        let failed_queries = history
            .iter()
            .filter(|h| h.status == HistoryStatus::Error)
            .count();

        let (success_rate, error_rate) = if total_queries == 0 {
            (100, 0.0)
        } else {
            let total = total_queries as f64;
            let success = (successful_queries as f64 / total * 100.0).round() as u32;
            let error = (failed_queries as f64 / total * 100.0 * 100.0).round() / 100.0;
            (success, error)
        };

        Self {
            total_queries,
            successful_queries,
            failed_queries,
            success_rate,
            error_rate,
            active_connections: connections.len(),
            providers_available: providers.len(),
            recent_activity: recent_activity(history, connections.len(), providers.len()),
        }
    }

    /// Error rate above 10% is flagged on the dashboard.
    pub fn has_high_error_rate(&self) -> bool {
        self.error_rate > 10.0
    }
}

/// Latest queries, preceded by an active-connections line and followed by a
/// providers line when either count is non-zero.
fn recent_activity(
    history: &[HistoryEntry],
    connection_count: usize,
    provider_count: usize,
) -> Vec<ActivityItem> {
    let mut items = Vec::with_capacity(RECENT_ACTIVITY_LIMIT + 2);

    if connection_count > 0 {
        items.push(ActivityItem {
            kind: NotificationKind::Info,
            message: format!(
                "{} API connection{} active and monitoring",
                connection_count,
                if connection_count > 1 { "s" } else { "" }
            ),
            time: String::new(),
        });
    }

    for entry in history.iter().take(RECENT_ACTIVITY_LIMIT) {
        let ok = entry.status == HistoryStatus::Success;
        items.push(ActivityItem {
            kind: if ok {
                NotificationKind::Success
            } else {
                NotificationKind::Error
            },
            message: format!(
                "Query: \"{}\" - {}",
                entry.user_query,
                if ok {
                    "Completed successfully"
                } else {
                    "Failed to execute"
                }
            ),
            time: format_timestamp(&entry.created_at),
        });
    }

    if provider_count > 0 {
        items.push(ActivityItem {
            kind: NotificationKind::Info,
            message: format!("{} API providers available for connection", provider_count),
            time: String::new(),
        });
    }

    items
}
