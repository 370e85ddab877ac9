//! Query history models for `/api/history`.

use serde::{Deserialize, Serialize};

use crate::models::ResourceId;

/// Outcome recorded for a past query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Success,
    Error,
    Pending,
    #[serde(other)]
    Unknown,
}

impl HistoryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Pending => "pending",
            Self::Unknown => "unknown",
        }
    }
}

/// One executed query, newest first from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: ResourceId,
    pub user_query: String,
    /// JSON-encoded interpretation, when the backend includes it.
    #[serde(default)]
    pub interpreted_query: Option<String>,
    #[serde(default)]
    pub api_endpoint: Option<String>,
    pub status: HistoryStatus,
    #[serde(default)]
    pub response_data: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub api_connection_id: Option<ResourceId>,
}

impl HistoryEntry {
    pub fn endpoint(&self) -> &str {
        self.api_endpoint.as_deref().unwrap_or("")
    }

    /// Parsed `interpreted_query`, if present and valid JSON.
    pub fn interpretation(&self) -> Option<serde_json::Value> {
        self.interpreted_query
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_history_shape() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "id": 9,
            "user_query": "Get my repositories",
            "api_endpoint": "https://api.github.com/user/repos",
            "status": "success",
            "created_at": "2024-03-05T14:07:00.123456"
        }))
        .unwrap();
        assert_eq!(entry.status, HistoryStatus::Success);
        assert_eq!(entry.endpoint(), "https://api.github.com/user/repos");
        assert!(entry.interpretation().is_none());
    }

    #[test]
    fn test_unknown_status_and_null_endpoint() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "id": 1,
            "user_query": "q",
            "api_endpoint": null,
            "status": "cancelled",
            "created_at": "2024-03-05T14:07:00"
        }))
        .unwrap();
        assert_eq!(entry.status, HistoryStatus::Unknown);
        assert_eq!(entry.endpoint(), "");
    }

    #[test]
    fn test_interpretation_parses_json_string() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "id": 1,
            "user_query": "q",
            "interpreted_query": "{\"endpoint\":\"/user\",\"method\":\"GET\"}",
            "status": "error",
            "created_at": "2024-03-05T14:07:00"
        }))
        .unwrap();
        assert_eq!(entry.interpretation().unwrap()["endpoint"], json!("/user"));
    }
}
