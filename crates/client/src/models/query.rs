//! Natural-language query models for `/api/query`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ResourceId;

/// Body of `POST /api/query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub query: String,
    pub connection_id: ResourceId,
}

/// How the backend translated the question into an upstream call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Interpretation {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub filters: Value,
}

fn default_method() -> String {
    "GET".to_string()
}

impl Interpretation {
    /// `GET /user/repos` style summary.
    pub fn summary(&self) -> String {
        format!("{} {}", self.method, self.endpoint)
    }
}

/// Response of `POST /api/query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub interpretation: Option<Interpretation>,
    #[serde(default)]
    pub query_id: Option<ResourceId>,
}
