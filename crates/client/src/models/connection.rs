//! Connection models for the `/api/connections` and `/api/test-connection` endpoints.

use std::fmt;

use apiconn_config::constants::DEFAULT_API_KEY_HEADER;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::models::ResourceId;

/// How the backend authenticates against the upstream API.
///
/// Values the dashboard does not know (for example `oauth`) are kept as
/// [`AuthType::Other`] rather than failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthType {
    ApiKey,
    Bearer,
    Basic,
    None,
    Other(String),
}

impl AuthType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ApiKey => "api_key",
            Self::Bearer => "bearer",
            Self::Basic => "basic",
            Self::None => "none",
            Self::Other(s) => s,
        }
    }

    /// Next type a connection can be created with, used by form cyclers.
    pub fn cycle_next(&self) -> Self {
        match self {
            Self::ApiKey => Self::Bearer,
            Self::Bearer => Self::Basic,
            Self::Basic => Self::None,
            Self::None | Self::Other(_) => Self::ApiKey,
        }
    }
}

impl From<String> for AuthType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "api_key" => Self::ApiKey,
            "bearer" => Self::Bearer,
            "basic" => Self::Basic,
            "none" => Self::None,
            _ => Self::Other(value),
        }
    }
}

impl From<AuthType> for String {
    fn from(value: AuthType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A saved upstream API connection as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ResourceId,
    pub name: String,
    pub base_url: String,
    pub auth_type: AuthType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Credentials entered when creating or testing a connection.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey { key: String, header: Option<String> },
    Bearer { token: String },
    Basic,
    None,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("key", &"<redacted>")
                .field("header", header)
                .finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
            Self::Basic => f.write_str("Basic"),
            Self::None => f.write_str("None"),
        }
    }
}

impl Credentials {
    pub fn auth_type(&self) -> AuthType {
        match self {
            Self::ApiKey { .. } => AuthType::ApiKey,
            Self::Bearer { .. } => AuthType::Bearer,
            Self::Basic => AuthType::Basic,
            Self::None => AuthType::None,
        }
    }

    /// `auth_data` object in the shape the backend expects.
    ///
    /// `api_key` yields `{api_key, api_key_header}` with the header defaulting
    /// to `X-API-Key`; `bearer` yields `{token}`; the rest yield `{}`.
    pub fn auth_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        match self {
            Self::ApiKey { key, header } => {
                let header = header
                    .as_deref()
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .unwrap_or(DEFAULT_API_KEY_HEADER);
                data.insert("api_key".into(), Value::String(key.clone()));
                data.insert("api_key_header".into(), Value::String(header.to_string()));
            }
            Self::Bearer { token } => {
                data.insert("token".into(), Value::String(token.clone()));
            }
            Self::Basic | Self::None => {}
        }
        data
    }
}

/// Body of `POST /api/connections`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewConnection {
    pub name: String,
    pub base_url: String,
    pub auth_type: AuthType,
    pub auth_data: Map<String, Value>,
    pub headers: Map<String, Value>,
}

impl NewConnection {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            name: name.into().trim().to_string(),
            base_url: base_url.into().trim().to_string(),
            auth_type: credentials.auth_type(),
            auth_data: credentials.auth_data(),
            headers: Map::new(),
        }
    }

    /// Reject blank required fields before anything is sent.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ClientError::InvalidRequest("name is required".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "base_url is required".to_string(),
            ));
        }
        Ok(())
    }

    /// The subset sent to `POST /api/test-connection`.
    pub fn as_test(&self) -> ConnectionTest {
        ConnectionTest {
            base_url: self.base_url.clone(),
            auth_type: self.auth_type.clone(),
            auth_data: self.auth_data.clone(),
            headers: self.headers.clone(),
        }
    }
}

/// Body of `POST /api/test-connection`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionTest {
    pub base_url: String,
    pub auth_type: AuthType,
    pub auth_data: Map<String, Value>,
    pub headers: Map<String, Value>,
}

/// Response of `POST /api/connections`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatedConnection {
    pub id: ResourceId,
    pub name: String,
    pub message: String,
}

/// Response of `POST /api/test-connection`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TestConnectionResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub test_endpoint: Option<String>,
}

impl TestConnectionResult {
    /// One-line summary for toasts and CLI output.
    pub fn summary(&self) -> String {
        if self.success {
            self.message
                .clone()
                .unwrap_or_else(|| "Connection test successful!".to_string())
        } else {
            format!(
                "Connection test failed: {}",
                self.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}
