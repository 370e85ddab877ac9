//! Runtime environment and backend endpoint resolution.
//!
//! Responsibilities:
//! - Decide between development and production targets.
//! - Produce the API and WebSocket base URLs for the selected target.
//! - Name the backend endpoint paths and default request headers.
//!
//! Does NOT handle:
//! - Reading `.env` files or validating URLs (see the `loader` module).
//! - Issuing requests (see `crates/client`).
//!
//! Invariants:
//! - Development always targets `localhost:5001`; overrides only apply in production.
//! - Production falls back to the configured origin, and the WebSocket URL is
//!   derived as `ws://<host>` from that origin when not set explicitly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ORIGIN, DEVELOPMENT_API_URL, DEVELOPMENT_WS_URL};

/// Backend endpoint paths, relative to the API base URL.
pub mod paths {
    pub const CONNECTIONS: &str = "/api/connections";
    pub const PROVIDERS: &str = "/api/providers";
    pub const PROVIDER_CATEGORIES: &str = "/api/providers/categories";
    pub const PROVIDER_SEARCH: &str = "/api/providers/search";
    pub const QUERY: &str = "/api/query";
    pub const HISTORY: &str = "/api/history";
    pub const TEST_CONNECTION: &str = "/api/test-connection";
    pub const SETTINGS: &str = "/api/settings";
    pub const API_KEYS: &str = "/api/api-keys";
}

/// Headers sent with every JSON request.
pub const DEFAULT_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Accept", "application/json"),
];

/// Deployment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Read the environment from `APICONN_ENV`, then `NODE_ENV`.
    ///
    /// Unset or unrecognised values select production. The config loader
    /// uses [`Environment::from_env_strict`] and rejects a bad `APICONN_ENV`.
    pub fn from_env() -> Self {
        Self::from_env_strict().ok().flatten().unwrap_or_default()
    }

    /// Like [`Environment::from_env`], but an unrecognised `APICONN_ENV` is an
    /// error. `NODE_ENV` is shared with other tools (`test` is common), so an
    /// unrecognised value there is ignored.
    ///
    /// Returns `Ok(None)` when neither variable names an environment.
    pub fn from_env_strict() -> Result<Option<Self>, String> {
        if let Some(value) = crate::env_var_or_none("APICONN_ENV") {
            return value.parse().map(Some);
        }
        Ok(crate::env_var_or_none("NODE_ENV").and_then(|value| value.parse().ok()))
    }

    /// Resolve base URLs for this environment.
    pub fn endpoints(self, overrides: &EndpointOverrides) -> ApiEndpoints {
        match self {
            Self::Development => ApiEndpoints {
                api_base_url: DEVELOPMENT_API_URL.to_string(),
                ws_base_url: DEVELOPMENT_WS_URL.to_string(),
            },
            Self::Production => {
                let origin = overrides
                    .origin
                    .as_deref()
                    .unwrap_or(DEFAULT_ORIGIN)
                    .trim_end_matches('/');
                let api_base_url = overrides
                    .api_url
                    .clone()
                    .unwrap_or_else(|| origin.to_string());
                let ws_base_url = overrides
                    .ws_url
                    .clone()
                    .unwrap_or_else(|| format!("ws://{}", host_of(origin)));
                ApiEndpoints {
                    api_base_url,
                    ws_base_url,
                }
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Production-only URL overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointOverrides {
    pub api_url: Option<String>,
    pub ws_url: Option<String>,
    pub origin: Option<String>,
}

/// Resolved base URLs for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub api_base_url: String,
    pub ws_base_url: String,
}

/// `host[:port]` portion of an origin such as `https://example.com:8443`.
fn host_of(origin: &str) -> &str {
    let without_scheme = origin
        .split_once("://")
        .map_or(origin, |(_, rest)| rest);
    without_scheme.split('/').next().unwrap_or(without_scheme)
}
