//! Connection configuration types for API Connector.
//!
//! Responsibilities:
//! - Define backend connection settings (base URLs, timeout, API key).
//! - Define embed SDK settings (cache expiry, debug logging).
//! - Define the top-level `Config` combining both with the environment.
//!
//! Does NOT handle:
//! - Loading from `.env` or environment variables (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - `Config::default()` targets the production default origin with no API key.
//! - Durations are serialized as whole seconds (timeout) or milliseconds (cache expiry).

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CACHE_EXPIRY_MS, DEFAULT_TIMEOUT_SECS};
use crate::environment::{EndpointOverrides, Environment};

mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

/// Connection settings for the proxy backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the backend (e.g., http://localhost:5001)
    pub base_url: String,
    /// WebSocket base URL (resolved for completeness; no socket client ships yet)
    pub ws_url: String,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Key sent as a bearer credential, if any
    #[serde(skip)]
    pub api_key: Option<SecretString>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        let endpoints = Environment::Production.endpoints(&EndpointOverrides::default());
        Self {
            base_url: endpoints.api_base_url,
            ws_url: endpoints.ws_base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: None,
        }
    }
}

/// Embed SDK behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedSettings {
    /// How long a cached query result stays fresh (serialized as milliseconds)
    #[serde(with = "duration_millis")]
    pub cache_expiry: Duration,
    /// Emit SDK debug logs
    pub debug: bool,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            cache_expiry: Duration::from_millis(DEFAULT_CACHE_EXPIRY_MS),
            debug: false,
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub connection: ConnectionConfig,
    pub embed: EmbedSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.connection.base_url, "http://localhost:8000");
        assert_eq!(config.connection.timeout, Duration::from_secs(30));
        assert!(config.connection.api_key.is_none());
        assert_eq!(config.embed.cache_expiry, Duration::from_millis(300_000));
        assert!(!config.embed.debug);
    }

    #[test]
    fn test_serialized_config_omits_api_key() {
        let mut config = Config::default();
        config.connection.api_key = Some(SecretString::new("super-secret".to_string().into()));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("\"timeout\":30"));
        assert!(json.contains("\"cache_expiry\":300000"));
    }
}
