//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Resolve the environment's endpoints and apply explicit overrides on top.
//! - Validate the merged values and build the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Persisting UI preferences (see persistence module).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_CACHE_EXPIRY_MS, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use crate::environment::{EndpointOverrides, Environment};
use crate::types::{Config, ConnectionConfig, EmbedSettings};

/// Configuration loader that builds config from environment variables and CLI overrides.
#[derive(Default)]
pub struct ConfigLoader {
    environment: Option<Environment>,
    base_url: Option<String>,
    api_url: Option<String>,
    ws_url: Option<String>,
    origin: Option<String>,
    api_key: Option<SecretString>,
    timeout: Option<Duration>,
    cache_expiry: Option<Duration>,
    debug: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(dotenvy::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                Ok(self)
            }
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Read configuration from environment variables.
    ///
    /// Values already set through builder methods are kept.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Select the deployment environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set the backend base URL, bypassing environment resolution.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the API key sent as a bearer credential.
    pub fn with_api_key(mut self, key: String) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the embed SDK cache expiry.
    pub fn with_cache_expiry(mut self, expiry: Duration) -> Self {
        self.cache_expiry = Some(expiry);
        self
    }

    /// Enable or disable SDK debug logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let environment = self.environment.unwrap_or_default();
        let overrides = EndpointOverrides {
            api_url: self.api_url,
            ws_url: self.ws_url,
            origin: self.origin,
        };
        let endpoints = environment.endpoints(&overrides);

        let base_url = validate_and_normalize_base_url(
            self.base_url.as_deref().unwrap_or(&endpoints.api_base_url),
        )?;
        let ws_url = validate_ws_url(&endpoints.ws_base_url)?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        validate_timeout(timeout)?;

        tracing::info!(
            environment = %environment,
            base_url = %base_url,
            "Resolved API configuration"
        );

        Ok(Config {
            environment,
            connection: ConnectionConfig {
                base_url,
                ws_url,
                timeout,
                api_key: self.api_key,
            },
            embed: EmbedSettings {
                cache_expiry: self
                    .cache_expiry
                    .unwrap_or(Duration::from_millis(DEFAULT_CACHE_EXPIRY_MS)),
                debug: self.debug.unwrap_or(false),
            },
        })
    }

    // Internal accessors for env.rs; builder values win over the environment.

    pub(crate) fn set_environment_if_unset(&mut self, environment: Environment) {
        self.environment.get_or_insert(environment);
    }

    pub(crate) fn set_base_url_if_unset(&mut self, url: String) {
        self.base_url.get_or_insert(url);
    }

    pub(crate) fn set_api_url(&mut self, url: String) {
        self.api_url = Some(url);
    }

    pub(crate) fn set_ws_url(&mut self, url: String) {
        self.ws_url = Some(url);
    }

    pub(crate) fn set_origin(&mut self, origin: String) {
        self.origin = Some(origin);
    }

    pub(crate) fn set_api_key_if_unset(&mut self, key: SecretString) {
        self.api_key.get_or_insert(key);
    }

    pub(crate) fn set_timeout_if_unset(&mut self, timeout: Duration) {
        self.timeout.get_or_insert(timeout);
    }

    pub(crate) fn set_cache_expiry_if_unset(&mut self, expiry: Duration) {
        self.cache_expiry.get_or_insert(expiry);
    }

    pub(crate) fn set_debug_if_unset(&mut self, debug: bool) {
        self.debug.get_or_insert(debug);
    }
}

fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    let secs = timeout.as_secs();
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            message: "timeout must be greater than 0 seconds".to_string(),
        });
    }
    if secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!(
                "timeout exceeds maximum allowed value of {} seconds",
                MAX_TIMEOUT_SECS
            ),
        });
    }
    Ok(())
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Blank values are treated as missing
/// - Must parse as an absolute http(s) URL with a host
/// - Trailing slashes are stripped
pub(crate) fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. http://localhost:5001): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. http://localhost:5001)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

fn validate_ws_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        var: "ws_url".into(),
        message: format!("must be an absolute ws(s) URL: {e}"),
    })?;
    if !matches!(parsed.scheme(), "ws" | "wss") {
        return Err(ConfigError::InvalidValue {
            var: "ws_url".into(),
            message: format!("scheme must be ws or wss, got: {}", parsed.scheme()),
        });
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
