//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `APICONN_*` environment variables.
//! - Apply them to a `ConfigLoader` without clobbering builder values.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid numeric or boolean values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::environment::Environment;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

fn parse_u64(var: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: "must be a number".to_string(),
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let environment = Environment::from_env_strict().map_err(|message| ConfigError::InvalidValue {
        var: "APICONN_ENV".to_string(),
        message,
    })?;
    if let Some(environment) = environment {
        loader.set_environment_if_unset(environment);
    }
    if let Some(url) = env_var_or_none("APICONN_BASE_URL") {
        loader.set_base_url_if_unset(url);
    }
    if let Some(url) = env_var_or_none("APICONN_API_URL") {
        loader.set_api_url(url);
    }
    if let Some(url) = env_var_or_none("APICONN_WS_URL") {
        loader.set_ws_url(url);
    }
    if let Some(origin) = env_var_or_none("APICONN_ORIGIN") {
        loader.set_origin(origin);
    }
    if let Some(key) = env_var_or_none("APICONN_API_KEY") {
        loader.set_api_key_if_unset(SecretString::new(key.into()));
    }
    if let Some(timeout) = env_var_or_none("APICONN_TIMEOUT") {
        let secs = parse_u64("APICONN_TIMEOUT", &timeout)?;
        loader.set_timeout_if_unset(Duration::from_secs(secs));
    }
    if let Some(expiry) = env_var_or_none("APICONN_CACHE_EXPIRY_MS") {
        let millis = parse_u64("APICONN_CACHE_EXPIRY_MS", &expiry)?;
        loader.set_cache_expiry_if_unset(Duration::from_millis(millis));
    }
    if let Some(debug) = env_var_or_none("APICONN_DEBUG") {
        loader.set_debug_if_unset(parse_bool("APICONN_DEBUG", &debug)?);
    }
    Ok(())
}
