//! Construction options for [`crate::EmbedClient`].

use std::time::Duration;

use apiconn_client::ResourceId;
use apiconn_config::Config;
use apiconn_config::constants::{DEFAULT_CACHE_EXPIRY_MS, DEFAULT_ORIGIN};
use secrecy::SecretString;

use crate::dom::{Document, ElementId};
use crate::error::{EmbedError, Result};

/// Selector of the script tag that carries auto-initialisation attributes.
pub const SCRIPT_SELECTOR: &str = "script[data-api-key]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Backend origin; `/api/...` paths are appended to it.
    pub base_url: String,
    pub debug: bool,
    pub cache_expiry: Duration,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ORIGIN.to_string(),
            debug: false,
            cache_expiry: Duration::from_millis(DEFAULT_CACHE_EXPIRY_MS),
        }
    }
}

impl EmbedOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.connection.base_url.clone(),
            debug: config.embed.debug,
            cache_expiry: config.embed.cache_expiry,
        }
    }

    /// Read the key and options from the first `script[data-api-key]`.
    ///
    /// Returns `None` when no such script exists. `data-debug` must be exactly
    /// `"true"` to enable logging; a blank `data-base-url` keeps the default.
    pub fn from_script_attributes(document: &Document) -> Result<Option<(SecretString, Self)>> {
        let Some(script) = document.query_selector(SCRIPT_SELECTOR)? else {
            return Ok(None);
        };
        Ok(Some(Self::from_element(document, script)))
    }

    fn from_element(document: &Document, script: ElementId) -> (SecretString, Self) {
        let el = &document[script];
        let api_key = el.attribute("data-api-key").unwrap_or_default();
        let mut options = Self::default();
        if let Some(base) = el.attribute("data-base-url").filter(|b| !b.trim().is_empty()) {
            options.base_url = base.trim().to_string();
        }
        options.debug = el.attribute("data-debug") == Some("true");
        (SecretString::new(api_key.into()), options)
    }

    /// Parse `base_url` as an absolute http(s) URL with a host and strip
    /// trailing slashes.
    pub(crate) fn normalized_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(EmbedError::InvalidOptions("base_url must not be empty".into()));
        }
        let parsed = url::Url::parse(trimmed).map_err(|e| {
            EmbedError::InvalidOptions(format!("base_url '{trimmed}' is not a valid URL: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EmbedError::InvalidOptions(format!(
                "base_url scheme must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(EmbedError::InvalidOptions(format!(
                "base_url '{trimmed}' has no host"
            )));
        }
        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }
}

/// Per-call options for [`crate::EmbedClient::query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Omitted from the request body when `None`.
    pub connection_id: Option<ResourceId>,
    /// Bypass the cache lookup. The fresh result is still stored.
    pub skip_cache: bool,
}

impl QueryOptions {
    pub fn for_connection(id: impl Into<ResourceId>) -> Self {
        Self {
            connection_id: Some(id.into()),
            skip_cache: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults() {
        let opts = EmbedOptions::default();
        assert_eq!(opts.base_url, "http://localhost:8000");
        assert_eq!(opts.cache_expiry, Duration::from_secs(300));
        assert!(!opts.debug);
    }

    #[test]
    fn test_from_script_attributes() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append(
            root,
            Element::new("script")
                .with_attr("src", "/sdk.js")
                .with_attr("data-api-key", "pk_123")
                .with_attr("data-base-url", "https://api.example.com")
                .with_attr("data-debug", "true"),
        );
        let (key, opts) = EmbedOptions::from_script_attributes(&doc).unwrap().unwrap();
        assert_eq!(key.expose_secret(), "pk_123");
        assert_eq!(opts.base_url, "https://api.example.com");
        assert!(opts.debug);
    }

    #[test]
    fn test_debug_requires_exact_true() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append(
            root,
            Element::new("script")
                .with_attr("data-api-key", "k")
                .with_attr("data-debug", "yes"),
        );
        let (_, opts) = EmbedOptions::from_script_attributes(&doc).unwrap().unwrap();
        assert!(!opts.debug);
        assert_eq!(opts.base_url, DEFAULT_ORIGIN);
    }

    #[test]
    fn test_no_script_means_no_auto_init() {
        let doc = Document::new();
        assert!(EmbedOptions::from_script_attributes(&doc).unwrap().is_none());
    }

    #[test]
    fn test_normalized_base_url() {
        let opts = EmbedOptions {
            base_url: "http://localhost:8000//".into(),
            ..Default::default()
        };
        assert_eq!(opts.normalized_base_url().unwrap(), "http://localhost:8000");
        let bad = EmbedOptions {
            base_url: "localhost".into(),
            ..Default::default()
        };
        assert!(matches!(
            bad.normalized_base_url(),
            Err(EmbedError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_normalized_base_url_requires_host_and_http_scheme() {
        for base_url in ["http://", "ftp://files.example.com", "http//x", "localhost:8000"] {
            let opts = EmbedOptions {
                base_url: base_url.into(),
                ..Default::default()
            };
            assert!(
                matches!(opts.normalized_base_url(), Err(EmbedError::InvalidOptions(_))),
                "{base_url} should be rejected"
            );
        }
        let with_path = EmbedOptions {
            base_url: " https://api.example.com/v1/ ".into(),
            ..Default::default()
        };
        assert_eq!(
            with_path.normalized_base_url().unwrap(),
            "https://api.example.com/v1"
        );
    }
}
