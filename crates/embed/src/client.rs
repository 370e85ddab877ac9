//! The embed SDK client.
//!
//! Responsibilities:
//! - Send natural-language queries to `POST /api/query` with a bearer key.
//! - Serve repeated queries from the [`QueryCache`] while fresh.
//! - Emit `querySuccess` / `queryError` to registered listeners.
//!
//! Does NOT handle:
//! - Timeouts or retries. A query waits as long as the transport does.
//! - Reading the body of failed responses; only the status is reported.
//!
//! Invariants:
//! - Listeners observe a query's outcome before the caller does.
//! - Only successful responses are cached.

use std::fmt;
use std::time::{Duration, Instant};

use apiconn_client::{MetricsCollector, ResourceId};
use apiconn_config::environment::paths;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::QueryCache;
use crate::dom::Document;
use crate::error::{EmbedError, Result};
use crate::events::{EmbedEvent, EventKind, EventRegistry};
use crate::options::{EmbedOptions, QueryOptions};

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    connection_id: Option<&'a ResourceId>,
}

/// Owns the cache and the listener registry for one page.
///
/// `EmbedClient` is `Send + Sync`; share it behind an `Arc` when bindings run
/// on several tasks.
pub struct EmbedClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    debug: bool,
    cache: QueryCache,
    events: EventRegistry,
    metrics: Option<MetricsCollector>,
}

impl fmt::Debug for EmbedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedClient")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl EmbedClient {
    pub fn new(api_key: SecretString, options: EmbedOptions) -> Result<Self> {
        let base_url = options.normalized_base_url()?;
        let http = reqwest::Client::builder().build()?;
        let client = Self {
            http,
            api_key,
            base_url,
            debug: options.debug,
            cache: QueryCache::new(options.cache_expiry),
            events: EventRegistry::new(),
            metrics: None,
        };
        client.log(format_args!("Initialized with base URL {}", client.base_url));
        Ok(client)
    }

    /// Record cache hits and misses through `metrics`.
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build a client from the page's `script[data-api-key]` tag, if present.
    pub fn auto_init(document: &Document) -> Result<Option<Self>> {
        match EmbedOptions::from_script_attributes(document)? {
            Some((key, options)) => Self::new(key, options).map(Some),
            None => Ok(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn log(&self, message: fmt::Arguments<'_>) {
        if self.debug {
            debug!("[API Connector AI] {}", message);
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn on<F>(&self, kind: EventKind, callback: F)
    where
        F: Fn(&EmbedEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, callback);
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Resolve `text` to the backend's JSON response.
    ///
    /// A fresh cache entry for the same text is returned without a request,
    /// whatever `connection_id` is given.
    pub async fn query(&self, text: &str, options: &QueryOptions) -> Result<Value> {
        if !options.skip_cache {
            let cached = self.cache.get_fresh(text).await;
            if let Some(metrics) = &self.metrics {
                metrics.record_cache_lookup(cached.is_some());
            }
            if let Some(data) = cached {
                self.log(format_args!("Cache hit for query: {text}"));
                return Ok(data);
            }
        }

        self.log(format_args!("Executing query: {text}"));
        match self.send_query(text, options.connection_id.as_ref()).await {
            Ok(data) => {
                self.cache.insert(text, data.clone()).await;
                self.events.emit(&EmbedEvent::QuerySuccess {
                    query: text.to_string(),
                    data: data.clone(),
                });
                Ok(data)
            }
            Err(err) => {
                self.log(format_args!("Query failed: {err}"));
                self.events.emit(&EmbedEvent::QueryError {
                    query: text.to_string(),
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn send_query(&self, text: &str, connection_id: Option<&ResourceId>) -> Result<Value> {
        let started = Instant::now();
        let response = self
            .http
            .post(self.url(paths::QUERY))
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(self.api_key.expose_secret())
            .json(&QueryBody {
                query: text,
                connection_id,
            })
            .send()
            .await?;
        self.log(format_args!(
            "Query response {} in {:?}",
            response.status(),
            started.elapsed()
        ));
        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(EmbedError::Http {
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| EmbedError::Decode(e.to_string()))
    }

    /// `GET /api/connections`, authenticated.
    pub async fn get_connections(&self) -> Result<Value> {
        let response = self
            .http
            .get(self.url(paths::CONNECTIONS))
            .header(ACCEPT, "application/json")
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// `GET /api/providers`, optionally filtered by category.
    ///
    /// This call is sent without the API key.
    pub async fn get_providers(&self, category: Option<&str>) -> Result<Value> {
        let mut request = self
            .http
            .get(self.url(paths::PROVIDERS))
            .header(ACCEPT, "application/json");
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            request = request.query(&[("category", category)]);
        }
        Self::read_json(request.send().await?).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        self.log(format_args!("Cache cleared"));
    }

    pub fn set_cache_expiry(&self, expiry: Duration) {
        self.cache.set_expiry(expiry);
        self.log(format_args!("Cache expiry set to {expiry:?}"));
    }

    pub fn cache_expiry(&self) -> Duration {
        self.cache.expiry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_client_is_send_sync() {
        assert_send_sync::<EmbedClient>();
    }

    #[test]
    fn test_query_body_omits_missing_connection() {
        let body = serde_json::to_value(QueryBody {
            query: "Get posts",
            connection_id: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"query": "Get posts"}));

        let id = ResourceId::Int(3);
        let body = serde_json::to_value(QueryBody {
            query: "Get posts",
            connection_id: Some(&id),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"query": "Get posts", "connection_id": 3}));
    }

    #[test]
    fn test_debug_output_hides_key() {
        let client = EmbedClient::new(
            SecretString::new("pk_secret".into()),
            EmbedOptions::default(),
        )
        .unwrap();
        assert!(!format!("{client:?}").contains("pk_secret"));
    }

    #[test]
    fn test_auto_init() {
        let mut doc = Document::new();
        assert!(EmbedClient::auto_init(&doc).unwrap().is_none());

        let root = doc.root();
        doc.append(
            root,
            Element::new("script")
                .with_attr("data-api-key", "pk")
                .with_attr("data-base-url", "https://api.example.com/"),
        );
        let client = EmbedClient::auto_init(&doc).unwrap().unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert!(!client.is_debug());
    }

    #[test]
    fn test_set_cache_expiry() {
        let client = EmbedClient::new(SecretString::new("k".into()), EmbedOptions::default()).unwrap();
        assert_eq!(client.cache_expiry(), Duration::from_secs(300));
        client.set_cache_expiry(Duration::from_secs(1));
        assert_eq!(client.cache_expiry(), Duration::from_secs(1));
    }
}
