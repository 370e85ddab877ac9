//! Time-bounded query result cache.
//!
//! Responsibilities:
//! - Store the parsed response of each query under `query_<text>`.
//! - Answer lookups only while `now - stored_at < expiry`.
//!
//! Does NOT handle:
//! - Active expiry. A stale entry stays until it is overwritten or the cache
//!   is cleared; lookups simply ignore it.
//! - Scoping by connection. The key is the query text alone, so the same text
//!   sent for two connections shares one entry.
//!
//! Invariants:
//! - Changing the expiry applies to entries already stored.
//! - At most [`MAX_ENTRIES`] entries are kept; the least recently used go first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use moka::future::Cache;
use serde_json::Value;

/// Upper bound on stored queries.
pub const MAX_ENTRIES: u64 = 1_000;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    stored_at: Instant,
}

pub struct QueryCache {
    entries: Cache<String, CacheEntry>,
    expiry_ms: AtomicU64,
}

impl QueryCache {
    pub fn new(expiry: Duration) -> Self {
        Self {
            entries: Cache::builder().max_capacity(MAX_ENTRIES).build(),
            expiry_ms: AtomicU64::new(expiry.as_millis() as u64),
        }
    }

    /// Cache key for a query text.
    pub fn key_for(query: &str) -> String {
        format!("query_{}", query)
    }

    pub fn expiry(&self) -> Duration {
        Duration::from_millis(self.expiry_ms.load(Ordering::Relaxed))
    }

    pub fn set_expiry(&self, expiry: Duration) {
        self.expiry_ms
            .store(expiry.as_millis() as u64, Ordering::Relaxed);
    }

    /// The stored result for `query` if it is younger than the expiry.
    pub async fn get_fresh(&self, query: &str) -> Option<Value> {
        let entry = self.entries.get(&Self::key_for(query)).await?;
        (entry.stored_at.elapsed() < self.expiry()).then_some(entry.data)
    }

    /// Whether an entry exists for `query`, fresh or stale.
    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(&Self::key_for(query))
    }

    pub async fn insert(&self, query: &str, data: Value) {
        self.entries
            .insert(
                Self::key_for(query),
                CacheEntry {
                    data,
                    stored_at: Instant::now(),
                },
            )
            .await;
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("expiry", &self.expiry())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_is_query_text_only() {
        assert_eq!(QueryCache::key_for("Get posts"), "query_Get posts");
    }

    #[tokio::test]
    async fn test_fresh_hit() {
        let cache = QueryCache::new(Duration::from_secs(300));
        cache.insert("Get posts", json!({"result": [1, 2]})).await;
        assert_eq!(
            cache.get_fresh("Get posts").await,
            Some(json!({"result": [1, 2]}))
        );
        assert!(cache.get_fresh("Get pages").await.is_none());
    }

    #[tokio::test]
    async fn test_stale_entry_is_ignored_but_kept() {
        let cache = QueryCache::new(Duration::from_millis(10));
        cache.insert("q", json!(1)).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get_fresh("q").await.is_none());
        assert!(cache.contains("q"));

        cache.set_expiry(Duration::from_secs(60));
        assert_eq!(cache.get_fresh("q").await, Some(json!(1)));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = QueryCache::new(Duration::from_secs(300));
        cache.insert("q", json!(1)).await;
        cache.clear();
        assert!(cache.get_fresh("q").await.is_none());
    }
}
