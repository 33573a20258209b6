//! Query cache: string-keyed server-state mirror
//!
//! Backed by Moka with TTL-based expiration. Keys are resource-type
//! strings (`goals`) for lists and `<kind>/<id>` (`goals/7`) for single
//! records; values are stored as JSON so one cache serves all nine
//! resources. Cloning a `QueryCache` shares the underlying entries -
//! every store handle built from the same cache sees the same data.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use moka::future::Cache;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use horizon_core::ResourceKind;

/// Configuration for the query cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries.
    pub max_entries: u64,
    /// Time-to-live for cached entries.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

/// A snapshot of one cache entry, as taken before an optimistic
/// mutation. `None` records that the key was absent.
pub type Snapshot = Option<Arc<Value>>;

/// Shared, string-keyed cache of server state.
#[derive(Debug, Clone)]
pub struct QueryCache {
    entries: Cache<String, Arc<Value>>,
    /// Keys ever written, so a kind-wide invalidation can find the item
    /// entries that belong to it.
    keys: Arc<Mutex<HashSet<String>>>,
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.ttl)
                .build(),
            keys: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Cache with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// List key for a kind.
    pub fn list_key(kind: ResourceKind) -> String {
        kind.cache_key().to_string()
    }

    /// Item key for one record of a kind.
    pub fn item_key(kind: ResourceKind, id: i64) -> String {
        format!("{}/{}", kind.cache_key(), id)
    }

    /// Typed read of an entry.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key).await?;
        match serde_json::from_value(value.as_ref().clone()) {
            Ok(typed) => Some(typed),
            Err(e) => {
                // A shape mismatch means a stale or foreign entry; treat
                // as a miss rather than an error.
                tracing::warn!(key, error = %e, "Cache entry did not decode; ignoring");
                None
            }
        }
    }

    /// Typed write of an entry.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.keys.lock().unwrap().insert(key.to_string());
                self.entries.insert(key.to_string(), Arc::new(json)).await;
            }
            Err(e) => tracing::warn!(key, error = %e, "Value did not serialize; not cached"),
        }
    }

    /// Raw value of an entry, for snapshot/restore around mutations.
    pub async fn snapshot(&self, key: &str) -> Snapshot {
        self.entries.get(key).await
    }

    /// Put an entry back exactly as a snapshot recorded it.
    pub async fn restore(&self, key: &str, snapshot: Snapshot) {
        match snapshot {
            Some(value) => self.entries.insert(key.to_string(), value).await,
            None => self.entries.invalidate(key).await,
        }
    }

    /// Drop one entry.
    pub async fn invalidate(&self, key: &str) {
        self.entries.invalidate(key).await;
    }

    /// Drop a kind's list entry and every one of its item entries.
    pub async fn invalidate_kind(&self, kind: ResourceKind) {
        let prefix = format!("{}/", kind.cache_key());
        let keys: Vec<String> = {
            let known = self.keys.lock().unwrap();
            known
                .iter()
                .filter(|k| *k == kind.cache_key() || k.starts_with(&prefix))
                .cloned()
                .collect()
        };
        for key in keys {
            self.entries.invalidate(&key).await;
        }
        tracing::debug!(kind = %kind, "Invalidated cached entries");
    }

    /// Drop everything.
    pub async fn clear(&self) {
        self.entries.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn typed_round_trip() {
        let cache = QueryCache::with_defaults();
        cache.put("goals", &vec![1, 2, 3]).await;
        assert_eq!(cache.get::<Vec<i32>>("goals").await, Some(vec![1, 2, 3]));
        assert_eq!(cache.get::<Vec<i32>>("visions").await, None);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = QueryCache::with_defaults();
        let other = cache.clone();
        cache.put("goals", &vec![1]).await;
        assert_eq!(other.get::<Vec<i32>>("goals").await, Some(vec![1]));
    }

    #[tokio::test]
    async fn restore_of_absent_snapshot_removes_the_entry() {
        let cache = QueryCache::with_defaults();
        let before = cache.snapshot("goals").await;
        assert!(before.is_none());

        cache.put("goals", &vec![1]).await;
        cache.restore("goals", before).await;
        assert_eq!(cache.get::<Vec<i32>>("goals").await, None);
    }

    #[tokio::test]
    async fn kind_invalidation_takes_item_entries_with_it() {
        let cache = QueryCache::with_defaults();
        cache.put("goals", &vec![1]).await;
        cache.put("goals/7", &7).await;
        cache.put("kpis", &vec![2]).await;

        cache.invalidate_kind(horizon_core::ResourceKind::Goal).await;

        assert_eq!(cache.get::<Vec<i32>>("goals").await, None);
        assert_eq!(cache.get::<i32>("goals/7").await, None);
        assert_eq!(cache.get::<Vec<i32>>("kpis").await, Some(vec![2]));
    }
}
