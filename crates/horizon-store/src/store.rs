//! Optimistic per-resource stores
//!
//! One store per resource kind, wrapping a [`ResourceClient`] and the
//! shared [`QueryCache`]. Reads serve from cache when they can. Mutations
//! follow the snapshot / apply / confirm-or-rollback shape:
//!
//! - snapshot the affected cache entries,
//! - apply the change to the cache immediately (a created record shows
//!   up with a temporary negative id before the server has answered),
//! - on success, invalidate so the next read refetches authoritative
//!   data; on failure, restore the snapshots exactly.
//!
//! Kinds with invalidation edges (KPIs, obstacles) also invalidate their
//! related kind on success, since goal progress is server-derived.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use horizon_api::{ApiError, ResourceClient, RestClient};
use horizon_core::{Execution, Goal, GoalStatus, Resource};

use crate::cache::QueryCache;

/// Temporary id for a record that only exists in the cache. Negative, so
/// it can never collide with a server-assigned id.
fn temp_id() -> i64 {
    -i64::from(rand::random::<u32>()) - 1
}

/// Cached, optimistic access to one resource kind.
#[derive(Debug)]
pub struct ResourceStore<R: Resource, C: ResourceClient<R>> {
    client: C,
    cache: QueryCache,
    hits: AtomicU64,
    misses: AtomicU64,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Resource, C: ResourceClient<R>> ResourceStore<R, C> {
    pub fn new(client: C, cache: QueryCache) -> Self {
        Self {
            client,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            _kind: PhantomData,
        }
    }

    /// Cache hit/miss counts for this store's reads.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    fn list_key() -> String {
        QueryCache::list_key(R::KIND)
    }

    fn item_key(id: i64) -> String {
        QueryCache::item_key(R::KIND, id)
    }

    /// All records of this kind, from cache when present.
    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        let key = Self::list_key();
        if let Some(cached) = self.cache.get::<Vec<R>>(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key, "Cache hit");
            return Ok(cached);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let fresh = self.client.list().await?;
        self.cache.put(&key, &fresh).await;
        Ok(fresh)
    }

    /// One record, from cache when present.
    pub async fn get(&self, id: i64) -> Result<R, ApiError> {
        let key = Self::item_key(id);
        if let Some(cached) = self.cache.get::<R>(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(cached);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let fresh = self.client.get(id).await?;
        self.cache.put(&key, &fresh).await;
        Ok(fresh)
    }

    /// Create a record. The cached list (when present) carries a
    /// provisional copy with a temporary id until the server confirms.
    pub async fn create(&self, draft: R::Draft) -> Result<R, ApiError> {
        let key = Self::list_key();
        let snapshot = self.cache.snapshot(&key).await;

        if let Some(mut list) = self.cache.get::<Vec<R>>(&key).await {
            let provisional = R::synthesize(&draft, temp_id(), Utc::now());
            list.push(provisional);
            self.cache.put(&key, &list).await;
        }

        match self.client.create(&draft).await {
            Ok(created) => {
                self.cache.invalidate(&key).await;
                self.invalidate_related().await;
                tracing::debug!(kind = %R::KIND, id = created.id(), "Created");
                Ok(created)
            }
            Err(e) => {
                self.cache.restore(&key, snapshot).await;
                tracing::debug!(kind = %R::KIND, error = %e, "Create failed; cache rolled back");
                Err(e)
            }
        }
    }

    /// Patch a record. Both the cached list and the cached item reflect
    /// the patch immediately; the authoritative record is written through
    /// on success.
    pub async fn update(&self, id: i64, patch: R::Patch) -> Result<R, ApiError> {
        let list_key = Self::list_key();
        let item_key = Self::item_key(id);
        let list_snapshot = self.cache.snapshot(&list_key).await;
        let item_snapshot = self.cache.snapshot(&item_key).await;

        if let Some(mut list) = self.cache.get::<Vec<R>>(&list_key).await {
            for record in list.iter_mut().filter(|r| r.id() == id) {
                record.apply_patch(&patch);
            }
            self.cache.put(&list_key, &list).await;
        }
        if let Some(mut item) = self.cache.get::<R>(&item_key).await {
            item.apply_patch(&patch);
            self.cache.put(&item_key, &item).await;
        }

        match self.client.update(id, &patch).await {
            Ok(updated) => {
                self.cache.put(&item_key, &updated).await;
                self.cache.invalidate(&list_key).await;
                self.invalidate_related().await;
                Ok(updated)
            }
            Err(e) => {
                self.cache.restore(&list_key, list_snapshot).await;
                self.cache.restore(&item_key, item_snapshot).await;
                tracing::debug!(kind = %R::KIND, id, error = %e, "Update failed; cache rolled back");
                Err(e)
            }
        }
    }

    /// Delete a record. It disappears from the cache immediately and
    /// comes back only if the server refuses.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let list_key = Self::list_key();
        let item_key = Self::item_key(id);
        let list_snapshot = self.cache.snapshot(&list_key).await;
        let item_snapshot = self.cache.snapshot(&item_key).await;

        if let Some(mut list) = self.cache.get::<Vec<R>>(&list_key).await {
            list.retain(|r| r.id() != id);
            self.cache.put(&list_key, &list).await;
        }
        self.cache.invalidate(&item_key).await;

        match self.client.delete(id).await {
            Ok(()) => {
                self.cache.invalidate(&list_key).await;
                self.invalidate_related().await;
                Ok(())
            }
            Err(e) => {
                self.cache.restore(&list_key, list_snapshot).await;
                self.cache.restore(&item_key, item_snapshot).await;
                tracing::debug!(kind = %R::KIND, id, error = %e, "Delete failed; cache rolled back");
                Err(e)
            }
        }
    }

    async fn invalidate_related(&self) {
        for kind in R::KIND.invalidates() {
            self.cache.invalidate_kind(*kind).await;
        }
    }
}

impl ResourceStore<Goal, RestClient<Goal>> {
    /// Goals filtered by status, cached under their own key.
    pub async fn by_status(&self, status: GoalStatus) -> Result<Vec<Goal>, ApiError> {
        let key = format!("goals?status={}", status.as_str());
        if let Some(cached) = self.cache.get::<Vec<Goal>>(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(cached);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let fresh = self.client.by_status(status).await?;
        self.cache.put(&key, &fresh).await;
        Ok(fresh)
    }
}

impl ResourceStore<Execution, RestClient<Execution>> {
    /// One month's executions, cached under their own key.
    pub async fn by_month(&self, month: u32, year: i32) -> Result<Vec<Execution>, ApiError> {
        let key = format!("executions?month={month}&year={year}");
        if let Some(cached) = self.cache.get::<Vec<Execution>>(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(cached);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let fresh = self.client.by_month(month, year).await?;
        self.cache.put(&key, &fresh).await;
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockClient;
    use horizon_core::NewGoal;

    fn seeded_store() -> (MockClient<Goal>, ResourceStore<Goal, MockClient<Goal>>) {
        let client = MockClient::seeded(vec![Goal::synthesize(
            &NewGoal {
                title: "Seed".into(),
                ..Default::default()
            },
            1,
            Utc::now(),
        )]);
        let store = ResourceStore::new(client.clone(), QueryCache::with_defaults());
        (client, store)
    }

    #[tokio::test]
    async fn second_list_is_served_from_cache() {
        let (client, store) = seeded_store();

        let first = store.list().await.unwrap();
        let second = store.list().await.unwrap();

        assert_eq!(first.len(), second.len());
        assert_eq!(client.list_calls(), 1);
        assert_eq!(store.stats(), (1, 1));
    }

    #[tokio::test]
    async fn get_populates_the_item_entry() {
        let (client, store) = seeded_store();

        let a = store.get(1).await.unwrap();
        let b = store.get(1).await.unwrap();

        assert_eq!(a.id, b.id);
        assert_eq!(client.get_calls(), 1);
    }
}
