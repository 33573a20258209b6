//! Mock resource client for testing
//!
//! An in-process stand-in for the HTTP-backed client: records live in a
//! `Vec`, ids are assigned the way a server would, failures can be
//! injected, and a gate can hold calls open so tests can observe the
//! cache mid-mutation.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;

use horizon_api::{ApiError, ResourceClient};
use horizon_core::Resource;

#[derive(Debug)]
struct MockInner<R> {
    records: Mutex<Vec<R>>,
    next_id: AtomicI64,
    fail_next: AtomicBool,
    gate: Mutex<Option<Arc<Notify>>>,
    list_calls: AtomicU32,
    get_calls: AtomicU32,
}

/// A mock [`ResourceClient`] over an in-memory record set. Cloning
/// shares the same records, so a test can keep a handle after moving a
/// clone into a store.
#[derive(Debug)]
pub struct MockClient<R: Resource> {
    inner: Arc<MockInner<R>>,
}

impl<R: Resource> Clone for MockClient<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: Resource> Default for MockClient<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> MockClient<R> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Start with existing records; ids continue above the highest seed.
    pub fn seeded(records: Vec<R>) -> Self {
        let next_id = records.iter().map(Resource::id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(MockInner {
                records: Mutex::new(records),
                next_id: AtomicI64::new(next_id),
                fail_next: AtomicBool::new(false),
                gate: Mutex::new(None),
                list_calls: AtomicU32::new(0),
                get_calls: AtomicU32::new(0),
            }),
        }
    }

    /// Current server-side records.
    pub fn records(&self) -> Vec<R> {
        self.inner.records.lock().unwrap().clone()
    }

    /// Make the next call fail with an injected 500.
    pub fn fail_next(&self) {
        self.inner.fail_next.store(true, Ordering::SeqCst);
    }

    /// Hold every call at this gate until it is notified.
    pub fn gate_with(&self, gate: Arc<Notify>) {
        *self.inner.gate.lock().unwrap() = Some(gate);
    }

    /// Stop gating calls.
    pub fn clear_gate(&self) {
        *self.inner.gate.lock().unwrap() = None;
    }

    pub fn list_calls(&self) -> u32 {
        self.inner.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> u32 {
        self.inner.get_calls.load(Ordering::SeqCst)
    }

    async fn pass_gate(&self) {
        let gate = self.inner.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn injected_failure(&self) -> Result<(), ApiError> {
        if self.inner.fail_next.swap(false, Ordering::SeqCst) {
            Err(ApiError::Http {
                status: 500,
                body: "injected failure".into(),
            })
        } else {
            Ok(())
        }
    }

    fn not_found() -> ApiError {
        ApiError::Http {
            status: 404,
            body: "not found".into(),
        }
    }
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for MockClient<R> {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        self.pass_gate().await;
        self.inner.list_calls.fetch_add(1, Ordering::SeqCst);
        self.injected_failure()?;
        Ok(self.records())
    }

    async fn get(&self, id: i64) -> Result<R, ApiError> {
        self.pass_gate().await;
        self.inner.get_calls.fetch_add(1, Ordering::SeqCst);
        self.injected_failure()?;
        self.records()
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(Self::not_found)
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        self.pass_gate().await;
        self.injected_failure()?;
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let record = R::synthesize(draft, id, Utc::now());
        self.inner.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, patch: &R::Patch) -> Result<R, ApiError> {
        self.pass_gate().await;
        self.injected_failure()?;
        let mut records = self.inner.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(Self::not_found)?;
        record.apply_patch(patch);
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.pass_gate().await;
        self.injected_failure()?;
        let mut records = self.inner.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}
