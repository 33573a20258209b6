//! # Horizon Store
//!
//! Cached, optimistic store layer over the Strategic Horizon API - the
//! piece that makes the client feel instant while the server stays
//! authoritative.
//!
//! Reads serve from a shared, string-keyed [`QueryCache`]. Mutations
//! apply to the cache immediately (a created record appears with a
//! temporary negative id), then confirm against the server: success
//! invalidates so the next read refetches authoritative data, failure
//! restores the exact pre-mutation snapshot.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use horizon_api::{Api, ApiConfig, FileTokenStore};
//! use horizon_store::Stores;
//! use horizon_core::NewGoal;
//!
//! # async fn demo() -> Result<(), horizon_api::ApiError> {
//! let api = Api::new(ApiConfig::from_env(), Arc::new(FileTokenStore::open_default()));
//! let stores = Stores::new(&api);
//!
//! let created = stores.goals.create(NewGoal {
//!     title: "Ship the beta".into(),
//!     ..Default::default()
//! }).await?;
//! println!("created goal {}", created.id);
//! # Ok(())
//! # }
//! ```
//!
//! [`MockClient`] swaps in for the HTTP client in tests, the same shape
//! at the same seam.

pub mod cache;
pub mod mock;
pub mod store;
pub mod stores;

pub use cache::{CacheConfig, QueryCache, Snapshot};
pub use mock::MockClient;
pub use store::ResourceStore;
pub use stores::{HttpStore, Stores};
