//! # Horizon API
//!
//! Authenticated REST client for the Strategic Horizon planning service.
//!
//! The server speaks REST with JWT bearer auth: `POST /api/token/` to log
//! in, `POST /api/token/refresh/` to refresh, and uniform CRUD under
//! `/api/<resource>/` for the nine planning resources.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use horizon_api::{Api, ApiConfig, FileTokenStore, ResourceClient};
//! use horizon_core::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), horizon_api::ApiError> {
//!     let tokens = Arc::new(FileTokenStore::open_default());
//!     let api = Api::new(ApiConfig::from_env(), tokens);
//!
//!     api.http()
//!         .login(&Credentials {
//!             username: "ada".into(),
//!             password: "secret".into(),
//!         })
//!         .await?;
//!
//!     for goal in api.goals.list().await? {
//!         println!("{} [{}]", goal.title, goal.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Behavior
//!
//! A request that gets no HTTP response surfaces as
//! [`ApiError::Network`], naming the configured URL. A 401 triggers one
//! token refresh and one retry; when that fails the stored tokens are
//! cleared and the call returns [`ApiError::SessionExpired`].

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod tokens;

pub use client::HttpClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use resources::{Api, ResourceClient, RestClient};
pub use tokens::{FileTokenStore, MemoryTokenStore, TokenStore};
