//! Typed per-resource REST clients
//!
//! Every resource gets the same five operations over its fixed paths:
//! list, get, create, update (PATCH), delete. [`ResourceClient`] is the
//! seam the store layer is written against, so it can be exercised with a
//! mock instead of a live server.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use horizon_core::{
    Execution, Goal, GoalStatus, Kpi, ListBody, NonNegotiable, Obstacle, Person,
    QuarterlyReflection, Resource, System, Vision,
};

use crate::client::HttpClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::tokens::TokenStore;

/// CRUD surface of one resource.
#[async_trait]
pub trait ResourceClient<R: Resource>: Send + Sync {
    /// `GET /api/<resource>/`
    async fn list(&self) -> Result<Vec<R>, ApiError>;
    /// `GET /api/<resource>/<id>/`
    async fn get(&self, id: i64) -> Result<R, ApiError>;
    /// `POST /api/<resource>/`
    async fn create(&self, draft: &R::Draft) -> Result<R, ApiError>;
    /// `PATCH /api/<resource>/<id>/`
    async fn update(&self, id: i64, patch: &R::Patch) -> Result<R, ApiError>;
    /// `DELETE /api/<resource>/<id>/`
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// HTTP-backed [`ResourceClient`] for a resource kind.
#[derive(Debug, Clone)]
pub struct RestClient<R: Resource> {
    http: Arc<HttpClient>,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Resource> RestClient<R> {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            _kind: PhantomData,
        }
    }

    fn collection_path() -> String {
        format!("/api/{}/", R::KIND.path())
    }

    fn item_path(id: i64) -> String {
        format!("/api/{}/{}/", R::KIND.path(), id)
    }
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for RestClient<R> {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        let body: ListBody<R> = self.http.get(&Self::collection_path()).await?;
        Ok(body.into_results())
    }

    async fn get(&self, id: i64) -> Result<R, ApiError> {
        self.http.get(&Self::item_path(id)).await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        self.http.post(&Self::collection_path(), draft).await
    }

    async fn update(&self, id: i64, patch: &R::Patch) -> Result<R, ApiError> {
        self.http.patch(&Self::item_path(id), patch).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.http.delete(&Self::item_path(id)).await
    }
}

impl RestClient<Goal> {
    /// `GET /api/goals/by_status/?status=<s>`
    pub async fn by_status(&self, status: GoalStatus) -> Result<Vec<Goal>, ApiError> {
        let path = format!("/api/goals/by_status/?status={}", status.as_str());
        let body: ListBody<Goal> = self.http.get(&path).await?;
        Ok(body.into_results())
    }
}

impl RestClient<Execution> {
    /// `GET /api/executions/by_month/?month=&year=`
    pub async fn by_month(&self, month: u32, year: i32) -> Result<Vec<Execution>, ApiError> {
        let path = format!("/api/executions/by_month/?month={month}&year={year}");
        let body: ListBody<Execution> = self.http.get(&path).await?;
        Ok(body.into_results())
    }
}

/// All nine resource clients over one shared [`HttpClient`].
#[derive(Debug, Clone)]
pub struct Api {
    http: Arc<HttpClient>,
    pub visions: RestClient<Vision>,
    pub goals: RestClient<Goal>,
    pub kpis: RestClient<Kpi>,
    pub non_negotiables: RestClient<NonNegotiable>,
    pub systems: RestClient<System>,
    pub people: RestClient<Person>,
    pub executions: RestClient<Execution>,
    pub obstacles: RestClient<Obstacle>,
    pub reflections: RestClient<QuarterlyReflection>,
}

impl Api {
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_client(Arc::new(HttpClient::new(config, tokens)))
    }

    pub fn with_client(http: Arc<HttpClient>) -> Self {
        Self {
            visions: RestClient::new(http.clone()),
            goals: RestClient::new(http.clone()),
            kpis: RestClient::new(http.clone()),
            non_negotiables: RestClient::new(http.clone()),
            systems: RestClient::new(http.clone()),
            people: RestClient::new(http.clone()),
            executions: RestClient::new(http.clone()),
            obstacles: RestClient::new(http.clone()),
            reflections: RestClient::new(http.clone()),
            http,
        }
    }

    /// The shared HTTP client.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }
}
