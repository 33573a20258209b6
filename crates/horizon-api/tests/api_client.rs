//! Client behavior against an in-process mock API
//!
//! Spins up a small axum server per test and drives the real client at
//! it: bearer attach, the single refresh-and-retry on 401, session
//! expiry, network-failure synthesis, and list-body normalization.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use horizon_api::{Api, ApiConfig, ApiError, MemoryTokenStore, ResourceClient, TokenStore};
use horizon_core::Credentials;

/// Shared state of the mock API.
#[derive(Debug, Default)]
struct Mock {
    /// Bearer token the protected routes accept; `None` rejects all.
    accepted_token: Mutex<Option<String>>,
    /// Access token a successful refresh hands out; `None` fails refresh.
    refresh_grants: Mutex<Option<String>>,
    refresh_calls: AtomicU32,
    list_calls: AtomicU32,
    /// Wrap list bodies in the paginated envelope.
    paginated: AtomicBool,
}

impl Mock {
    fn accepts(&self, headers: &HeaderMap) -> bool {
        let accepted = self.accepted_token.lock().unwrap();
        let Some(expected) = accepted.as_deref() else {
            return false;
        };
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {expected}"))
            .unwrap_or(false)
    }
}

fn sample_goal(id: i64) -> Value {
    json!({
        "id": id,
        "vision": 1,
        "title": "Run a marathon",
        "description": "Sub-4h by October",
        "status": "in_progress",
        "target_date": "2026-10-01",
        "progress_percentage": 40.0,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-02-01T00:00:00Z"
    })
}

async fn handle_token(Json(credentials): Json<Credentials>) -> (StatusCode, Json<Value>) {
    if credentials.password == "secret" {
        (
            StatusCode::OK,
            Json(json!({"access": "acc-login", "refresh": "ref-login"})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
    }
}

async fn handle_refresh(State(mock): State<Arc<Mock>>) -> (StatusCode, Json<Value>) {
    mock.refresh_calls.fetch_add(1, Ordering::SeqCst);
    match mock.refresh_grants.lock().unwrap().clone() {
        Some(access) => (StatusCode::OK, Json(json!({ "access": access }))),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Token is invalid or expired"})),
        ),
    }
}

async fn handle_goals_list(
    State(mock): State<Arc<Mock>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    mock.list_calls.fetch_add(1, Ordering::SeqCst);
    if !mock.accepts(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Given token not valid for any token type"})),
        );
    }
    let items = json!([sample_goal(1), sample_goal(2)]);
    let body = if mock.paginated.load(Ordering::SeqCst) {
        json!({"count": 2, "next": null, "previous": null, "results": items})
    } else {
        items
    };
    (StatusCode::OK, Json(body))
}

async fn handle_goals_create(
    State(mock): State<Arc<Mock>>,
    headers: HeaderMap,
    Json(draft): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !mock.accepts(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "nope"})));
    }
    let mut created = sample_goal(99);
    created["title"] = draft["title"].clone();
    (StatusCode::CREATED, Json(created))
}

async fn handle_goal_item(
    State(mock): State<Arc<Mock>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !mock.accepts(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "nope"})));
    }
    (StatusCode::OK, Json(sample_goal(7)))
}

/// Serve the mock on an ephemeral port; returns its base URL.
async fn spawn(mock: Arc<Mock>) -> String {
    let app = Router::new()
        .route("/api/token/", post(handle_token))
        .route("/api/token/refresh/", post(handle_refresh))
        .route("/api/goals/", get(handle_goals_list).post(handle_goals_create))
        .route(
            "/api/goals/{id}/",
            get(handle_goal_item)
                .patch(handle_goal_item)
                .delete(handle_goal_item),
        )
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn api_at(url: &str, tokens: Arc<MemoryTokenStore>) -> Api {
    Api::new(ApiConfig::with_url(url), tokens)
}

#[tokio::test]
async fn login_stores_the_token_pair() {
    let mock = Arc::new(Mock::default());
    let url = spawn(mock).await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let api = api_at(&url, tokens.clone());
    assert!(!api.http().is_authenticated());

    let pair = api
        .http()
        .login(&Credentials {
            username: "ada".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(pair.access, "acc-login");
    assert_eq!(tokens.access().as_deref(), Some("acc-login"));
    assert_eq!(tokens.refresh().as_deref(), Some("ref-login"));
    assert!(api.http().is_authenticated());
}

#[tokio::test]
async fn bad_credentials_surface_as_401() {
    let mock = Arc::new(Mock::default());
    let url = spawn(mock).await;
    let api = api_at(&url, Arc::new(MemoryTokenStore::new()));

    let err = api
        .http()
        .login(&Credentials {
            username: "ada".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn stale_access_token_triggers_one_refresh_and_retry() {
    let mock = Arc::new(Mock::default());
    *mock.accepted_token.lock().unwrap() = Some("acc-fresh".into());
    *mock.refresh_grants.lock().unwrap() = Some("acc-fresh".into());
    let url = spawn(mock.clone()).await;

    let tokens = Arc::new(MemoryTokenStore::with_tokens("acc-stale", "ref-ok"));
    let api = api_at(&url, tokens.clone());

    let goals = api.goals.list().await.unwrap();
    assert_eq!(goals.len(), 2);

    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(mock.list_calls.load(Ordering::SeqCst), 2);
    // The rotated access token replaced the stale one; refresh kept.
    assert_eq!(tokens.access().as_deref(), Some("acc-fresh"));
    assert_eq!(tokens.refresh().as_deref(), Some("ref-ok"));
}

#[tokio::test]
async fn second_401_surfaces_without_a_second_refresh() {
    let mock = Arc::new(Mock::default());
    // Refresh succeeds, but the API keeps rejecting the new token too.
    *mock.refresh_grants.lock().unwrap() = Some("acc-still-bad".into());
    let url = spawn(mock.clone()).await;

    let tokens = Arc::new(MemoryTokenStore::with_tokens("acc-stale", "ref-ok"));
    let api = api_at(&url, tokens);

    let err = api.goals.list().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(matches!(err, ApiError::Http { status: 401, .. }));

    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(mock.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_refresh_clears_the_session() {
    let mock = Arc::new(Mock::default());
    // refresh_grants stays None: the refresh endpoint answers 401.
    let url = spawn(mock.clone()).await;

    let tokens = Arc::new(MemoryTokenStore::with_tokens("acc-stale", "ref-dead"));
    let api = api_at(&url, tokens.clone());

    let err = api.goals.list().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 1);
    // Redirect-to-login analog: both tokens are gone.
    assert!(tokens.access().is_none());
    assert!(tokens.refresh().is_none());
}

#[tokio::test]
async fn missing_refresh_token_expires_the_session_without_a_network_refresh() {
    let mock = Arc::new(Mock::default());
    let url = spawn(mock.clone()).await;

    let tokens = Arc::new(MemoryTokenStore::new());
    tokens.store("acc-stale", None);
    let api = api_at(&url, tokens.clone());

    let err = api.goals.list().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(mock.refresh_calls.load(Ordering::SeqCst), 0);
    assert!(tokens.access().is_none());
}

#[tokio::test]
async fn unreachable_server_synthesizes_a_network_error() {
    // Grab a port that nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let api = api_at(&url, Arc::new(MemoryTokenStore::with_tokens("a", "r")));
    let err = api.goals.list().await.unwrap_err();

    assert!(err.is_network(), "expected network error, got {err:?}");
    assert_eq!(err.title(), "Connection Error");
    assert!(err.message().contains(&url), "message should name {url}");
}

#[tokio::test]
async fn list_normalizes_paginated_and_plain_bodies() {
    let mock = Arc::new(Mock::default());
    *mock.accepted_token.lock().unwrap() = Some("acc".into());
    let url = spawn(mock.clone()).await;
    let api = api_at(&url, Arc::new(MemoryTokenStore::with_tokens("acc", "r")));

    mock.paginated.store(false, Ordering::SeqCst);
    let plain = api.goals.list().await.unwrap();

    mock.paginated.store(true, Ordering::SeqCst);
    let paginated = api.goals.list().await.unwrap();

    assert_eq!(plain.len(), paginated.len());
    assert_eq!(plain[0].id, paginated[0].id);
}

#[tokio::test]
async fn create_round_trips_the_draft_title() {
    let mock = Arc::new(Mock::default());
    *mock.accepted_token.lock().unwrap() = Some("acc".into());
    let url = spawn(mock).await;
    let api = api_at(&url, Arc::new(MemoryTokenStore::with_tokens("acc", "r")));

    let created = api
        .goals
        .create(&horizon_core::NewGoal {
            title: "Write the book".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.id, 99);
    assert_eq!(created.title, "Write the book");
}

#[tokio::test]
async fn get_patch_and_delete_use_the_item_path() {
    let mock = Arc::new(Mock::default());
    *mock.accepted_token.lock().unwrap() = Some("acc".into());
    let url = spawn(mock).await;
    let api = api_at(&url, Arc::new(MemoryTokenStore::with_tokens("acc", "r")));

    let fetched = api.goals.get(7).await.unwrap();
    assert_eq!(fetched.id, 7);

    let patched = api
        .goals
        .update(
            7,
            &horizon_core::GoalPatch {
                title: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.id, 7);

    api.goals.delete(7).await.unwrap();
}
