#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use parky_api::config::ServerConfig;
use parky_api::router::build_app_router;
use parky_api::state::AppState;
use parky_core::types::DbId;
use parky_db::models::park::Park;
use parky_db::models::trail::Trail;
use parky_db::{
    MemoryStore, ParkStore, StoreError, StoreHealth, StoreResult, TrailStore,
};

// ---------------------------------------------------------------------------
// Recording store
// ---------------------------------------------------------------------------

/// In-memory store that records every call and can be told to fail writes.
///
/// With `hide_names` set, `exists_by_name` always answers `false`, so a
/// duplicate reaches the store's own uniqueness guard as if a concurrent
/// request had won the check.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    calls: Mutex<Vec<&'static str>>,
    fail_writes: AtomicBool,
    unhealthy: AtomicBool,
    hide_names: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, op: &str) -> bool {
        self.calls().iter().any(|c| *c == op)
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_unhealthy(&self, unhealthy: bool) {
        self.unhealthy.store(unhealthy, Ordering::SeqCst);
    }

    pub fn hide_names(&self, hide: bool) {
        self.hide_names.store(hide, Ordering::SeqCst);
    }

    fn names_hidden(&self) -> bool {
        self.hide_names.load(Ordering::SeqCst)
    }

    fn record(&self, op: &'static str) {
        self.calls.lock().unwrap().push(op);
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ParkStore for RecordingStore {
    async fn list(&self) -> StoreResult<Vec<Park>> {
        self.record("park.list");
        ParkStore::list(&self.inner).await
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Park>> {
        self.record("park.find_by_id");
        ParkStore::find_by_id(&self.inner, id).await
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        self.record("park.exists_by_name");
        if self.names_hidden() {
            return Ok(false);
        }
        ParkStore::exists_by_name(&self.inner, name).await
    }

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool> {
        self.record("park.exists_by_id");
        ParkStore::exists_by_id(&self.inner, id).await
    }

    async fn create(&self, park: &Park) -> StoreResult<Park> {
        self.record("park.create");
        self.check_write()?;
        ParkStore::create(&self.inner, park).await
    }

    async fn update(&self, park: &Park) -> StoreResult<bool> {
        self.record("park.update");
        self.check_write()?;
        ParkStore::update(&self.inner, park).await
    }

    async fn delete(&self, park: &Park) -> StoreResult<bool> {
        self.record("park.delete");
        self.check_write()?;
        ParkStore::delete(&self.inner, park).await
    }
}

#[async_trait]
impl TrailStore for RecordingStore {
    async fn list(&self) -> StoreResult<Vec<Trail>> {
        self.record("trail.list");
        TrailStore::list(&self.inner).await
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Trail>> {
        self.record("trail.find_by_id");
        TrailStore::find_by_id(&self.inner, id).await
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        self.record("trail.exists_by_name");
        if self.names_hidden() {
            return Ok(false);
        }
        TrailStore::exists_by_name(&self.inner, name).await
    }

    async fn exists_by_id(&self, id: DbId) -> StoreResult<bool> {
        self.record("trail.exists_by_id");
        TrailStore::exists_by_id(&self.inner, id).await
    }

    async fn create(&self, trail: &Trail) -> StoreResult<Trail> {
        self.record("trail.create");
        self.check_write()?;
        TrailStore::create(&self.inner, trail).await
    }

    async fn update(&self, trail: &Trail) -> StoreResult<bool> {
        self.record("trail.update");
        self.check_write()?;
        TrailStore::update(&self.inner, trail).await
    }

    async fn delete(&self, trail: &Trail) -> StoreResult<bool> {
        self.record("trail.delete");
        self.check_write()?;
        TrailStore::delete(&self.inner, trail).await
    }
}

#[async_trait]
impl StoreHealth for RecordingStore {
    async fn ping(&self) -> StoreResult<()> {
        if self.unhealthy.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over the given store.
pub fn build_test_app(store: Arc<RecordingStore>) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Arc<RecordingStore>, config: ServerConfig) -> Router {
    build_app_router(AppState::new(store, config))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PATCH, uri, body).await
}

/// POST with no body and no content type.
pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn park_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "state": "WY",
        "established": "1872-03-01",
    })
}

pub fn trail_json(name: &str, park_id: i64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "distance": 4.9,
        "elevation": 120.0,
        "difficulty": "moderate",
        "park_id": park_id,
    })
}

/// Create a park through the API and return its id.
pub async fn seed_park(store: &Arc<RecordingStore>, name: &str) -> i64 {
    let response = post_json(build_test_app(store.clone()), "/api/v1/parks", park_json(name)).await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a trail through the API and return its id.
pub async fn seed_trail(store: &Arc<RecordingStore>, name: &str, park_id: i64) -> i64 {
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/trails",
        trail_json(name, park_id),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}
