#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use dishnote_api::config::ServerConfig;
use dishnote_api::router::build_app_router;
use dishnote_api::state::AppState;
use dishnote_core::allocator::IdAllocator;
use dishnote_core::testing::{MemoryStore, ScriptedIds, SteppingClock};
use dishnote_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router over `store` with random identifiers.
///
/// Uses the same middleware stack as production via [`build_app_router`].
pub fn build_test_app(store: MemoryStore) -> Router {
    let state = AppState::with_parts(
        store,
        test_config(),
        IdAllocator::default(),
        Arc::new(SteppingClock::default()),
    );
    build_app_router(state)
}

/// Like [`build_test_app`] but identifiers are drawn from `ids` in order.
pub fn build_scripted_app(store: MemoryStore, ids: impl IntoIterator<Item = DbId>) -> Router {
    let allocator = IdAllocator::with_source(Arc::new(ScriptedIds::new(ids)), 4);
    let state = AppState::with_parts(
        store,
        test_config(),
        allocator,
        Arc::new(SteppingClock::default()),
    );
    build_app_router(state)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

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

async fn with_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::PATCH, uri, body).await
}

/// Register a person through the API and return its id.
pub async fn create_person(app: Router, login: &str, password: &str, position: &str) -> DbId {
    let response = post_json(
        app,
        "/api/v1/persons",
        serde_json::json!({"login": login, "password": password, "position": position}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
