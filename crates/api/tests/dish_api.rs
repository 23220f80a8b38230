//! HTTP-level integration tests for the `/dishes` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, create_person, delete, get, patch_json, post_json};
use dishnote_core::testing::MemoryStore;

fn soup(author: i64) -> serde_json::Value {
    serde_json::json!({
        "name": "Soup",
        "price": 500,
        "description": "Hot",
        "composition": "water, salt",
        "author": author,
        "photo_url": "http://x/soup.png",
    })
}

// ---------------------------------------------------------------------------
// Full lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dish_lifecycle() {
    let store = MemoryStore::new();
    let app = common::build_test_app(store);

    let author = create_person(app.clone(), "alice", "p1", "chef").await;

    // Create.
    let response = post_json(app.clone(), "/api/v1/dishes", soup(author)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    assert!((1..=u32::MAX as i64).contains(&id));

    // Read back.
    let response = get(app.clone(), &format!("/api/v1/dishes/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["info"]["name"], "Soup");
    assert_eq!(json["data"]["info"]["price"], 500);
    assert_eq!(json["data"]["info"]["author"], author);
    assert_eq!(json["data"]["created_at"], json["data"]["updated_at"]);

    // Partial update touches only the price.
    let response = patch_json(
        app.clone(),
        &format!("/api/v1/dishes/{id}"),
        serde_json::json!({"price": 600}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app.clone(), &format!("/api/v1/dishes/{id}")).await).await;
    assert_eq!(json["data"]["info"]["price"], 600);
    assert_eq!(json["data"]["info"]["name"], "Soup");
    assert_eq!(json["data"]["info"]["composition"], "water, salt");
    assert_ne!(json["data"]["created_at"], json["data"]["updated_at"]);

    // Delete, then the record is gone.
    let response = delete(app.clone(), &format!("/api/v1/dishes/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/v1/dishes/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = delete(app, &format!("/api/v1/dishes/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Author checks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_with_unknown_author_returns_422() {
    let app = common::build_test_app(MemoryStore::new());

    let response = post_json(app.clone(), "/api/v1/dishes", soup(77)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "INVALID_AUTHOR");

    let json = body_json(get(app, "/api/v1/dishes").await).await;
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn update_to_unknown_author_leaves_record_unchanged() {
    let app = common::build_test_app(MemoryStore::new());
    let author = create_person(app.clone(), "alice", "p1", "chef").await;

    let created = body_json(post_json(app.clone(), "/api/v1/dishes", soup(author)).await).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = patch_json(
        app.clone(),
        &format!("/api/v1/dishes/{id}"),
        serde_json::json!({"author": 77, "price": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(get(app, &format!("/api/v1/dishes/{id}")).await).await;
    assert_eq!(json["data"]["info"]["author"], author);
    assert_eq!(json["data"]["info"]["price"], 500);
}

#[tokio::test]
async fn update_missing_dish_returns_404() {
    let app = common::build_test_app(MemoryStore::new());
    let response = patch_json(
        app,
        "/api/v1/dishes/4242",
        serde_json::json!({"price": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_filters_by_author() {
    let app = common::build_test_app(MemoryStore::new());
    let alice = create_person(app.clone(), "alice", "p1", "chef").await;
    let bob = create_person(app.clone(), "bob", "p2", "waiter").await;

    for author in [alice, alice, bob] {
        let response = post_json(app.clone(), "/api/v1/dishes", soup(author)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app.clone(), "/api/v1/dishes").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let json = body_json(get(app.clone(), &format!("/api/v1/dishes?author={alice}")).await).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["info"]["author"] == alice));

    let response = get(app, "/api/v1/dishes?author=999").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Identifier allocation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_retries_past_taken_identifiers() {
    // Person takes 10, the first dish 20; the second dish draws 20 again
    // and must move on to 21.
    let app = common::build_scripted_app(MemoryStore::new(), [10, 20, 20, 21]);
    let author = create_person(app.clone(), "alice", "p1", "chef").await;
    assert_eq!(author, 10);

    let json = body_json(post_json(app.clone(), "/api/v1/dishes", soup(author)).await).await;
    assert_eq!(json["data"]["id"], 20);

    let json = body_json(post_json(app, "/api/v1/dishes", soup(author)).await).await;
    assert_eq!(json["data"]["id"], 21);
}

#[tokio::test]
async fn exhausted_allocation_returns_503() {
    // The scripted allocator gives up after four draws of the same id.
    let app = common::build_scripted_app(MemoryStore::new(), [5]);
    let author = create_person(app.clone(), "alice", "p1", "chef").await;

    let response = post_json(app.clone(), "/api/v1/dishes", soup(author)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(app, "/api/v1/dishes", soup(author)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "STORAGE_UNAVAILABLE");
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_fields_are_a_bad_request() {
    let app = common::build_test_app(MemoryStore::new());
    let response = post_json(app, "/api/v1/dishes", serde_json::json!({"name": "Soup"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn body_without_json_content_type_is_a_bad_request() {
    let app = common::build_test_app(MemoryStore::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/dishes")
        .body(Body::from(soup(1).to_string()))
        .unwrap();

    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = common::build_test_app(MemoryStore::new());
    let response = get(app, "/api/v1/dishes/soup").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
