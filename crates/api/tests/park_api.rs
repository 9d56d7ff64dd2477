//! HTTP-level integration tests for the `/parks` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, build_test_app, build_test_app_with, delete, get, park_json,
    patch_json, post_empty, post_json, seed_park, test_config, RecordingStore,
};
use parky_api::config::ServerConfig;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_park_on_empty_store_returns_201_with_location() {
    let store = RecordingStore::new();
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/parks",
        serde_json::json!({"name": "Yellowstone", "state": "WY"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/api/v1/parks/1"
    );
    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Yellowstone");

    let response = get(build_test_app(store), "/api/v1/parks/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Yellowstone");
    assert_eq!(json["state"], "WY");
}

#[tokio::test]
async fn created_park_is_retrievable_with_matching_fields() {
    let store = RecordingStore::new();
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/parks",
        serde_json::json!({
            "name": "Zion",
            "state": "UT",
            "picture": "https://example.org/zion.jpg",
            "established": "1919-11-19",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let fetched = body_json(get(build_test_app(store), &format!("/api/v1/parks/{id}")).await).await;
    assert_eq!(fetched["name"], "Zion");
    assert_eq!(fetched["state"], "UT");
    assert_eq!(fetched["picture"], "https://example.org/zion.jpg");
    assert_eq!(fetched["established"], "1919-11-19");
    assert_eq!(fetched["created"], created["created"]);
}

#[tokio::test]
async fn client_supplied_id_is_ignored_on_create() {
    let store = RecordingStore::new();
    let response = post_json(
        build_test_app(store),
        "/api/v1/parks",
        serde_json::json!({"id": 77, "name": "Arches", "state": "UT"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["id"], 1);
}

#[tokio::test]
async fn duplicate_park_name_returns_409_without_calling_create() {
    let store = RecordingStore::new();
    seed_park(&store, "Yellowstone").await;
    store.clear_calls();

    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/parks",
        park_json("  yellowstone "),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["errors"][""][0], "National Park Exists!");
    assert!(!store.called("park.create"));
    assert_eq!(store.inner.park_count().await, 1);
}

#[tokio::test]
async fn duplicate_park_name_returns_404_in_legacy_mode() {
    let store = RecordingStore::new();
    seed_park(&store, "Yellowstone").await;

    let config = ServerConfig {
        legacy_status_codes: true,
        ..test_config()
    };
    let response = post_json(
        build_test_app_with(store.clone(), config),
        "/api/v1/parks",
        park_json("Yellowstone"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.inner.park_count().await, 1);
}

#[tokio::test]
async fn duplicate_caught_by_store_guard_returns_409() {
    let store = RecordingStore::new();
    seed_park(&store, "Zion").await;
    store.hide_names(true);
    store.clear_calls();

    let response = post_json(build_test_app(store.clone()), "/api/v1/parks", park_json("ZION")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["errors"][""][0], "National Park Exists!");
    assert!(store.called("park.create"));
    assert_eq!(store.inner.park_count().await, 1);
}

#[tokio::test]
async fn duplicate_caught_by_store_guard_returns_404_in_legacy_mode() {
    let store = RecordingStore::new();
    seed_park(&store, "Zion").await;
    store.hide_names(true);

    let config = ServerConfig {
        legacy_status_codes: true,
        ..test_config()
    };
    let response = post_json(
        build_test_app_with(store.clone(), config),
        "/api/v1/parks",
        park_json("Zion"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["errors"][""][0],
        "National Park Exists!"
    );
    assert_eq!(store.inner.park_count().await, 1);
}

#[tokio::test]
async fn whitespace_only_fields_are_rejected() {
    let store = RecordingStore::new();
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/parks",
        serde_json::json!({"name": "   ", "state": " "}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["name"][0], "name must not be blank");
    assert_eq!(json["errors"]["state"][0], "state must not be blank");
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn create_without_body_returns_400() {
    let store = RecordingStore::new();
    let response = post_empty(build_test_app(store.clone()), "/api/v1/parks").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"][""][0].is_string());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn create_with_null_body_returns_400() {
    let store = RecordingStore::new();
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/parks",
        serde_json::Value::Null,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn create_with_blank_name_reports_field_error() {
    let store = RecordingStore::new();
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/parks",
        serde_json::json!({"name": "", "state": "WY"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["errors"]["name"][0],
        "name must be between 1 and 100 characters"
    );
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn failed_save_returns_500_naming_the_record() {
    let store = RecordingStore::new();
    store.fail_writes(true);

    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/parks",
        park_json("Glacier"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(
        json["errors"][""][0],
        "Something went wrong when saving the record Glacier"
    );
    assert!(store.called("park.create"));
    assert_eq!(store.inner.park_count().await, 0);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_parks_returns_all_in_store_order() {
    let store = RecordingStore::new();
    seed_park(&store, "Yellowstone").await;
    seed_park(&store, "Zion").await;

    let response = get(build_test_app(store), "/api/v1/parks").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Yellowstone", "Zion"]);
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
    let response = get(build_test_app(RecordingStore::new()), "/api/v1/parks").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn get_nonexistent_park_returns_404() {
    let response = get(build_test_app(RecordingStore::new()), "/api/v1/parks/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Park with id 999999 not found");
}

#[tokio::test]
async fn non_integer_ids_do_not_match_the_route() {
    let store = RecordingStore::new();
    for uri in ["/api/v1/parks/abc", "/api/v1/parks/0", "/api/v1/parks/-1"] {
        let response = get(build_test_app(store.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
    assert!(store.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_park_returns_204_and_persists_changes() {
    let store = RecordingStore::new();
    let id = seed_park(&store, "Yellowstone").await;

    let response = patch_json(
        build_test_app(store.clone()),
        &format!("/api/v1/parks/{id}"),
        serde_json::json!({"id": id, "name": "Yellowstone", "state": "MT"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let json = body_json(get(build_test_app(store), &format!("/api/v1/parks/{id}")).await).await;
    assert_eq!(json["state"], "MT");
}

#[tokio::test]
async fn update_with_mismatched_id_returns_400_without_calling_store() {
    let store = RecordingStore::new();
    let id = seed_park(&store, "Yellowstone").await;
    store.clear_calls();

    let response = patch_json(
        build_test_app(store.clone()),
        &format!("/api/v1/parks/{id}"),
        serde_json::json!({"id": id + 1, "name": "Renamed", "state": "MT"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["id"][0].is_string());
    assert!(store.calls().is_empty());

    let park = body_json(get(build_test_app(store), &format!("/api/v1/parks/{id}")).await).await;
    assert_eq!(park["name"], "Yellowstone");
}

#[tokio::test]
async fn update_of_missing_row_returns_500() {
    let store = RecordingStore::new();
    let response = patch_json(
        build_test_app(store.clone()),
        "/api/v1/parks/42",
        serde_json::json!({"id": 42, "name": "Ghost", "state": "NV"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"][""][0],
        "Something went wrong when updating the record Ghost"
    );
    assert!(store.called("park.update"));
}

#[tokio::test]
async fn update_to_a_taken_name_conflicts() {
    let store = RecordingStore::new();
    seed_park(&store, "Yellowstone").await;
    let zion = seed_park(&store, "Zion").await;

    let response = patch_json(
        build_test_app(store),
        &format!("/api/v1/parks/{zion}"),
        serde_json::json!({"id": zion, "name": "Yellowstone", "state": "UT"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_park_returns_204_then_404() {
    let store = RecordingStore::new();
    let id = seed_park(&store, "Yellowstone").await;

    let response = delete(build_test_app(store.clone()), &format!("/api/v1/parks/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(store), &format!("/api/v1/parks/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_nonexistent_park_returns_404_without_mutating() {
    let store = RecordingStore::new();
    let response = delete(build_test_app(store.clone()), "/api/v1/parks/99").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.calls(), ["park.exists_by_id"]);
}

#[tokio::test]
async fn failed_delete_returns_500_naming_the_record() {
    let store = RecordingStore::new();
    let id = seed_park(&store, "Yellowstone").await;
    store.fail_writes(true);

    let response = delete(build_test_app(store.clone()), &format!("/api/v1/parks/{id}")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(
        json["errors"][""][0],
        "Something went wrong when deleting the record Yellowstone"
    );
    assert_eq!(store.inner.park_count().await, 1);
}
