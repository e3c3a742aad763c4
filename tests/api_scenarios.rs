//! HTTP API Scenario Tests
//!
//! Drives the full router end to end:
//! - Username registration is idempotent
//! - Exercise logs are filtered by date, sorted ascending, then limited
//! - Unknown users answer 404, store failures answer a generic 500
//! - Bulk deletes answer 200 even when the store fails

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use exercise_tracker::http_server::{HttpServer, HttpServerConfig, TrackerState};
use exercise_tracker::model::{ExerciseDraft, ExerciseEntry, User};
use exercise_tracker::storage::{
    DeleteSummary, DocumentStore, ExerciseQuery, RecordStore, StoreError, StoreResult,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn app_over(store: Arc<dyn RecordStore>) -> Router {
    HttpServer::new(HttpServerConfig::default(), Arc::new(TrackerState::new(store))).router()
}

fn app() -> Router {
    app_over(Arc::new(DocumentStore::in_memory()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn register(app: &Router, username: &str) -> String {
    let (status, body) = send(app, post_form("/api/users", &format!("username={}", username))).await;
    assert_eq!(status, StatusCode::OK);
    body["_id"].as_str().unwrap().to_string()
}

async fn add_exercise(app: &Router, user_id: &str, form: &str) -> Value {
    let (status, body) = send(
        app,
        post_form(&format!("/api/users/{}/exercises", user_id), form),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

/// Store whose every call fails
struct UnavailableStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("database unreachable".to_string()))
}

impl RecordStore for UnavailableStore {
    fn insert_user(&self, _username: &str) -> StoreResult<User> {
        unavailable()
    }
    fn find_user_by_id(&self, _id: &str) -> StoreResult<Option<User>> {
        unavailable()
    }
    fn find_user_by_username(&self, _username: &str) -> StoreResult<Option<User>> {
        unavailable()
    }
    fn list_users(&self) -> StoreResult<Vec<User>> {
        unavailable()
    }
    fn delete_all_users(&self) -> StoreResult<DeleteSummary> {
        unavailable()
    }
    fn insert_exercise(&self, _draft: ExerciseDraft) -> StoreResult<ExerciseEntry> {
        unavailable()
    }
    fn find_exercises(&self, _query: &ExerciseQuery) -> StoreResult<Vec<ExerciseEntry>> {
        unavailable()
    }
    fn delete_all_exercises(&self) -> StoreResult<DeleteSummary> {
        unavailable()
    }
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_registering_same_username_twice_returns_same_user() {
    let app = app();

    let (_, first) = send(&app, post_form("/api/users", "username=alice")).await;
    let (_, second) = send(&app, post_json("/api/users", json!({"username": "alice"}))).await;

    assert_eq!(first["username"], "alice");
    assert_eq!(first, second);

    let (status, users) = send(&app, get("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["_id"], first["_id"]);
}

#[tokio::test]
async fn test_users_listed_in_registration_order() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    let (_, users) = send(&app, get("/api/users")).await;
    assert_eq!(
        users,
        json!([
            {"username": "alice", "_id": alice},
            {"username": "bob", "_id": bob},
        ])
    );
}

#[tokio::test]
async fn test_empty_username_is_server_error() {
    let app = app();

    let (status, body) = send(&app, post_form("/api/users", "username=")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");

    let (_, users) = send(&app, get("/api/users")).await;
    assert_eq!(users, json!([]));
}

// =============================================================================
// Exercises and logs
// =============================================================================

#[tokio::test]
async fn test_add_exercise_echoes_user_and_formatted_date() {
    let app = app();
    let user_id = register(&app, "alice").await;

    let body = add_exercise(&app, &user_id, "description=run&duration=30&date=2024-01-01").await;

    assert_eq!(
        body,
        json!({
            "_id": user_id,
            "username": "alice",
            "description": "run",
            "duration": 30,
            "date": "Mon Jan 01 2024",
        })
    );
}

#[tokio::test]
async fn test_log_is_sorted_filtered_and_limited() {
    let app = app();
    let user_id = register(&app, "alice").await;

    add_exercise(&app, &user_id, "description=swim&duration=45&date=2024-03-10").await;
    add_exercise(&app, &user_id, "description=run&duration=30&date=2024-01-01").await;
    add_exercise(&app, &user_id, "description=bike&duration=60&date=2024-02-15").await;

    let (status, log) = send(&app, get(&format!("/api/users/{}/logs", user_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log["username"], "alice");
    assert_eq!(log["_id"], user_id.as_str());
    assert_eq!(log["count"], 3);
    let descriptions: Vec<_> = log["log"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["description"].as_str().unwrap())
        .collect();
    assert_eq!(descriptions, vec!["run", "bike", "swim"]);

    let (_, limited) = send(&app, get(&format!("/api/users/{}/logs?limit=1", user_id))).await;
    assert_eq!(limited["count"], 1);
    assert_eq!(limited["log"][0]["description"], "run");
    assert_eq!(limited["log"][0]["date"], "Mon Jan 01 2024");

    let (_, ranged) = send(
        &app,
        get(&format!(
            "/api/users/{}/logs?from=2024-02-01&to=2024-03-10",
            user_id
        )),
    )
    .await;
    assert_eq!(ranged["count"], 2);
    assert_eq!(ranged["log"][0]["description"], "bike");
    assert_eq!(ranged["log"][1]["description"], "swim");
}

#[tokio::test]
async fn test_count_matches_log_length() {
    let app = app();
    let user_id = register(&app, "alice").await;
    for day in 1..=4 {
        add_exercise(
            &app,
            &user_id,
            &format!("description=lift&duration=20&date=2024-05-0{}", day),
        )
        .await;
    }

    for query in ["", "?limit=2", "?from=2024-05-03", "?to=2024-05-01", "?limit=0"] {
        let (_, log) = send(&app, get(&format!("/api/users/{}/logs{}", user_id, query))).await;
        assert_eq!(
            log["count"].as_u64().unwrap() as usize,
            log["log"].as_array().unwrap().len(),
            "query {:?}",
            query
        );
    }
}

#[tokio::test]
async fn test_logs_only_include_own_entries() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;

    add_exercise(&app, &alice, "description=run&duration=30&date=2024-01-01").await;
    add_exercise(&app, &bob, "description=yoga&duration=15&date=2024-01-02").await;

    let (_, log) = send(&app, get(&format!("/api/users/{}/logs", bob))).await;
    assert_eq!(log["count"], 1);
    assert_eq!(log["log"][0]["description"], "yoga");
}

#[tokio::test]
async fn test_malformed_duration_and_date_are_coerced() {
    let app = app();
    let user_id = register(&app, "alice").await;

    let body = add_exercise(&app, &user_id, "description=run&duration=abc&date=not-a-date").await;
    assert_eq!(body["duration"], Value::Null);
    assert_eq!(body["date"], "Invalid Date");

    let body = add_exercise(&app, &user_id, "description=walk&duration=12.9").await;
    assert_eq!(body["duration"], 12);
    assert_ne!(body["date"], "Invalid Date");
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        post_form("/api/users/missing/exercises", "description=run&duration=30"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, _) = send(&app, get("/api/users/missing/logs")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Bulk deletes
// =============================================================================

#[tokio::test]
async fn test_bulk_deletes_report_counts() {
    let app = app();
    let user_id = register(&app, "alice").await;
    register(&app, "bob").await;
    add_exercise(&app, &user_id, "description=run&duration=30").await;

    let (status, body) = send(&app, get("/api/exercises/delete")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "All exercises have been deleted!",
            "result": {"acknowledged": true, "deletedCount": 1},
        })
    );

    let (_, body) = send(&app, get("/api/users/delete")).await;
    assert_eq!(body["message"], "All users have been deleted!");
    assert_eq!(body["result"]["deletedCount"], 2);

    let (_, users) = send(&app, get("/api/users")).await;
    assert_eq!(users, json!([]));
}

// =============================================================================
// Store failures
// =============================================================================

#[tokio::test]
async fn test_store_failure_is_generic_server_error() {
    let app = app_over(Arc::new(UnavailableStore));

    for request in [
        get("/api/users"),
        post_form("/api/users", "username=alice"),
        post_form("/api/users/abc/exercises", "description=run&duration=30"),
        get("/api/users/abc/logs"),
    ] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(!body.to_string().contains("unreachable"));
    }
}

#[tokio::test]
async fn test_failed_bulk_delete_still_answers_ok() {
    let app = app_over(Arc::new(UnavailableStore));

    let (status, body) = send(&app, get("/api/users/delete")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Failed to delete all users", "result": null})
    );

    let (status, body) = send(&app, get("/api/exercises/delete")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Failed to delete all exercises");
}

#[tokio::test]
async fn test_closed_store_rejects_requests() {
    let store = Arc::new(DocumentStore::in_memory());
    let app = app_over(store.clone());
    store.close().unwrap();

    let (status, _) = send(&app, get("/api/users")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
