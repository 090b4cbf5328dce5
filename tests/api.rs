//! End-to-end tests for the task API, driving the router in-process.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use taskboard::server;
use taskboard::store::MemoryStore;

fn app() -> Router {
    server::app(Arc::new(MemoryStore::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/tasks", Some(body)).await
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().clone()
}

#[tokio::test]
async fn create_returns_the_record_and_lists_it() {
    let app = app();
    let (status, task) = create(&app, json!({"title": "A", "content": "B"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(task["id"].as_str().unwrap().starts_with("task_"));
    assert_eq!(task["title"], "A");
    assert_eq!(task["content"], "B");
    assert_eq!(task["status"], "A Fazer");

    let tasks = list(&app).await;
    assert_eq!(tasks, vec![task]);
}

#[tokio::test]
async fn create_honors_an_explicit_status() {
    let app = app();
    let (status, task) =
        create(&app, json!({"title": "A", "content": "B", "status": "Concluído"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["status"], "Concluído");
}

#[tokio::test]
async fn create_missing_fields_is_rejected() {
    let app = app();
    for body in [
        json!({"content": "B"}),
        json!({"title": "A"}),
        json!({"title": "", "content": "B"}),
        json!({"title": "A", "content": "   "}),
    ] {
        let (status, error) = create(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].is_string());
    }
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn update_replaces_all_fields_except_the_id() {
    let app = app();
    let (_, task) = create(&app, json!({"title": "A", "content": "B"})).await;
    let id = task["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/tasks/{id}"),
        Some(json!({"title": "A2", "content": "B2", "status": "Em Andamento"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], task["id"]);
    assert_eq!(updated["title"], "A2");
    assert_eq!(updated["content"], "B2");
    assert_eq!(updated["status"], "Em Andamento");
    assert_eq!(list(&app).await, vec![updated]);
}

#[tokio::test]
async fn update_requires_every_field() {
    let app = app();
    let (_, task) = create(&app, json!({"title": "A", "content": "B"})).await;
    let id = task["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/tasks/{id}"),
        Some(json!({"title": "A2", "content": "B2"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    // the record is untouched
    assert_eq!(list(&app).await, vec![task]);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let app = app();
    create(&app, json!({"title": "A", "content": "B"})).await;

    let (status, error) = send(
        &app,
        Method::PUT,
        "/api/tasks/task_missing",
        Some(json!({"title": "A", "content": "B", "status": "A Fazer"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(error["error"].is_string());
    assert_eq!(list(&app).await.len(), 1);
}

#[tokio::test]
async fn delete_removes_exactly_one_record() {
    let app = app();
    let (_, first) = create(&app, json!({"title": "A", "content": "B"})).await;
    create(&app, json!({"title": "C", "content": "D"})).await;
    let id = first["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    let tasks = list(&app).await;
    assert_eq!(tasks.len(), 1);
    assert!(tasks.iter().all(|t| t["id"] != first["id"]));
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let app = app();
    create(&app, json!({"title": "A", "content": "B"})).await;

    let (status, _) = send(&app, Method::DELETE, "/api/tasks/task_missing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(list(&app).await.len(), 1);
}

#[tokio::test]
async fn full_lifecycle_round_trip() {
    let app = app();
    let (status, task) = create(&app, json!({"title": "A", "content": "B"})).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = task["id"].as_str().unwrap().to_string();

    assert!(list(&app).await.iter().any(|t| t["id"] == task["id"]));

    let (status, _) = send(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(list(&app).await.iter().all(|t| t["id"] != task["id"]));
}
