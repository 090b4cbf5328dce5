//! Handlers for the four task endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::{StoreError, TaskStore};
use crate::task::{Task, TaskPayload, DEFAULT_STATUS};

pub type SharedStore = Arc<dyn TaskStore>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("no task with id {0}")]
    NotFound(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn require(name: &str, value: &str) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{name} is required")));
    }
    Ok(value.to_string())
}

pub async fn list_tasks(State(store): State<SharedStore>) -> Json<Vec<Task>> {
    Json(store.list())
}

pub async fn create_task(
    State(store): State<SharedStore>,
    Json(payload): Json<TaskPayload>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let title = require("title", &payload.title)?;
    let content = require("content", &payload.content)?;
    let status = payload
        .status
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STATUS.to_string());
    let created = store.create(title, content, status);
    tracing::debug!(id = %created.id, "task created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_task(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<Task>, ApiError> {
    let title = require("title", &payload.title)?;
    let content = require("content", &payload.content)?;
    let status = require("status", payload.status.as_deref().unwrap_or(""))?;
    let updated = store.update(&id, title, content, status)?;
    tracing::debug!(id = %updated.id, status = %updated.status, "task updated");
    Ok(Json(updated))
}

pub async fn delete_task(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(&id)?;
    tracing::debug!(%id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}
