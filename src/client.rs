//! Blocking HTTP client for the task API.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::task::{Task, TaskPayload};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// What the board needs from the backend. A seam for tests, which drive the
/// board against a fake instead of a live server.
pub trait TaskApi {
    fn list(&self) -> Result<Vec<Task>, ClientError>;
    fn create(&self, payload: &TaskPayload) -> Result<Task, ClientError>;
    fn update(&self, id: &str, payload: &TaskPayload) -> Result<Task, ClientError>;
    fn delete(&self, id: &str) -> Result<(), ClientError>;
}

pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/api/tasks/{id}", self.base_url)
    }

    /// Turns non-2xx answers into [`ClientError::Api`], preferring the
    /// `{"error": ...}` message the backend puts in failure bodies.
    fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<Value>()
            .ok()
            .and_then(|body| body.get("error")?.as_str().map(str::to_string))
            .unwrap_or_else(|| status.to_string());
        Err(ClientError::Api { status, message })
    }
}

impl TaskApi for ApiClient {
    fn list(&self) -> Result<Vec<Task>, ClientError> {
        let response = Self::check(self.http.get(self.collection_url()).send()?)?;
        Ok(response.json()?)
    }

    fn create(&self, payload: &TaskPayload) -> Result<Task, ClientError> {
        let response = Self::check(self.http.post(self.collection_url()).json(payload).send()?)?;
        Ok(response.json()?)
    }

    fn update(&self, id: &str, payload: &TaskPayload) -> Result<Task, ClientError> {
        let response = Self::check(self.http.put(self.item_url(id)).json(payload).send()?)?;
        Ok(response.json()?)
    }

    fn delete(&self, id: &str) -> Result<(), ClientError> {
        Self::check(self.http.delete(self.item_url(id)).send()?)?;
        Ok(())
    }
}
