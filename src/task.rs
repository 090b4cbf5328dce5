use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The columns the board renders, in left-to-right order. The backend never
/// validates `status` against this set; it lives here so the UI and the
/// create default agree on the labels.
pub const STATUSES: [&str; 3] = ["A Fazer", "Em Andamento", "Concluído"];

/// Status assigned when a create request carries none.
pub const DEFAULT_STATUS: &str = "A Fazer";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: String,
}

/// Request body for create and update. Missing fields deserialize as empty so
/// validation can answer with a 400 instead of a body rejection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TaskPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Generates a fresh task id. Random UUIDs rather than a timestamp, so rapid
/// successive creates cannot collide.
pub fn new_task_id() -> String {
    format!("task_{}", Uuid::new_v4())
}
