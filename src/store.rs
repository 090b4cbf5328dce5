use std::sync::RwLock;

use thiserror::Error;

use crate::task::{self, Task};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no task with id {0}")]
    NotFound(String),
}

/// The board's "database". Route handlers only see this interface, so the
/// in-memory list can be swapped for a real backend without touching them.
pub trait TaskStore: Send + Sync {
    /// All tasks, in insertion order.
    fn list(&self) -> Vec<Task>;
    /// Synthesizes an id, appends the task and returns it.
    fn create(&self, title: String, content: String, status: String) -> Task;
    /// Replaces every field except `id`.
    fn update(
        &self,
        id: &str,
        title: String,
        content: String,
        status: String,
    ) -> Result<Task, StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for MemoryStore {
    fn list(&self) -> Vec<Task> {
        self.tasks.read().expect("task list lock poisoned").clone()
    }

    fn create(&self, title: String, content: String, status: String) -> Task {
        let created = Task {
            id: task::new_task_id(),
            title,
            content,
            status,
        };
        self.tasks
            .write()
            .expect("task list lock poisoned")
            .push(created.clone());
        created
    }

    fn update(
        &self,
        id: &str,
        title: String,
        content: String,
        status: String,
    ) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().expect("task list lock poisoned");
        let found = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        found.title = title;
        found.content = content;
        found.status = status;
        Ok(found.clone())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().expect("task list lock poisoned");
        let len_before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == len_before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
