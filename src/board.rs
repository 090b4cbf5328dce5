use crate::client::{ClientError, TaskApi};
use crate::task::{Task, TaskPayload, STATUSES};

/// Client-side copy of the task list plus the current selection. The server
/// stays the source of truth; this state is refreshed from it and mutated
/// optimistically in between.
#[derive(Debug, Default)]
pub struct Board {
    pub tasks: Vec<Task>,
    pub selected_status: usize,
    pub selected_task: usize,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces local state with the server's list.
    pub fn refresh(&mut self, api: &dyn TaskApi) -> Result<(), ClientError> {
        self.tasks = api.list()?;
        self.clamp_selection();
        Ok(())
    }

    pub fn tasks_in(&self, status: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// The card the cursor is on, if the selected column has any.
    pub fn selected(&self) -> Option<&Task> {
        self.tasks_in(STATUSES[self.selected_status])
            .get(self.selected_task)
            .copied()
    }

    pub fn select_column(&mut self, direction: isize) {
        let last = STATUSES.len() as isize - 1;
        self.selected_status =
            (self.selected_status as isize + direction).clamp(0, last) as usize;
        self.clamp_selection();
    }

    pub fn select_task(&mut self, direction: isize) {
        let count = self.tasks_in(STATUSES[self.selected_status]).len();
        if count == 0 {
            self.selected_task = 0;
            return;
        }
        let last = count as isize - 1;
        self.selected_task = (self.selected_task as isize + direction).clamp(0, last) as usize;
    }

    /// Moves the selected card one column left or right: set the new status
    /// locally first so the board redraws at once, then confirm with a PUT.
    /// If the request fails the status is put back and the error returned for
    /// the UI to surface.
    pub fn move_selected(
        &mut self,
        direction: isize,
        api: &dyn TaskApi,
    ) -> Result<(), ClientError> {
        let last = STATUSES.len() as isize - 1;
        let target = (self.selected_status as isize + direction).clamp(0, last) as usize;
        if target == self.selected_status {
            return Ok(());
        }
        let Some(task) = self.selected().cloned() else {
            return Ok(());
        };
        let prior_status = task.status.clone();
        let new_status = STATUSES[target].to_string();
        self.set_status(&task.id, new_status.clone());

        let payload = TaskPayload {
            title: task.title,
            content: task.content,
            status: Some(new_status),
        };
        match api.update(&task.id, &payload) {
            Ok(updated) => {
                self.apply_updated(updated);
                self.clamp_selection();
                Ok(())
            }
            Err(err) => {
                // Compensate: the server never saw the move.
                self.set_status(&task.id, prior_status);
                Err(err)
            }
        }
    }

    /// Merges a freshly created task into local state.
    pub fn apply_created(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Merges the server's view of an updated task into local state.
    pub fn apply_updated(&mut self, task: Task) {
        if let Some(found) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *found = task;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);
        self.clamp_selection();
    }

    fn set_status(&mut self, id: &str, status: String) {
        if let Some(found) = self.tasks.iter_mut().find(|t| t.id == id) {
            found.status = status;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.tasks_in(STATUSES[self.selected_status]).len();
        if count == 0 {
            self.selected_task = 0;
        } else if self.selected_task >= count {
            self.selected_task = count - 1;
        }
    }
}
