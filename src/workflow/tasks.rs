//! Department task board with a work log per task.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Task, TaskLogEntry, TaskStatus};
use crate::rbac::{Action, Resource, Role};

use super::{require, WorkflowError};

/// User-supplied fields for a new task.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[validate(length(min = 3, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub department: String,
    pub assignee: Option<String>,
}

/// Creation-ordered task list for one session's view. Status moves freely
/// between the four states; the permission table decides who moves it.
pub struct TaskBoard {
    role: Option<Role>,
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new(role: Option<Role>) -> Self {
        Self {
            role,
            tasks: Vec::new(),
        }
    }

    /// Creates a pending task. Requires the `create` grant on tasks.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, WorkflowError> {
        require(self.role, Resource::Tasks, Action::Create)?;
        draft.validate()?;

        let task = Task {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            department: draft.department,
            assignee: draft.assignee,
            status: TaskStatus::Pending,
            logs: Vec::new(),
            created_at: Utc::now(),
        };
        info!(task_id = %task.id, department = %task.department, "Task created");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Moves a task to a new status. Requires the `update` grant on tasks.
    pub fn set_status(&mut self, id: Uuid, status: TaskStatus) -> Result<Task, WorkflowError> {
        require(self.role, Resource::Tasks, Action::Update)?;
        let task = Self::entry_mut(&mut self.tasks, id)?;
        task.status = status;
        info!(task_id = %id, status = %status, "Task status updated");
        Ok(task.clone())
    }

    /// Appends a work-log line. Requires the `update` grant on tasks.
    pub fn add_log(
        &mut self,
        id: Uuid,
        message: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<(), WorkflowError> {
        require(self.role, Resource::Tasks, Action::Update)?;
        let task = Self::entry_mut(&mut self.tasks, id)?;
        task.logs.push(TaskLogEntry {
            id: Uuid::new_v4(),
            message: message.into(),
            timestamp: Utc::now(),
            author: author.into(),
        });
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks matching the filter; `None` means all of them.
    pub fn filtered(&self, status: Option<TaskStatus>) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| status.map(|s| t.status == s).unwrap_or(true))
            .collect()
    }

    fn entry_mut(tasks: &mut [Task], id: Uuid) -> Result<&mut Task, TaskError> {
        tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::UnknownTask(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    UnknownTask(Uuid),
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskError::UnknownTask(id) => write!(f, "no task with id {}", id),
        }
    }
}

impl std::error::Error for TaskError {}
