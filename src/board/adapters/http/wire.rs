//! JSON shapes exchanged with the task API.
//!
//! The API names the title `task`, the identifier `_id`, and uses the empty
//! string for an unset priority or description.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::domain::{NewTask, Priority, Task, TaskDomainError, TaskId, TaskParts, TaskPatch};

/// Task as serialized by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct TaskRecord {
    #[serde(rename = "_id")]
    pub(crate) id: String,
    #[serde(rename = "task", default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) priority: Option<String>,
    #[serde(rename = "isComplete", default)]
    pub(crate) is_complete: bool,
}

impl TaskRecord {
    /// Converts the record into a domain task. Unknown priorities are
    /// treated as unset.
    pub(crate) fn into_task(self) -> Result<Task, TaskDomainError> {
        let id = TaskId::new(self.id)?;
        let priority = match self.priority.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match Priority::try_from(raw) {
                Ok(priority) => Some(priority),
                Err(err) => {
                    warn!(task_id = %id, error = %err, "ignoring unknown task priority");
                    None
                }
            },
        };
        Ok(Task::from_parts(TaskParts {
            id,
            title: self.title,
            description: self.description.filter(|text| !text.is_empty()),
            priority,
            is_complete: self.is_complete,
        }))
    }
}

/// Reply envelope of the list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope {
    pub(crate) data: Vec<TaskRecord>,
}

/// Reply envelope of the create endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TaskEnvelope {
    pub(crate) data: TaskRecord,
}

/// Request body of the create endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct CreateBody<'a> {
    task: &'a str,
    description: &'a str,
    priority: &'a str,
    #[serde(rename = "isComplete")]
    is_complete: bool,
}

impl<'a> From<&'a NewTask> for CreateBody<'a> {
    fn from(new_task: &'a NewTask) -> Self {
        Self {
            task: &new_task.title,
            description: new_task.description.as_deref().unwrap_or_default(),
            priority: new_task.priority.map_or("", Priority::as_str),
            is_complete: false,
        }
    }
}

/// Request body of the update endpoint; absent fields are left untouched.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<&'a str>,
    #[serde(rename = "isComplete", skip_serializing_if = "Option::is_none")]
    is_complete: Option<bool>,
}

impl<'a> From<&'a TaskPatch> for UpdateBody<'a> {
    fn from(patch: &'a TaskPatch) -> Self {
        Self {
            task: patch.title.as_deref(),
            description: patch
                .description
                .as_ref()
                .map(|text| text.as_deref().unwrap_or_default()),
            priority: patch
                .priority
                .map(|priority| priority.map_or("", Priority::as_str)),
            is_complete: patch.is_complete,
        }
    }
}
