//! Service-level errors for task board operations.

use crate::board::{domain::TaskDomainError, ports::TaskStoreError};
use std::fmt;
use thiserror::Error;

/// Store-facing operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardOperation {
    /// Fetching the task list.
    LoadTasks,
    /// Creating a task.
    CreateTask,
    /// Updating a task.
    UpdateTask,
    /// Deleting a task.
    DeleteTask,
}

impl BoardOperation {
    /// Returns a short human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadTasks => "load tasks",
            Self::CreateTask => "create task",
            Self::UpdateTask => "update task",
            Self::DeleteTask => "delete task",
        }
    }
}

impl fmt::Display for BoardOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the task board controller. None of them are fatal;
/// the board stays usable after every failure.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The store could not be reached or its reply could not be read.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// The store replied with a status other than 200.
    #[error("{operation} rejected with status {status}")]
    UnexpectedStatus {
        /// Operation that failed.
        operation: BoardOperation,
        /// Status returned by the store.
        status: u16,
    },

    /// A successful reply lacked the payload the operation needs.
    #[error("{0} reply carried no payload")]
    MissingPayload(BoardOperation),
}

/// Result type for task board operations.
pub type BoardResult<T> = Result<T, BoardError>;
