//! Error types for board domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while operating on domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A form session is already open; the modal is exclusive.
    #[error("a task form is already open")]
    FormAlreadyOpen,

    /// The operation requires an open form session.
    #[error("no task form is open")]
    FormNotOpen,

    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The referenced task is not present in the canonical list.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Error returned while parsing task priorities from the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
