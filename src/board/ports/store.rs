//! Remote store port for the canonical task list.

use crate::board::domain::{NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Status-plus-payload reply from the remote store.
///
/// Only status 200 counts as success; every other status is a failed
/// request even when the transport succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse<T> {
    status: u16,
    payload: Option<T>,
}

impl<T> StoreResponse<T> {
    /// The only status treated as success.
    pub const OK: u16 = 200;

    /// Successful reply carrying `payload`.
    #[must_use]
    pub const fn ok(payload: T) -> Self {
        Self {
            status: Self::OK,
            payload: Some(payload),
        }
    }

    /// Reply with an arbitrary status and no payload.
    #[must_use]
    pub const fn status_only(status: u16) -> Self {
        Self {
            status,
            payload: None,
        }
    }

    /// Returns the reply status.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns whether the status is 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == Self::OK
    }

    /// Returns the payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Consumes the reply and returns the payload, if any.
    #[must_use]
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

/// Remote task store contract.
///
/// Implementations attach credentials themselves and report HTTP-shaped
/// status codes; only transport and decoding failures are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetches the whole task list in store order.
    async fn list(&self) -> TaskStoreResult<StoreResponse<Vec<Task>>>;

    /// Creates a task with `isComplete=false` and returns it with its
    /// assigned identifier.
    async fn create(&self, new_task: &NewTask) -> TaskStoreResult<StoreResponse<Task>>;

    /// Applies a partial update to the identified task.
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskStoreResult<StoreResponse<()>>;

    /// Deletes the identified task.
    async fn delete(&self, id: &TaskId) -> TaskStoreResult<StoreResponse<()>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The request never produced a reply.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The reply body could not be decoded.
    #[error("failed to decode store reply: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a transport error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a decoding error.
    #[must_use]
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }
}
