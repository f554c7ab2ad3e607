//! In-memory task store with latency and failure injection.
//!
//! Each request is applied the moment it is issued. A [`StoreGate`] taken
//! with [`InMemoryTaskStore::pause_next`] only holds back the *reply*, which
//! models a slow network between a store that already answered and the
//! client.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;
use tracing::debug;

use crate::board::{
    domain::{NewTask, Task, TaskId, TaskPatch},
    ports::{StoreResponse, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Store operation selector for injection and gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// List tasks.
    List,
    /// Create a task.
    Create,
    /// Update a task.
    Update,
    /// Delete a task.
    Delete,
}

/// Failure returned in place of the next reply for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    /// The request fails without a reply.
    Transport,
    /// The store replies with this non-success status.
    Status(u16),
}

/// A request as received by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    /// List request.
    List,
    /// Create request.
    Create(NewTask),
    /// Update request.
    Update(TaskId, TaskPatch),
    /// Delete request.
    Delete(TaskId),
}

impl RecordedRequest {
    const fn operation(&self) -> StoreOperation {
        match self {
            Self::List => StoreOperation::List,
            Self::Create(_) => StoreOperation::Create,
            Self::Update(..) => StoreOperation::Update,
            Self::Delete(_) => StoreOperation::Delete,
        }
    }
}

/// Holds back one reply until released or dropped.
#[derive(Debug)]
pub struct StoreGate {
    sender: watch::Sender<bool>,
}

impl StoreGate {
    /// Lets the held reply through.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for StoreGate {
    fn drop(&mut self) {
        self.sender.send_replace(false);
    }
}

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tasks: Vec<Task>,
    requests: Vec<RecordedRequest>,
    failures: HashMap<StoreOperation, VecDeque<InjectedFailure>>,
    gates: HashMap<StoreOperation, VecDeque<watch::Receiver<bool>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `tasks` in the given order.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let store = Self::default();
        if let Ok(mut state) = store.state.write() {
            state.tasks = tasks.into_iter().collect();
        }
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, InMemoryStoreState> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state.write().map_err(|err| {
            TaskStoreError::transport(std::io::Error::other(err.to_string()))
        })
    }

    /// Appends a task directly, as if another client had created it. The
    /// request log is left untouched.
    pub fn insert(&self, task: Task) {
        if let Ok(mut state) = self.write() {
            state.tasks.push(task);
        }
    }

    /// Returns the stored tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks.clone()
    }

    /// Returns every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.read().requests.clone()
    }

    /// Makes the next request for `operation` fail with `failure`.
    /// Queued failures are consumed in order.
    pub fn fail_next(&self, operation: StoreOperation, failure: InjectedFailure) {
        if let Ok(mut state) = self.write() {
            state
                .failures
                .entry(operation)
                .or_default()
                .push_back(failure);
        }
    }

    /// Holds back the reply to the next request for `operation` until the
    /// returned gate is released or dropped.
    #[must_use = "dropping the gate releases the reply immediately"]
    pub fn pause_next(&self, operation: StoreOperation) -> StoreGate {
        let (sender, receiver) = watch::channel(true);
        if let Ok(mut state) = self.write() {
            state
                .gates
                .entry(operation)
                .or_default()
                .push_back(receiver);
        }
        StoreGate { sender }
    }

    async fn respond<T>(
        &self,
        request: RecordedRequest,
        apply: impl FnOnce(&mut InMemoryStoreState) -> StoreResponse<T> + Send,
    ) -> TaskStoreResult<StoreResponse<T>>
    where
        T: Send,
    {
        let operation = request.operation();
        let (reply, gate) = {
            let mut state = self.write()?;
            state.requests.push(request);
            let held = state
                .gates
                .get_mut(&operation)
                .and_then(VecDeque::pop_front);
            let failure = state
                .failures
                .get_mut(&operation)
                .and_then(VecDeque::pop_front);
            let outcome = match failure {
                Some(InjectedFailure::Transport) => Err(TaskStoreError::transport(
                    std::io::Error::other("injected transport failure"),
                )),
                Some(InjectedFailure::Status(status)) => Ok(StoreResponse::status_only(status)),
                None => Ok(apply(&mut *state)),
            };
            (outcome, held)
        };

        if let Some(mut paused) = gate {
            let released = paused.wait_for(|is_held| !*is_held).await.is_ok();
            debug!(?operation, released, "in-memory store reply released");
        }
        reply
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list(&self) -> TaskStoreResult<StoreResponse<Vec<Task>>> {
        self.respond(RecordedRequest::List, |state| {
            StoreResponse::ok(state.tasks.clone())
        })
        .await
    }

    async fn create(&self, new_task: &NewTask) -> TaskStoreResult<StoreResponse<Task>> {
        let payload = new_task.clone();
        self.respond(RecordedRequest::Create(new_task.clone()), move |state| {
            let task = Task::from_new(TaskId::generate(), payload);
            state.tasks.push(task.clone());
            StoreResponse::ok(task)
        })
        .await
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskStoreResult<StoreResponse<()>> {
        let target = id.clone();
        let changes = patch.clone();
        self.respond(
            RecordedRequest::Update(id.clone(), patch.clone()),
            move |state| match state.tasks.iter_mut().find(|task| *task.id() == target) {
                Some(task) => {
                    task.apply_patch(&changes);
                    StoreResponse::ok(())
                }
                None => StoreResponse::status_only(404),
            },
        )
        .await
    }

    async fn delete(&self, id: &TaskId) -> TaskStoreResult<StoreResponse<()>> {
        let target = id.clone();
        self.respond(RecordedRequest::Delete(id.clone()), move |state| {
            let before = state.tasks.len();
            state.tasks.retain(|task| *task.id() != target);
            if state.tasks.len() == before {
                StoreResponse::status_only(404)
            } else {
                StoreResponse::ok(())
            }
        })
        .await
    }
}
