//! Task board controller: canonical list, mutations, and reloads.
//!
//! The controller owns the canonical task list. Every mutation except the
//! completion toggle is fetch-then-reconcile: issue the request, and on a
//! 200 reply reload the whole list. The toggle is optimistic: the local
//! flag flips synchronously and the confirming update runs in the
//! background.
//!
//! State lives behind one lock that is never held across an await, so
//! clones of the controller share one board and spawned confirmations write
//! back into it. Reloads are neither coalesced nor cancelled: whichever
//! list reply resolves last is the one shown.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{BoardConfig, BoardError, BoardOperation, BoardResult, TogglePolicy};
use crate::board::{
    domain::{
        FilterState, FormMode, FormSession, ItemArena, NewTask, Task, TaskDomainError, TaskId,
        TaskPatch,
    },
    ports::{AlertSink, StoreResponse, TaskStore},
};

/// Message shown when a delete fails.
pub const DELETE_FAILED_ALERT: &str = "An error occurred while deleting the task.";

/// Freshness of the canonical list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncStatus {
    /// Time of the last successful list load.
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Message of the last failed list load, cleared by the next success.
    pub load_error: Option<String>,
}

#[derive(Debug, Default)]
pub(super) struct BoardState {
    pub(super) tasks: Vec<Task>,
    pub(super) filter: FilterState,
    pub(super) form: Option<FormSession>,
    pub(super) items: ItemArena,
    pub(super) sync: SyncStatus,
}

impl BoardState {
    /// Re-derives the rendered item set after the list or filter changed.
    pub(super) fn sync_items(&mut self) {
        let filter = self.filter;
        self.items.reconcile(
            self.tasks
                .iter()
                .filter(|task| filter.admits(task))
                .map(Task::id),
        );
    }

    pub(super) fn find_task(&self, id: &TaskId) -> Result<&Task, TaskDomainError> {
        self.tasks
            .iter()
            .find(|task| task.id() == id)
            .ok_or_else(|| TaskDomainError::TaskNotFound(id.clone()))
    }

    /// Closes the form only if it is still in `mode`.
    pub(super) fn close_form_in(&mut self, mode: &FormMode) {
        if self.form.as_ref().is_some_and(|session| session.mode() == mode) {
            self.form = None;
        }
    }
}

/// Orchestrates the task list, filters, form session, and item views.
pub struct TaskBoardController<S, A, C>
where
    S: TaskStore,
    A: AlertSink,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    alerts: Arc<A>,
    clock: Arc<C>,
    config: BoardConfig,
    pub(super) state: Arc<RwLock<BoardState>>,
}

impl<S, A, C> Clone for TaskBoardController<S, A, C>
where
    S: TaskStore,
    A: AlertSink,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            alerts: Arc::clone(&self.alerts),
            clock: Arc::clone(&self.clock),
            config: self.config,
            state: Arc::clone(&self.state),
        }
    }
}

fn expect_ok<T>(
    response: StoreResponse<T>,
    operation: BoardOperation,
) -> BoardResult<StoreResponse<T>> {
    if response.is_ok() {
        Ok(response)
    } else {
        Err(BoardError::UnexpectedStatus {
            operation,
            status: response.status(),
        })
    }
}

impl<S, A, C> TaskBoardController<S, A, C>
where
    S: TaskStore,
    A: AlertSink,
    C: Clock + Send + Sync,
{
    /// Creates a controller with an empty list and default settings.
    #[must_use]
    pub fn new(store: Arc<S>, alerts: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            store,
            alerts,
            clock,
            config: BoardConfig::default(),
            state: Arc::new(RwLock::new(BoardState::default())),
        }
    }

    /// Replaces the controller settings.
    #[must_use]
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the controller settings.
    #[must_use]
    pub const fn config(&self) -> BoardConfig {
        self.config
    }

    pub(super) fn read(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the canonical list in store order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks.clone()
    }

    /// Returns one task from the canonical list.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<Task> {
        self.read().find_task(id).ok().cloned()
    }

    /// Returns the freshness of the canonical list.
    #[must_use]
    pub fn sync_status(&self) -> SyncStatus {
        self.read().sync.clone()
    }

    /// Performs the initial load.
    ///
    /// # Errors
    ///
    /// Returns the load failure; the board stays empty and usable.
    pub async fn mount(&self) -> BoardResult<()> {
        info!("mounting task board");
        self.load_tasks().await
    }

    /// Fetches the task list and replaces the canonical list wholesale.
    ///
    /// On failure the previous list is kept and the load-error indicator is
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the request fails, the status is not 200,
    /// or the reply has no list.
    pub async fn load_tasks(&self) -> BoardResult<()> {
        let outcome = self
            .store
            .list()
            .await
            .map_err(BoardError::from)
            .and_then(|response| expect_ok(response, BoardOperation::LoadTasks))
            .and_then(|response| {
                response
                    .into_payload()
                    .ok_or(BoardError::MissingPayload(BoardOperation::LoadTasks))
            });

        match outcome {
            Ok(tasks) => {
                let count = tasks.len();
                let synced_at = self.clock.utc();
                let mut state = self.write();
                state.tasks = tasks;
                state.sync = SyncStatus {
                    last_synced_at: Some(synced_at),
                    load_error: None,
                };
                state.sync_items();
                debug!(count, "task list replaced");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "task list load failed; keeping previous list");
                self.write().sync.load_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Reloads after a successful mutation. A failed reload is already
    /// recorded by [`Self::load_tasks`] and does not undo the mutation.
    async fn refresh(&self) {
        if self.load_tasks().await.is_err() {
            debug!("reload after mutation failed");
        }
    }

    /// Creates a task with `isComplete=false`.
    ///
    /// On success an open add form is closed and the list reloaded. On
    /// failure the form stays open with its input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the request fails or the status is not
    /// 200.
    pub async fn create_task(&self, new_task: NewTask) -> BoardResult<()> {
        let outcome = self
            .store
            .create(&new_task)
            .await
            .map_err(BoardError::from)
            .and_then(|response| expect_ok(response, BoardOperation::CreateTask));

        match outcome {
            Ok(response) => {
                info!(
                    task_id = ?response.payload().map(Task::id),
                    title = %new_task.title,
                    "task created"
                );
                self.write().close_form_in(&FormMode::Add);
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "task creation failed; form stays open");
                Err(err)
            }
        }
    }

    /// Sends a partial update without reloading.
    pub(super) async fn send_update(&self, id: &TaskId, patch: &TaskPatch) -> BoardResult<()> {
        let outcome = self
            .store
            .update(id, patch)
            .await
            .map_err(BoardError::from)
            .and_then(|response| expect_ok(response, BoardOperation::UpdateTask));

        match outcome {
            Ok(_) => {
                debug!(task_id = %id, "task updated");
                Ok(())
            }
            Err(err) => {
                warn!(task_id = %id, error = %err, "task update failed");
                Err(err)
            }
        }
    }

    /// Applies a partial update and reloads on success.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the request fails or the status is not
    /// 200.
    pub async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> BoardResult<()> {
        self.send_update(id, &patch).await?;
        self.refresh().await;
        Ok(())
    }

    /// Deletes a task and reloads on success.
    ///
    /// A failure raises a user-visible alert, since the user must not be
    /// left believing the task is gone.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the request fails or the status is not
    /// 200.
    pub async fn delete_task(&self, id: &TaskId) -> BoardResult<()> {
        let outcome = self
            .store
            .delete(id)
            .await
            .map_err(BoardError::from)
            .and_then(|response| expect_ok(response, BoardOperation::DeleteTask));

        match outcome {
            Ok(_) => {
                info!(task_id = %id, "task deleted");
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                warn!(task_id = %id, error = %err, "task deletion failed");
                self.alerts.alert(DELETE_FAILED_ALERT);
                Err(err)
            }
        }
    }
}

impl<S, A, C> TaskBoardController<S, A, C>
where
    S: TaskStore + 'static,
    A: AlertSink + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Flips the completion flag of `id` locally, then confirms it with the
    /// store in a background task.
    ///
    /// The flip is visible to readers as soon as this returns, before any
    /// request resolves. A successful confirmation reloads the list. A
    /// failed one is logged and, under [`TogglePolicy::ApplyThenConfirm`],
    /// not compensated. Two quick toggles of one task race their
    /// confirmations; the store keeps whichever lands last.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotFound`] (wrapped) when `id` is not
    /// in the canonical list; no request is issued then.
    pub fn toggle_complete(&self, id: &TaskId) -> BoardResult<JoinHandle<()>> {
        let previous = {
            let mut state = self.write();
            let task = state
                .tasks
                .iter_mut()
                .find(|task| task.id() == id)
                .ok_or_else(|| TaskDomainError::TaskNotFound(id.clone()))?;
            let was_complete = task.is_complete();
            task.set_complete(!was_complete);
            state.sync_items();
            was_complete
        };
        debug!(task_id = %id, is_complete = !previous, "completion flipped locally");

        let board = self.clone();
        let task_id = id.clone();
        Ok(tokio::spawn(async move {
            board.confirm_toggle(task_id, previous).await;
        }))
    }

    async fn confirm_toggle(&self, id: TaskId, previous: bool) {
        let optimistic = !previous;
        match self.send_update(&id, &TaskPatch::completion(optimistic)).await {
            Ok(()) => self.refresh().await,
            Err(err) => match self.config.toggle_policy {
                TogglePolicy::ApplyThenConfirm => {
                    warn!(task_id = %id, error = %err, "completion not confirmed; keeping local flag");
                }
                TogglePolicy::RollbackOnFailure => {
                    warn!(task_id = %id, error = %err, "completion not confirmed; rolling back");
                    let mut state = self.write();
                    if let Some(task) = state
                        .tasks
                        .iter_mut()
                        .find(|task| *task.id() == id && task.is_complete() == optimistic)
                    {
                        task.set_complete(previous);
                    }
                    state.sync_items();
                }
            },
        }
    }
}
