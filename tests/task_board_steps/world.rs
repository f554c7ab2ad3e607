//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryTaskStore, RecordingAlertSink},
    domain::{Priority, Task, TaskId},
    services::{BoardError, TaskBoardController},
};

/// Controller type used by the BDD world.
pub type TestBoard = TaskBoardController<InMemoryTaskStore, RecordingAlertSink, DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub board: TestBoard,
    pub store: InMemoryTaskStore,
    pub alerts: RecordingAlertSink,
    pub next_id: u32,
    pub last_result: Option<Result<(), BoardError>>,
}

impl TaskBoardWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryTaskStore::new();
        let alerts = RecordingAlertSink::new();
        let board = TaskBoardController::new(
            Arc::new(store.clone()),
            Arc::new(alerts.clone()),
            Arc::new(DefaultClock),
        );

        Self {
            board,
            store,
            alerts,
            next_id: 1,
            last_result: None,
        }
    }

    /// Issues the next sequential task identifier.
    pub fn issue_id(&mut self) -> Result<TaskId, eyre::Report> {
        let id = TaskId::new(self.next_id.to_string())?;
        self.next_id += 1;
        Ok(id)
    }

    /// Finds a loaded task by title.
    pub fn task_titled(&self, title: &str) -> Result<Task, eyre::Report> {
        self.board
            .tasks()
            .into_iter()
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} on the board"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Parses a priority named in a scenario.
pub fn parse_priority(raw: &str) -> Result<Priority, eyre::Report> {
    Priority::try_from(raw).map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
