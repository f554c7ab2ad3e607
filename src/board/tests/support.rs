//! Shared builders and fixtures for board unit tests.

use std::sync::Arc;
use std::time::Duration;

use crate::board::{
    adapters::memory::{InMemoryTaskStore, RecordedRequest, RecordingAlertSink},
    domain::{Priority, Task, TaskId, TaskParts},
    services::TaskBoardController,
};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type TestBoard =
    TaskBoardController<InMemoryTaskStore, RecordingAlertSink, DefaultClock>;

pub(super) fn id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

pub(super) fn task(
    value: &str,
    title: &str,
    priority: Option<Priority>,
    is_complete: bool,
) -> Task {
    Task::from_parts(TaskParts {
        id: id(value),
        title: title.to_owned(),
        description: None,
        priority,
        is_complete,
    })
}

/// The two-task list used throughout the board scenarios.
pub(super) fn sample_tasks() -> Vec<Task> {
    vec![
        task("1", "A", Some(Priority::Low), false),
        task("2", "B", Some(Priority::High), true),
    ]
}

pub(super) struct Harness {
    pub(super) board: TestBoard,
    pub(super) store: InMemoryTaskStore,
    pub(super) alerts: RecordingAlertSink,
}

impl Harness {
    pub(super) fn seeded(tasks: Vec<Task>) -> Self {
        let store = InMemoryTaskStore::with_tasks(tasks);
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
        }
    }

    /// Performs the initial load and hands the harness back.
    pub(super) async fn mounted(self) -> Self {
        self.board.mount().await.expect("initial load should succeed");
        self
    }
}

/// Board over the two sample tasks, not yet mounted.
#[fixture]
pub(super) fn sample_board() -> Harness {
    Harness::seeded(sample_tasks())
}

/// Board over an empty store, not yet mounted.
#[fixture]
pub(super) fn empty_board() -> Harness {
    Harness::seeded(Vec::new())
}

/// Waits until the store has received `count` requests matching `matches`.
pub(super) async fn wait_for_requests(
    store: &InMemoryTaskStore,
    count: usize,
    matches: impl Fn(&RecordedRequest) -> bool,
) {
    for _ in 0..500 {
        if store.requests().iter().filter(|request| matches(request)).count() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("store did not receive the expected requests");
}
