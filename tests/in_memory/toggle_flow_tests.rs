//! Optimistic completion toggles against a slow in-memory store.

use crate::in_memory::helpers::{BoardFixture, sample_board, task_id, wait_for_requests};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::{InjectedFailure, RecordedRequest, StoreOperation},
    domain::TaskPatch,
};

/// Tests that the flag flips before a stalled request resolves.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stalled_confirmation_does_not_delay_the_flip(
    sample_board: Result<BoardFixture, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = sample_board?;
    fixture.board.mount().await?;
    let target = task_id("1")?;
    let gate = fixture.store.pause_next(StoreOperation::Update);

    let confirmation = fixture.board.toggle_complete(&target)?;

    eyre::ensure!(
        fixture.board.task(&target).is_some_and(|task| task.is_complete()),
        "flag should flip immediately"
    );
    wait_for_requests(&fixture.store, 1, |request| {
        matches!(request, RecordedRequest::Update(..))
    })
    .await?;
    eyre::ensure!(
        fixture.store.requests().contains(&RecordedRequest::Update(
            target.clone(),
            TaskPatch::completion(true)
        )),
        "only the completion flag should be sent"
    );

    gate.release();
    confirmation.await?;
    eyre::ensure!(
        fixture.board.task(&target).is_some_and(|task| task.is_complete()),
        "reload should agree with the flip"
    );
    Ok(())
}

/// Tests that a rejected confirmation leaves the local flag diverged until
/// the next load.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_confirmation_diverges_until_reload(
    sample_board: Result<BoardFixture, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = sample_board?;
    fixture.board.mount().await?;
    let target = task_id("2")?;
    fixture.store.fail_next(StoreOperation::Update, InjectedFailure::Status(500));

    fixture.board.toggle_complete(&target)?.await?;

    eyre::ensure!(
        fixture.board.task(&target).is_some_and(|task| !task.is_complete()),
        "local flag keeps the optimistic value"
    );
    fixture.board.load_tasks().await?;
    eyre::ensure!(
        fixture.board.task(&target).is_some_and(|task| task.is_complete()),
        "reload restores the stored value"
    );
    Ok(())
}
