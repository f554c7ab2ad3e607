//! End-to-end board flows against [`InMemoryTaskStore`].

use crate::in_memory::helpers::{BoardFixture, sample_board, task_id, wait_for_requests};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::{InjectedFailure, RecordedRequest, StoreOperation},
    domain::{FormState, InteractionTarget, Priority},
    services::DELETE_FAILED_ALERT,
};

/// Tests that hiding completed tasks narrows the visible list.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hide_completed_shows_only_open_tasks(
    sample_board: Result<BoardFixture, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = sample_board?;
    fixture.board.mount().await?;

    fixture.board.set_hide_completed(true);

    let visible = fixture.board.visible_tasks();
    eyre::ensure!(visible.len() == 1, "expected one visible task");
    eyre::ensure!(
        visible.first().map(|task| task.title()) == Some("A"),
        "expected task A to remain visible"
    );
    eyre::ensure!(fixture.board.tasks().len() == 2, "canonical list unchanged");
    Ok(())
}

/// Tests the full add flow from opening the form to the reloaded list.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn adding_a_task_reloads_the_list(
    sample_board: Result<BoardFixture, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = sample_board?;
    fixture.board.mount().await?;

    fixture.board.open_add_form()?;
    fixture.board.set_form_title("Buy milk")?;
    fixture.board.set_form_description("semi-skimmed")?;
    fixture.board.set_form_priority(Some(Priority::Normal))?;
    fixture.board.save_form().await?;

    eyre::ensure!(
        fixture.board.form_state() == FormState::Closed,
        "form should close after a successful save"
    );
    let added = fixture
        .board
        .tasks()
        .into_iter()
        .find(|task| task.title() == "Buy milk")
        .ok_or_else(|| eyre::eyre!("new task missing after reload"))?;
    eyre::ensure!(!added.is_complete(), "new tasks start incomplete");
    eyre::ensure!(added.description() == Some("semi-skimmed"), "description kept");
    eyre::ensure!(added.priority() == Some(Priority::Normal), "priority kept");
    Ok(())
}

/// Tests that a rejected delete alerts the user and leaves the task.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_delete_alerts_and_keeps_the_task(
    sample_board: Result<BoardFixture, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = sample_board?;
    fixture.board.mount().await?;
    let target = task_id("1")?;
    fixture.board.toggle_item_menu(&target)?;
    fixture.store.fail_next(StoreOperation::Delete, InjectedFailure::Status(500));

    let result = fixture.board.delete_from_menu(&target).await;

    eyre::ensure!(result.is_err(), "delete should fail");
    eyre::ensure!(
        fixture.alerts.alerts() == vec![DELETE_FAILED_ALERT.to_owned()],
        "expected exactly one delete alert"
    );
    fixture.board.load_tasks().await?;
    eyre::ensure!(fixture.board.task(&target).is_some(), "task should remain");
    eyre::ensure!(
        fixture.board.item_state(&target).is_some_and(|item| !item.deleting()),
        "busy flag should be cleared"
    );
    Ok(())
}

/// Tests that an outside click closes the open menu before editing.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn menu_closes_on_outside_interaction(
    sample_board: Result<BoardFixture, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = sample_board?;
    fixture.board.mount().await?;
    let target = task_id("2")?;

    eyre::ensure!(fixture.board.toggle_item_menu(&target)?, "menu should open");
    eyre::ensure!(
        fixture.board.interaction_observer_active(),
        "observer registers while a menu is open"
    );
    let closed = fixture.board.pointer_down(&InteractionTarget::Elsewhere);

    eyre::ensure!(closed == 1, "expected one menu closed, got {closed}");
    eyre::ensure!(
        !fixture.board.interaction_observer_active(),
        "observer releases once menus close"
    );
    Ok(())
}

/// Tests that a failed reload keeps what the user already sees.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_reload_keeps_the_current_list(
    sample_board: Result<BoardFixture, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = sample_board?;
    fixture.board.mount().await?;
    let first_sync = fixture.board.sync_status().last_synced_at;
    fixture.store.fail_next(StoreOperation::List, InjectedFailure::Transport);

    let result = fixture.board.load_tasks().await;

    eyre::ensure!(result.is_err(), "reload should fail");
    eyre::ensure!(fixture.board.tasks().len() == 2, "list should be kept");
    let sync = fixture.board.sync_status();
    eyre::ensure!(sync.last_synced_at == first_sync, "sync time unchanged");
    eyre::ensure!(sync.load_error.is_some(), "load error recorded");
    Ok(())
}

/// Tests that a slow delete shows the item as busy while in flight.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn slow_delete_shows_the_item_as_busy(
    sample_board: Result<BoardFixture, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = sample_board?;
    fixture.board.mount().await?;
    let target = task_id("1")?;
    let gate = fixture.store.pause_next(StoreOperation::Delete);

    let board = fixture.board.clone();
    let deleting = target.clone();
    let pending = tokio::spawn(async move { board.delete_from_menu(&deleting).await });
    wait_for_requests(&fixture.store, 1, |request| {
        matches!(request, RecordedRequest::Delete(_))
    })
    .await?;

    eyre::ensure!(
        fixture.board.item_state(&target).is_some_and(|item| item.deleting()),
        "item should be busy while the delete is in flight"
    );

    gate.release();
    pending.await??;
    eyre::ensure!(fixture.board.task(&target).is_none(), "task should be gone");
    Ok(())
}
