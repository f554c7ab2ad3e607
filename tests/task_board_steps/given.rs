//! Given steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_priority, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::{
    adapters::memory::{InjectedFailure, StoreOperation},
    domain::{Task, TaskParts},
};

fn store_task(
    world: &mut TaskBoardWorld,
    title: String,
    priority: &str,
    is_complete: bool,
) -> Result<(), eyre::Report> {
    let task = Task::from_parts(TaskParts {
        id: world.issue_id()?,
        title,
        description: None,
        priority: Some(parse_priority(priority)?),
        is_complete,
    });
    world.store.insert(task);
    Ok(())
}

#[given(r#"the store holds an open task "{title}" with priority "{priority}""#)]
fn store_holds_open_task(
    world: &mut TaskBoardWorld,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    store_task(world, title, &priority, false)
}

#[given(r#"the store holds a completed task "{title}" with priority "{priority}""#)]
fn store_holds_completed_task(
    world: &mut TaskBoardWorld,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    store_task(world, title, &priority, true)
}

#[given("the board is mounted")]
fn board_is_mounted(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    run_async(world.board.mount()).wrap_err("mount the board")
}

#[given("the store rejects the next {operation} request")]
fn store_rejects_next(world: &mut TaskBoardWorld, operation: String) -> Result<(), eyre::Report> {
    let selected = match operation.as_str() {
        "list" => StoreOperation::List,
        "create" => StoreOperation::Create,
        "update" => StoreOperation::Update,
        "delete" => StoreOperation::Delete,
        other => return Err(eyre::eyre!("unknown store operation {other:?}")),
    };
    world.store.fail_next(selected, InjectedFailure::Status(500));
    Ok(())
}
