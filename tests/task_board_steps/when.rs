//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_priority, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("completed tasks are hidden")]
fn completed_tasks_hidden(world: &mut TaskBoardWorld) {
    world.board.set_hide_completed(true);
}

#[when(r#"the user adds a task titled "{title}""#)]
fn user_adds_task(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    world.board.open_add_form()?;
    world.board.set_form_title(title)?;
    run_async(world.board.save_form()).wrap_err("save the add form")
}

#[when(r#"the user changes the priority of "{title}" to "{priority}" and saves"#)]
fn user_changes_priority(
    world: &mut TaskBoardWorld,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let target = world.task_titled(&title)?;
    world.board.open_edit_form(target.id())?;
    world.board.set_form_priority(Some(parse_priority(&priority)?))?;
    world.last_result = Some(run_async(world.board.save_form()));
    Ok(())
}

#[when(r#"the user deletes "{title}" from its menu"#)]
fn user_deletes_from_menu(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let target = world.task_titled(&title)?;
    world.board.toggle_item_menu(target.id())?;
    world.last_result = Some(run_async(world.board.delete_from_menu(target.id())));
    Ok(())
}

#[when("the board reloads")]
fn board_reloads(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    run_async(world.board.load_tasks()).wrap_err("reload the board")
}

#[when(r#"the user selects the "{priority}" filter"#)]
fn user_selects_filter(world: &mut TaskBoardWorld, priority: String) -> Result<(), eyre::Report> {
    world.board.select_priority_filter(parse_priority(&priority)?);
    Ok(())
}
