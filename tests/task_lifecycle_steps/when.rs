//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskWorld, build_payload, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use tasklist::task::domain::TaskId;

#[when(r#"a task titled "{title}" with description "{description}" is created"#)]
fn create_task_with_description(
    world: &mut TaskWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .service
            .create(&build_payload(&title, Some(&description), false)),
    )
    .wrap_err("create task")?;
    world.current_id = Some(created.id());
    world.last_created = Some(created);
    Ok(())
}

#[when(r#"a task titled "{title}" is created again"#)]
fn create_task_again(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    match run_async(world.service.create(&build_payload(&title, None, true))) {
        Ok(task) => Err(eyre::eyre!("expected creation to fail, stored {task:?}")),
        Err(err) => {
            world.last_error = Some(err);
            Ok(())
        }
    }
}

#[when("the task is toggled")]
fn toggle_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let checked = run_async(world.service.toggle_checked(id)).wrap_err("toggle task")?;
    world.last_toggle = Some(checked);
    Ok(())
}

#[when("the task is deleted")]
fn delete_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    run_async(world.service.delete(id)).wrap_err("delete task")?;
    Ok(())
}

#[when(r#"task {id:u32} is updated with title "{title}""#)]
fn update_task(world: &mut TaskWorld, id: u32, title: String) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).wrap_err("scenario task id")?;
    match run_async(world.service.update(task_id, &build_payload(&title, None, false))) {
        Ok(task) => Err(eyre::eyre!("expected update to fail, stored {task:?}")),
        Err(err) => {
            world.last_error = Some(err);
            Ok(())
        }
    }
}

#[when("the tasks are listed")]
fn list_tasks(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    match run_async(world.service.list()) {
        Ok(views) => Err(eyre::eyre!("expected listing to fail, got {views:?}")),
        Err(err) => {
            world.last_error = Some(err);
            Ok(())
        }
    }
}
