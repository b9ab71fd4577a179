//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskWorld, run_async};
use rstest_bdd_macros::then;
use tasklist::task::{
    services::{TaskErrorKind, TaskLifecycleError},
    validation::fields,
};

#[then(r#"the task reads title "{title}" and is unchecked"#)]
fn task_reads_unchecked(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let view = run_async(world.service.fetch_one(id))
        .map_err(|err| eyre::eyre!("fetch_one failed: {err}"))?;
    if view.title != title {
        return Err(eyre::eyre!("expected title '{title}', found '{}'", view.title));
    }
    if view.checked {
        return Err(eyre::eyre!("expected task {id} to be unchecked"));
    }
    Ok(())
}

#[then("the task is now checked")]
fn task_is_now_checked(world: &TaskWorld) -> Result<(), eyre::Report> {
    match world.last_toggle {
        Some(true) => Ok(()),
        other => Err(eyre::eyre!("expected toggle to report true, got {other:?}")),
    }
}

#[then("fetching the task reports not found")]
fn fetching_reports_not_found(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let result = run_async(world.service.fetch_one(id));
    if !matches!(result, Err(TaskLifecycleError::NotFound(_))) {
        return Err(eyre::eyre!("expected not found, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the operation fails with a validation error on "{field}""#)]
fn fails_with_validation_error(world: &TaskWorld, field: String) -> Result<(), eyre::Report> {
    let Some(TaskLifecycleError::Validation(errors)) = world.last_error.as_ref() else {
        return Err(eyre::eyre!(
            "expected validation failure, got {:?}",
            world.last_error
        ));
    };
    if errors.get(&field).is_none() {
        return Err(eyre::eyre!("expected messages for '{field}', got {errors:?}"));
    }
    if field == fields::TITLE && errors.fields().count() != 1 {
        return Err(eyre::eyre!("expected only the title to fail, got {errors:?}"));
    }
    Ok(())
}

#[then("the operation fails as not found")]
fn fails_as_not_found(world: &TaskWorld) -> Result<(), eyre::Report> {
    let kind = world.last_error.as_ref().map(TaskLifecycleError::kind);
    if kind != Some(TaskErrorKind::NotFound) {
        return Err(eyre::eyre!(
            "expected a not-found failure, got {:?}",
            world.last_error
        ));
    }
    Ok(())
}

#[then("the task list holds {count:usize} tasks")]
fn task_list_holds(world: &mut TaskWorld, count: usize) -> Result<(), eyre::Report> {
    let views =
        run_async(world.service.list()).map_err(|err| eyre::eyre!("list failed: {err}"))?;
    if views.len() != count {
        return Err(eyre::eyre!("expected {count} tasks, found {}", views.len()));
    }
    Ok(())
}
