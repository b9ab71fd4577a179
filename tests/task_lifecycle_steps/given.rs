//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskWorld, build_payload, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an empty task list")]
fn an_empty_task_list(world: &mut TaskWorld) {
    world.current_id = None;
    world.last_created = None;
}

#[given(r#"a task titled "{title}""#)]
fn a_task_titled(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(&build_payload(&title, None, false)))
        .wrap_err("create task for scenario")?;
    world.current_id = Some(created.id());
    world.last_created = Some(created);
    Ok(())
}
