//! When steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskflow::task::services::{CreateTaskRequest, TransitionTaskRequest};

#[when(r#""{username}" with password "{password}" creates the task "{name}""#)]
fn create_task(world: &mut TaskWorkflowWorld, username: String, password: String, name: String) {
    let result = run_async(world.workflow.service.create_task(
        CreateTaskRequest::new(username, password, name, "DEMO").with_description("desc"),
    ));
    world.record(&result);
    if let Ok(task) = result {
        world.last_created_id = Some(task.id().as_str().to_owned());
    }
}

#[when(r#""{username}" with password "{password}" promotes "{id}" to done"#)]
fn promote_task(
    world: &mut TaskWorkflowWorld,
    username: String,
    password: String,
    id: String,
) -> Result<(), eyre::Report> {
    let result = run_async(
        world
            .workflow
            .service
            .transition_task(TransitionTaskRequest::promote_to_done(username, password, id)),
    );
    world.record(&result);
    if let Ok(receipt) = result {
        if let Some(delivery) = receipt.notification {
            run_async(delivery).wrap_err("await done notification")?;
        }
    }
    Ok(())
}
