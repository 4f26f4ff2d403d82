//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use crate::test_helpers::running_number;
use rstest_bdd_macros::then;
use taskflow::api::ResponseCode;
use taskflow::identity::{domain::GroupName, ports::IdentityRepository};
use taskflow::task::{domain::TaskId, ports::TaskRepository};

#[then(r#"the created task id is "{id}""#)]
fn created_task_id_is(world: &TaskWorkflowWorld, id: String) -> Result<(), eyre::Report> {
    let created = world
        .last_created_id
        .as_deref()
        .ok_or_else(|| eyre::eyre!("no task created in scenario"))?;
    eyre::ensure!(created == id, "expected task id {id}, found {created}");
    Ok(())
}

#[then("the running number is {number:u32}")]
fn running_number_is(world: &TaskWorkflowWorld, number: u32) -> Result<(), eyre::Report> {
    let current = running_number(&world.workflow)?;
    eyre::ensure!(current == number, "expected running number {number}, found {current}");
    Ok(())
}

#[then("the request succeeds")]
fn request_succeeds(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let actual = world
        .last_code
        .ok_or_else(|| eyre::eyre!("no request made in scenario"))?;
    eyre::ensure!(actual == ResponseCode::S001, "expected success, got {actual}");
    Ok(())
}

#[then(r#"the request fails with code "{code}""#)]
fn request_fails_with_code(world: &TaskWorkflowWorld, code: String) -> Result<(), eyre::Report> {
    let actual = world
        .last_code
        .ok_or_else(|| eyre::eyre!("no request made in scenario"))?;
    eyre::ensure!(actual.as_str() == code, "expected code {code}, got {actual}");
    Ok(())
}

#[then(r#"the task "{id}" is in state "{state}" and owned by "{owner}""#)]
fn task_is_in_state(
    world: &TaskWorkflowWorld,
    id: String,
    state: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let task = run_async(world.workflow.store.find_by_id(&TaskId::new(id.as_str())?))?
        .ok_or_else(|| eyre::eyre!("task {id} not found"))?;
    eyre::ensure!(
        task.state().as_str() == state,
        "expected state {state}, found {}",
        task.state()
    );
    eyre::ensure!(
        task.owner().as_str() == owner,
        "expected owner {owner}, found {}",
        task.owner()
    );
    Ok(())
}

#[then(r#"the members of "{group}" are notified about "{id}""#)]
fn members_are_notified(
    world: &TaskWorkflowWorld,
    group: String,
    id: String,
) -> Result<(), eyre::Report> {
    let expected = run_async(world.workflow.store.member_emails(&GroupName::new(group)))?;
    let sent = world.workflow.notifier.sent();
    let [message] = sent.as_slice() else {
        return Err(eyre::eyre!("expected one notification, found {}", sent.len()));
    };
    eyre::ensure!(message.recipients == expected, "unexpected recipients {:?}", message.recipients);
    eyre::ensure!(
        message.subject == format!("Task {id} Promoted to Done"),
        "unexpected subject {}",
        message.subject
    );
    Ok(())
}
