//! Given steps for task workflow BDD scenarios.

use super::world::TaskWorkflowWorld;
use rstest_bdd_macros::given;
use taskflow::application::domain::AppAcronym;
use taskflow::identity::domain::Username;
use taskflow::task::domain::{AuditLog, PersistedTaskData, Task, TaskId, TaskName, TaskState};

#[given(r#"the application "{acronym}" with running number {number:u32}"#)]
fn application_with_running_number(
    world: &mut TaskWorkflowWorld,
    acronym: String,
    number: u32,
) -> Result<(), eyre::Report> {
    let current = world
        .workflow
        .store
        .running_number(&AppAcronym::new(acronym.as_str())?)
        .ok_or_else(|| eyre::eyre!("application {acronym} is not seeded"))?;
    eyre::ensure!(
        current.value() == number,
        "seeded running number is {current}, scenario expects {number}"
    );
    Ok(())
}

#[given(r#"the task "{id}" is in state "{state}" and owned by "{owner}""#)]
fn task_in_state(
    world: &mut TaskWorkflowWorld,
    id: String,
    state: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let task_state = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid state in scenario: {err}"))?;
    let owner_name = Username::new(owner)?;
    world.workflow.store.put_task(Task::from_persisted(PersistedTaskData {
        name: TaskName::new(format!("Task {id}"))?,
        id: TaskId::new(id)?,
        description: None,
        notes: AuditLog::empty(),
        plan: None,
        app_acronym: AppAcronym::new("DEMO")?,
        state: task_state,
        creator: owner_name.clone(),
        owner: owner_name,
        created_on: chrono::Utc::now().date_naive(),
    }));
    Ok(())
}
