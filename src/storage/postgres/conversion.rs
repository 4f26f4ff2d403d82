//! Row-to-domain conversions for the workflow tables.

use super::models::{ApplicationRow, PlanRow, TaskRow, TaskSummaryRow, UserRow};
use crate::application::domain::{
    AppAcronym, Application, ApplicationDomainError, Plan, PlanColour, PlanName, RunningNumber,
    StatePermits,
};
use crate::identity::domain::{EmailAddress, GroupName, IdentityDomainError, User, Username};
use crate::task::domain::{
    AuditLog, ParseTaskStateError, PersistedTaskData, Task, TaskDescription, TaskDomainError,
    TaskId, TaskName, TaskState, TaskSummary,
};
use std::num::TryFromIntError;
use thiserror::Error;

/// A stored row that does not satisfy the domain's rules.
#[derive(Debug, Error)]
pub enum RowError {
    /// Identity value rejected.
    #[error("invalid identity row: {0}")]
    Identity(#[from] IdentityDomainError),
    /// Application value rejected.
    #[error("invalid application row: {0}")]
    Application(#[from] ApplicationDomainError),
    /// Task value rejected.
    #[error("invalid task row: {0}")]
    Task(#[from] TaskDomainError),
    /// Unknown stored state.
    #[error("invalid task row: {0}")]
    State(#[from] ParseTaskStateError),
    /// Running number outside the column range.
    #[error("running number out of range: {0}")]
    RunningNumber(#[from] TryFromIntError),
}

pub(super) fn row_to_user(row: UserRow) -> Result<User, RowError> {
    Ok(User::new(
        Username::new(row.user_name)?,
        row.password,
        row.active,
        row.email.map(EmailAddress::new),
    ))
}

pub(super) fn row_to_application(row: ApplicationRow) -> Result<Application, RowError> {
    Ok(Application::new(
        AppAcronym::new(row.app_acronym)?,
        GroupName::new(row.app_permit_create),
        StatePermits {
            open: GroupName::new(row.app_permit_open),
            todo: GroupName::new(row.app_permit_todo),
            doing: GroupName::new(row.app_permit_doing),
            done: GroupName::new(row.app_permit_done),
        },
        stored_running_number(row.app_rnumber)?,
    ))
}

pub(super) fn row_to_plan(row: PlanRow) -> Result<Plan, RowError> {
    Ok(Plan::new(
        AppAcronym::new(row.plan_app_acronym)?,
        PlanName::new(row.plan_mvp_name)?,
        row.plan_colour.map(PlanColour::new),
    ))
}

pub(super) fn row_to_task(row: TaskRow) -> Result<Task, RowError> {
    let data = PersistedTaskData {
        id: TaskId::new(row.task_id)?,
        name: TaskName::new(row.task_name)?,
        description: row
            .task_description
            .filter(|text| !text.is_empty())
            .map(TaskDescription::new)
            .transpose()?,
        notes: row
            .task_notes
            .map(AuditLog::from_persisted)
            .unwrap_or_default(),
        plan: row
            .task_plan
            .filter(|name| !name.is_empty())
            .map(PlanName::new)
            .transpose()?,
        app_acronym: AppAcronym::new(row.task_app_acronym)?,
        state: TaskState::try_from(row.task_state.as_str())?,
        creator: Username::new(row.task_creator)?,
        owner: Username::new(row.task_owner)?,
        created_on: row.task_createdate,
    };
    Ok(Task::from_persisted(data))
}

pub(super) fn task_to_row(task: &Task) -> TaskRow {
    TaskRow {
        task_id: task.id().as_str().to_owned(),
        task_name: task.name().as_str().to_owned(),
        task_description: task.description().map(|text| text.as_str().to_owned()),
        task_notes: stored_notes(task),
        task_plan: task.plan().map(|plan| plan.as_str().to_owned()),
        task_app_acronym: task.app_acronym().as_str().to_owned(),
        task_state: task.state().as_str().to_owned(),
        task_creator: task.creator().as_str().to_owned(),
        task_owner: task.owner().as_str().to_owned(),
        task_createdate: task.created_on(),
    }
}

pub(super) fn stored_notes(task: &Task) -> Option<String> {
    let notes = task.notes();
    (!notes.is_empty()).then(|| notes.as_str().to_owned())
}

pub(super) fn row_to_summary(row: TaskSummaryRow) -> Result<TaskSummary, RowError> {
    Ok(TaskSummary {
        id: TaskId::new(row.task_id)?,
        name: row.task_name,
        description: row.task_description,
        owner: row.task_owner,
        plan_colour: row.plan_colour.map(PlanColour::new),
    })
}

pub(super) fn stored_running_number(value: i32) -> Result<RunningNumber, RowError> {
    Ok(RunningNumber::new(u32::try_from(value)?))
}

pub(super) fn column_running_number(number: RunningNumber) -> Result<i32, RowError> {
    Ok(i32::try_from(number.value())?)
}
