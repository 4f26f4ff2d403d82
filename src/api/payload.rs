//! JSON request and response bodies.
//!
//! Every request field is optional at this layer: a missing or empty field
//! is reported by the service as `P001`, and a body that does not parse as
//! an object of strings is read as one with no fields at all.

use super::error::ResponseCode;
use crate::task::domain::TaskSummary;
use crate::task::services::{CreateTaskRequest, TasksByStateRequest, TransitionTaskRequest};
use serde::{Deserialize, Serialize};

/// Reads `body` as `T`, falling back to an empty payload.
pub(super) fn parse_or_empty<T>(body: &[u8]) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    serde_json::from_slice(body).unwrap_or_default()
}

fn field(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Body of `POST /api/task/createTask`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskPayload {
    username: Option<String>,
    password: Option<String>,
    task_name: Option<String>,
    task_description: Option<String>,
    task_notes: Option<String>,
    task_plan: Option<String>,
    #[serde(rename = "task_appAcronym")]
    task_app_acronym: Option<String>,
}

impl From<CreateTaskPayload> for CreateTaskRequest {
    fn from(payload: CreateTaskPayload) -> Self {
        let mut request = Self::new(
            field(payload.username),
            field(payload.password),
            field(payload.task_name),
            field(payload.task_app_acronym),
        );
        if let Some(description) = payload.task_description {
            request = request.with_description(description);
        }
        if let Some(note) = payload.task_notes {
            request = request.with_note(note);
        }
        if let Some(plan) = payload.task_plan {
            request = request.with_plan(plan);
        }
        request
    }
}

/// Body of `POST /api/task/getTaskByState`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TasksByStatePayload {
    username: Option<String>,
    password: Option<String>,
    #[serde(rename = "task_appAcronym")]
    task_app_acronym: Option<String>,
    task_state: Option<String>,
}

impl From<TasksByStatePayload> for TasksByStateRequest {
    fn from(payload: TasksByStatePayload) -> Self {
        Self::new(
            field(payload.username),
            field(payload.password),
            field(payload.task_app_acronym),
            field(payload.task_state),
        )
    }
}

/// Body of `PATCH /api/task/promoteTask2Done`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PromotePayload {
    username: Option<String>,
    password: Option<String>,
    task_id: Option<String>,
}

impl From<PromotePayload> for TransitionTaskRequest {
    fn from(payload: PromotePayload) -> Self {
        Self::promote_to_done(
            field(payload.username),
            field(payload.password),
            field(payload.task_id),
        )
    }
}

/// Body of `PATCH /api/task/transitionTask`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransitionPayload {
    username: Option<String>,
    password: Option<String>,
    task_id: Option<String>,
    task_state: Option<String>,
    task_notes: Option<String>,
}

impl From<TransitionPayload> for TransitionTaskRequest {
    fn from(payload: TransitionPayload) -> Self {
        let request = Self::new(
            field(payload.username),
            field(payload.password),
            field(payload.task_id),
            field(payload.task_state),
        );
        match payload.task_notes {
            Some(note) => request.with_note(note),
            None => request,
        }
    }
}

/// Success body of `createTask`.
#[derive(Debug, Serialize)]
pub struct CreatedBody {
    /// The minted task identifier.
    pub task_id: String,
    /// Always `S001`.
    pub code: ResponseCode,
}

/// One row of `getTaskByState`.
#[derive(Debug, Serialize)]
pub struct TaskRowBody {
    /// Task identifier.
    pub task_id: String,
    /// Task name.
    pub task_name: String,
    /// Description, or `null`.
    pub task_description: Option<String>,
    /// Current owner.
    pub task_owner: String,
    /// Plan colour, or `null`.
    pub plan_colour: Option<String>,
}

impl From<TaskSummary> for TaskRowBody {
    fn from(summary: TaskSummary) -> Self {
        Self {
            task_id: summary.id.as_str().to_owned(),
            task_name: summary.name,
            task_description: summary.description,
            task_owner: summary.owner,
            plan_colour: summary.plan_colour.map(|colour| colour.as_str().to_owned()),
        }
    }
}

/// Success body of `getTaskByState`.
#[derive(Debug, Serialize)]
pub struct TaskListBody {
    /// Matching tasks.
    pub data: Vec<TaskRowBody>,
    /// Always `S001`.
    pub code: ResponseCode,
}

/// Success body carrying only the code.
#[derive(Debug, Serialize)]
pub struct CodeOnlyBody {
    /// Always `S001`.
    pub code: ResponseCode,
}
