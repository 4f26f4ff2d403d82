//! Route handlers: parse the body, call the service, shape the reply.

use super::{
    error::{ApiError, ResponseCode},
    payload::{
        CodeOnlyBody, CreateTaskPayload, CreatedBody, PromotePayload, TaskListBody,
        TasksByStatePayload, TransitionPayload, parse_or_empty,
    },
};
use crate::notification::Notifier;
use crate::task::services::{TaskLifecycleService, TransitionTaskRequest, WorkflowBackend};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use mockable::Clock;

pub(super) async fn create_task<S, N, C>(
    State(service): State<TaskLifecycleService<S, N, C>>,
    body: Bytes,
) -> Result<Json<CreatedBody>, ApiError>
where
    S: WorkflowBackend,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload = parse_or_empty::<CreateTaskPayload>(&body);
    let task = service.create_task(payload.into()).await?;
    Ok(Json(CreatedBody {
        task_id: task.id().as_str().to_owned(),
        code: ResponseCode::S001,
    }))
}

pub(super) async fn tasks_by_state<S, N, C>(
    State(service): State<TaskLifecycleService<S, N, C>>,
    body: Bytes,
) -> Result<Json<TaskListBody>, ApiError>
where
    S: WorkflowBackend,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload = parse_or_empty::<TasksByStatePayload>(&body);
    let tasks = service.tasks_by_state(payload.into()).await?;
    Ok(Json(TaskListBody {
        data: tasks.into_iter().map(Into::into).collect(),
        code: ResponseCode::S001,
    }))
}

pub(super) async fn promote_to_done<S, N, C>(
    State(service): State<TaskLifecycleService<S, N, C>>,
    body: Bytes,
) -> Result<Json<CodeOnlyBody>, ApiError>
where
    S: WorkflowBackend,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload = parse_or_empty::<PromotePayload>(&body);
    transition(&service, payload.into()).await
}

pub(super) async fn transition_task<S, N, C>(
    State(service): State<TaskLifecycleService<S, N, C>>,
    body: Bytes,
) -> Result<Json<CodeOnlyBody>, ApiError>
where
    S: WorkflowBackend,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    let payload = parse_or_empty::<TransitionPayload>(&body);
    transition(&service, payload.into()).await
}

/// Runs a transition; notification delivery is left to finish on its own.
async fn transition<S, N, C>(
    service: &TaskLifecycleService<S, N, C>,
    request: TransitionTaskRequest,
) -> Result<Json<CodeOnlyBody>, ApiError>
where
    S: WorkflowBackend,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    service.transition_task(request).await?;
    Ok(Json(CodeOnlyBody {
        code: ResponseCode::S001,
    }))
}

pub(super) async fn unmatched() -> ApiError {
    ApiError::UNMATCHED_ROUTE
}
