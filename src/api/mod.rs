//! HTTP surface: three task routes plus the transition route, JSON in and
//! out, every reply carrying a response code.

mod error;
mod handlers;
mod payload;

pub use error::{ApiError, ResponseCode};
pub use payload::{
    CodeOnlyBody, CreateTaskPayload, CreatedBody, PromotePayload, TaskListBody, TaskRowBody,
    TasksByStatePayload, TransitionPayload,
};

use crate::notification::Notifier;
use crate::task::services::{TaskLifecycleService, WorkflowBackend};
use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{patch, post};
use mockable::Clock;
use tower_http::trace::TraceLayer;

/// Path of the create operation.
pub const CREATE_TASK_PATH: &str = "/api/task/createTask";
/// Path of the query-by-state operation.
pub const TASKS_BY_STATE_PATH: &str = "/api/task/getTaskByState";
/// Path of the promote-to-done operation.
pub const PROMOTE_TO_DONE_PATH: &str = "/api/task/promoteTask2Done";
/// Path of the general transition operation.
pub const TRANSITION_TASK_PATH: &str = "/api/task/transitionTask";

/// Builds the router over a lifecycle service.
///
/// Unknown paths, known paths with the wrong method, and any request
/// carrying a query string answer `400 {"code":"U001"}`.
pub fn router<S, N, C>(service: TaskLifecycleService<S, N, C>) -> Router
where
    S: WorkflowBackend,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            CREATE_TASK_PATH,
            post(handlers::create_task::<S, N, C>).fallback(handlers::unmatched),
        )
        .route(
            TASKS_BY_STATE_PATH,
            post(handlers::tasks_by_state::<S, N, C>).fallback(handlers::unmatched),
        )
        .route(
            PROMOTE_TO_DONE_PATH,
            patch(handlers::promote_to_done::<S, N, C>).fallback(handlers::unmatched),
        )
        .route(
            TRANSITION_TASK_PATH,
            patch(handlers::transition_task::<S, N, C>).fallback(handlers::unmatched),
        )
        .fallback(handlers::unmatched)
        .layer(middleware::from_fn(reject_query_string))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn reject_query_string(request: Request, next: Next) -> Response {
    if request.uri().query().is_some() {
        return ApiError::UNMATCHED_ROUTE.into_response();
    }
    next.run(request).await
}
