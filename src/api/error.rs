//! Response codes and the mapping from service errors to HTTP responses.

use crate::task::services::TaskLifecycleError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use tracing::error;

/// Short machine-readable code carried by every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseCode {
    /// Success.
    S001,
    /// A required field is missing.
    P001,
    /// Bad credentials, or a password over the length cap.
    A001,
    /// The account is inactive.
    A002,
    /// The user is not in the permitted group.
    A003,
    /// Task, application, or plan not found; or an unknown state name.
    T001,
    /// A field exceeds its length limit.
    T002,
    /// The task's current state does not allow the move.
    T003,
    /// Duplicate task identifier, or an update that changed nothing.
    T004,
    /// Unmatched route.
    U001,
    /// Internal error.
    E001,
}

impl ResponseCode {
    /// Returns the code as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S001 => "S001",
            Self::P001 => "P001",
            Self::A001 => "A001",
            Self::A002 => "A002",
            Self::A003 => "A003",
            Self::T001 => "T001",
            Self::T002 => "T002",
            Self::T003 => "T003",
            Self::T004 => "T004",
            Self::U001 => "U001",
            Self::E001 => "E001",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
struct CodeBody {
    code: ResponseCode,
}

/// A failed request: an HTTP status and the code in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    code: ResponseCode,
}

impl ApiError {
    /// The unmatched-route answer.
    pub const UNMATCHED_ROUTE: Self = Self::new(StatusCode::BAD_REQUEST, ResponseCode::U001);

    /// Creates an error response.
    #[must_use]
    pub const fn new(status: StatusCode, code: ResponseCode) -> Self {
        Self { status, code }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        self.status
    }

    /// Returns the response code.
    #[must_use]
    pub const fn code(self) -> ResponseCode {
        self.code
    }
}

impl From<&TaskLifecycleError> for ApiError {
    fn from(err: &TaskLifecycleError) -> Self {
        use ResponseCode as Code;
        use TaskLifecycleError as E;

        let (status, code) = match err {
            E::MissingField(_) => (StatusCode::BAD_REQUEST, Code::P001),
            E::PasswordTooLong { .. } => (StatusCode::BAD_REQUEST, Code::A001),
            E::FieldTooLong { .. } => (StatusCode::BAD_REQUEST, Code::T002),
            E::Unauthenticated => (StatusCode::UNAUTHORIZED, Code::A001),
            E::AccountInactive => (StatusCode::UNAUTHORIZED, Code::A002),
            E::Forbidden(_) => (StatusCode::FORBIDDEN, Code::A003),
            E::ApplicationNotFound(_) | E::PlanNotFound { .. } | E::TaskNotFound(_) => {
                (StatusCode::NOT_FOUND, Code::T001)
            }
            E::InvalidState(_) => (StatusCode::BAD_REQUEST, Code::T001),
            E::InvalidTransition { .. } => (StatusCode::BAD_REQUEST, Code::T003),
            E::DuplicateTask(_) | E::NoOp(_) => (StatusCode::BAD_REQUEST, Code::T004),
            E::RunningNumber(_)
            | E::CredentialCheck(_)
            | E::Identity(_)
            | E::Application(_)
            | E::Tasks(_)
            | E::Store(_) => {
                error!(error = %err, "request failed with internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, Code::E001)
            }
        };
        Self::new(status, code)
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        Self::from(&err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(CodeBody { code: self.code })).into_response()
    }
}
