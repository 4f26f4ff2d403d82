//! Service-level errors for task lifecycle operations.

use crate::application::{
    domain::{AppAcronym, ApplicationDomainError, PlanName},
    ports::ApplicationRepositoryError,
};
use crate::identity::{
    domain::{IdentityDomainError, Username},
    ports::IdentityRepositoryError,
    services::AuthenticationError,
};
use crate::task::{
    domain::{ParseTaskStateError, TaskDomainError, TaskId, TaskState},
    ports::{TaskRepositoryError, WorkflowStoreError},
};
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
///
/// Validation and authorization variants are raised before any transaction
/// opens; the remaining variants roll the transaction back.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// A required request field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The supplied password exceeds the accepted length.
    #[error("password exceeds {max} UTF-16 code units")]
    PasswordTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// A request field exceeds its maximum length.
    #[error("{field} exceeds {max} characters")]
    FieldTooLong {
        /// Request field name.
        field: &'static str,
        /// Maximum accepted length.
        max: usize,
    },

    /// Unknown user or wrong password.
    #[error("invalid username or password")]
    Unauthenticated,

    /// The user's account is inactive.
    #[error("account is inactive")]
    AccountInactive,

    /// The user is not in the group permitted for the operation.
    #[error("user {0} is not permitted to perform this operation")]
    Forbidden(Username),

    /// The application does not exist.
    #[error("application not found: {0}")]
    ApplicationNotFound(AppAcronym),

    /// The plan does not exist in the application.
    #[error("plan {plan} not found in application {app}")]
    PlanNotFound {
        /// Application searched.
        app: AppAcronym,
        /// Plan requested.
        plan: PlanName,
    },

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A state name is not one of the lifecycle states.
    #[error(transparent)]
    InvalidState(#[from] ParseTaskStateError),

    /// The task's current state does not permit the requested move.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current state.
        from: TaskState,
        /// Requested state.
        to: TaskState,
    },

    /// The minted identifier collided with an existing task.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The guarded update changed no rows.
    #[error("task {0} was not updated")]
    NoOp(TaskId),

    /// The running number cannot advance.
    #[error(transparent)]
    RunningNumber(ApplicationDomainError),

    /// The stored credential could not be compared.
    #[error("credential check failed: {0}")]
    CredentialCheck(String),

    /// Identity lookup failed.
    #[error(transparent)]
    Identity(#[from] IdentityRepositoryError),

    /// Application lookup failed.
    #[error(transparent)]
    Application(#[from] ApplicationRepositoryError),

    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// The transaction failed in the store.
    #[error(transparent)]
    Store(WorkflowStoreError),
}

impl From<IdentityDomainError> for TaskLifecycleError {
    fn from(err: IdentityDomainError) -> Self {
        match err {
            IdentityDomainError::MissingField(field) => Self::MissingField(field),
            IdentityDomainError::PasswordTooLong { max } => Self::PasswordTooLong { max },
        }
    }
}

impl From<ApplicationDomainError> for TaskLifecycleError {
    fn from(err: ApplicationDomainError) -> Self {
        match err {
            ApplicationDomainError::MissingField(field) => Self::MissingField(field),
            ApplicationDomainError::RunningNumberExhausted(_) => Self::RunningNumber(err),
        }
    }
}

impl From<TaskDomainError> for TaskLifecycleError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::MissingField(field) => Self::MissingField(field),
            TaskDomainError::FieldTooLong { field, max } => Self::FieldTooLong { field, max },
            TaskDomainError::InvalidStateTransition { task_id, from, to } => {
                Self::InvalidTransition { task_id, from, to }
            }
        }
    }
}

impl From<AuthenticationError> for TaskLifecycleError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::Unauthenticated => Self::Unauthenticated,
            AuthenticationError::AccountInactive => Self::AccountInactive,
            AuthenticationError::CredentialCheck(reason) => Self::CredentialCheck(reason),
            AuthenticationError::Repository(source) => Self::Identity(source),
        }
    }
}

impl From<WorkflowStoreError> for TaskLifecycleError {
    fn from(err: WorkflowStoreError) -> Self {
        match err {
            WorkflowStoreError::DuplicateTask(task_id) => Self::DuplicateTask(task_id),
            WorkflowStoreError::Persistence(_) => Self::Store(err),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;
