//! Error types for task domain validation and parsing.

use super::{TaskId, TaskState};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A required field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field exceeds its maximum length in characters.
    #[error("{field} exceeds {max} characters")]
    FieldTooLong {
        /// Request field name.
        field: &'static str,
        /// Maximum accepted length.
        max: usize,
    },

    /// The requested transition is not an edge of the lifecycle.
    #[error("task {task_id} cannot move from {} to {}", from.as_str(), to.as_str())]
    InvalidStateTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current state.
        from: TaskState,
        /// Requested state.
        to: TaskState,
    },
}

/// Error returned while parsing task states from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);
