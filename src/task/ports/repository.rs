//! Repository port for task reads outside a transaction.

use crate::application::domain::AppAcronym;
use crate::task::domain::{Task, TaskId, TaskState, TaskSummary};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task lookup contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task of `acronym` currently in `state`, each joined with
    /// its plan's colour. Order is not part of the contract.
    async fn find_by_state(
        &self,
        acronym: &AppAcronym,
        state: TaskState,
    ) -> TaskRepositoryResult<Vec<TaskSummary>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
