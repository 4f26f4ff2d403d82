//! Transactional port for the workflow's read-modify-write sequences.
//!
//! Creating a task (running-number bump plus insert) and transitioning one
//! (re-read plus guarded update) each run as a single unit of work. The unit
//! is a synchronous closure over a [`WorkflowTransaction`]; the store commits
//! when the closure returns `Ok` and rolls back when it returns `Err`, so no
//! partial write is ever observable.

use crate::application::domain::{AppAcronym, Application, RunningNumber};
use crate::task::domain::{Task, TaskId, TaskState};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workflow store operations.
pub type WorkflowStoreResult<T> = Result<T, WorkflowStoreError>;

/// Operations available inside one workflow transaction.
///
/// Rows read through the `lock_*` methods stay locked until the transaction
/// ends.
pub trait WorkflowTransaction {
    /// Reads and locks the application's running number.
    ///
    /// Returns `None` when the application does not exist.
    fn lock_running_number(
        &mut self,
        acronym: &AppAcronym,
    ) -> WorkflowStoreResult<Option<RunningNumber>>;

    /// Persists a new running number for the application.
    fn save_running_number(
        &mut self,
        acronym: &AppAcronym,
        number: RunningNumber,
    ) -> WorkflowStoreResult<()>;

    /// Reads an application without locking it.
    fn application(&mut self, acronym: &AppAcronym) -> WorkflowStoreResult<Option<Application>>;

    /// Inserts a new task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowStoreError::DuplicateTask`] when the identifier is
    /// already taken.
    fn insert_task(&mut self, task: &Task) -> WorkflowStoreResult<()>;

    /// Reads and locks a task.
    ///
    /// Returns `None` when the task does not exist.
    fn lock_task(&mut self, id: &TaskId) -> WorkflowStoreResult<Option<Task>>;

    /// Writes the task's state, owner, and notes, provided it is still in
    /// `expected` state. Returns the number of rows changed.
    fn update_task(&mut self, task: &Task, expected: TaskState) -> WorkflowStoreResult<u64>;
}

/// Store able to run a closure as one atomic transaction.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Runs `work` inside a transaction with at least read-committed
    /// isolation, committing on `Ok` and rolling back on `Err`.
    ///
    /// Aborted transactions are not retried.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a [`WorkflowStoreError`] converted into
    /// `E` when the transaction itself cannot be started or committed.
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn WorkflowTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<WorkflowStoreError> + Send + 'static;
}

/// Errors returned by workflow store implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkflowStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkflowStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
