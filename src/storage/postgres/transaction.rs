//! `PostgreSQL` unit of work: one read-committed transaction per closure.

use super::{
    conversion::{
        column_running_number, row_to_application, row_to_task, stored_notes,
        stored_running_number, task_to_row,
    },
    models::{ApplicationRow, TaskRow},
    repository::PostgresWorkflowStore,
    schema::{application, task},
};
use crate::application::domain::{AppAcronym, Application, RunningNumber};
use crate::task::{
    domain::{Task, TaskId, TaskState},
    ports::{WorkflowStore, WorkflowStoreError, WorkflowStoreResult, WorkflowTransaction},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::warn;

/// Separates the closure's own failure from a failure of the transaction
/// machinery, so diesel can roll back on either.
enum TxFailure<E> {
    Body(E),
    Store(DieselError),
}

impl<E> From<DieselError> for TxFailure<E> {
    fn from(err: DieselError) -> Self {
        Self::Store(err)
    }
}

struct PgTransaction<'c> {
    connection: &'c mut PgConnection,
}

impl WorkflowTransaction for PgTransaction<'_> {
    fn lock_running_number(
        &mut self,
        acronym: &AppAcronym,
    ) -> WorkflowStoreResult<Option<RunningNumber>> {
        let stored = application::table
            .find(acronym.as_str())
            .select(application::app_rnumber)
            .for_update()
            .first::<i32>(self.connection)
            .optional()
            .map_err(WorkflowStoreError::persistence)?;
        stored
            .map(stored_running_number)
            .transpose()
            .map_err(WorkflowStoreError::persistence)
    }

    fn save_running_number(
        &mut self,
        acronym: &AppAcronym,
        number: RunningNumber,
    ) -> WorkflowStoreResult<()> {
        let value = column_running_number(number).map_err(WorkflowStoreError::persistence)?;
        diesel::update(application::table.find(acronym.as_str()))
            .set(application::app_rnumber.eq(value))
            .execute(self.connection)
            .map_err(WorkflowStoreError::persistence)?;
        Ok(())
    }

    fn application(&mut self, acronym: &AppAcronym) -> WorkflowStoreResult<Option<Application>> {
        let row = application::table
            .find(acronym.as_str())
            .select(ApplicationRow::as_select())
            .first::<ApplicationRow>(self.connection)
            .optional()
            .map_err(WorkflowStoreError::persistence)?;
        row.map(row_to_application)
            .transpose()
            .map_err(WorkflowStoreError::persistence)
    }

    fn insert_task(&mut self, new_task: &Task) -> WorkflowStoreResult<()> {
        diesel::insert_into(task::table)
            .values(task_to_row(new_task))
            .execute(self.connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    WorkflowStoreError::DuplicateTask(new_task.id().clone())
                }
                _ => WorkflowStoreError::persistence(err),
            })?;
        Ok(())
    }

    fn lock_task(&mut self, id: &TaskId) -> WorkflowStoreResult<Option<Task>> {
        let row = task::table
            .find(id.as_str())
            .select(TaskRow::as_select())
            .for_update()
            .first::<TaskRow>(self.connection)
            .optional()
            .map_err(WorkflowStoreError::persistence)?;
        row.map(row_to_task)
            .transpose()
            .map_err(WorkflowStoreError::persistence)
    }

    fn update_task(&mut self, updated: &Task, expected: TaskState) -> WorkflowStoreResult<u64> {
        let changed = diesel::update(
            task::table
                .filter(task::task_id.eq(updated.id().as_str()))
                .filter(task::task_state.eq(expected.as_str())),
        )
        .set((
            task::task_state.eq(updated.state().as_str()),
            task::task_owner.eq(updated.owner().as_str()),
            task::task_notes.eq(stored_notes(updated)),
        ))
        .execute(self.connection)
        .map_err(WorkflowStoreError::persistence)?;
        u64::try_from(changed).map_err(WorkflowStoreError::persistence)
    }
}

#[async_trait]
impl WorkflowStore for PostgresWorkflowStore {
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn WorkflowTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<WorkflowStoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| E::from(WorkflowStoreError::persistence(err)))?;
            connection
                .build_transaction()
                .read_committed()
                .run(|tx_connection| {
                    let mut tx = PgTransaction {
                        connection: tx_connection,
                    };
                    work(&mut tx).map_err(TxFailure::Body)
                })
                .map_err(|failure| match failure {
                    TxFailure::Body(err) => err,
                    TxFailure::Store(err) => {
                        warn!(error = %err, "workflow transaction failed");
                        E::from(WorkflowStoreError::persistence(err))
                    }
                })
        })
        .await
        .map_err(|err| E::from(WorkflowStoreError::persistence(err)))?
    }
}
