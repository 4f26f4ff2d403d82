//! `PostgreSQL` implementation of the workflow read ports.

use super::{
    conversion::{row_to_application, row_to_plan, row_to_summary, row_to_task, row_to_user},
    models::{ApplicationRow, PlanRow, TaskRow, TaskSummaryRow, UserRow},
    schema::{application, group_list, plan, task, user_group, users},
};
use crate::application::{
    domain::{AppAcronym, Application, Plan, PlanName},
    ports::{ApplicationRepository, ApplicationRepositoryError, ApplicationRepositoryResult},
};
use crate::identity::{
    domain::{EmailAddress, GroupName, User, Username},
    ports::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult},
};
use crate::task::{
    domain::{Task, TaskId, TaskState, TaskSummary},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by the workflow store.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed workflow store serving every port over one pool.
#[derive(Debug, Clone)]
pub struct PostgresWorkflowStore {
    pub(super) pool: PgPool,
}

impl PostgresWorkflowStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs `f` with a pooled connection on the blocking thread pool.
    ///
    /// `to_error` maps pool checkout, join, and query failures into the
    /// caller's port error.
    async fn run_blocking<F, T, E>(
        &self,
        to_error: fn(Box<dyn std::error::Error + Send + Sync>) -> E,
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, Box<dyn std::error::Error + Send + Sync>>
            + Send
            + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(|err| to_error(Box::new(err)))?;
            f(&mut connection).map_err(to_error)
        })
        .await
        .map_err(|err| to_error(Box::new(err)))?
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn identity_error(err: BoxError) -> IdentityRepositoryError {
    IdentityRepositoryError::Persistence(err.into())
}

fn application_error(err: BoxError) -> ApplicationRepositoryError {
    ApplicationRepositoryError::Persistence(err.into())
}

fn task_error(err: BoxError) -> TaskRepositoryError {
    TaskRepositoryError::Persistence(err.into())
}

#[async_trait]
impl IdentityRepository for PostgresWorkflowStore {
    async fn find_user(&self, username: &Username) -> IdentityRepositoryResult<Option<User>> {
        let name = username.as_str().to_owned();
        self.run_blocking(identity_error, move |connection| {
            let row = users::table
                .find(name)
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            Ok(row.map(row_to_user).transpose()?)
        })
        .await
    }

    async fn group_names(&self, username: &Username) -> IdentityRepositoryResult<Vec<GroupName>> {
        let name = username.as_str().to_owned();
        self.run_blocking(identity_error, move |connection| {
            let names = user_group::table
                .inner_join(group_list::table)
                .filter(user_group::user_name.eq(name))
                .select(group_list::group_name)
                .load::<String>(connection)?;
            Ok(names.into_iter().map(GroupName::new).collect())
        })
        .await
    }

    async fn member_emails(
        &self,
        group: &GroupName,
    ) -> IdentityRepositoryResult<Vec<EmailAddress>> {
        let group_name = group.as_str().to_owned();
        self.run_blocking(identity_error, move |connection| {
            let emails = users::table
                .inner_join(user_group::table.inner_join(group_list::table))
                .filter(group_list::group_name.eq(group_name))
                .filter(users::email.is_not_null())
                .select(users::email)
                .order(users::user_name)
                .load::<Option<String>>(connection)?;
            Ok(emails
                .into_iter()
                .flatten()
                .filter(|email| !email.is_empty())
                .map(EmailAddress::new)
                .collect())
        })
        .await
    }
}

#[async_trait]
impl ApplicationRepository for PostgresWorkflowStore {
    async fn find_application(
        &self,
        acronym: &AppAcronym,
    ) -> ApplicationRepositoryResult<Option<Application>> {
        let key = acronym.as_str().to_owned();
        self.run_blocking(application_error, move |connection| {
            let row = application::table
                .find(key)
                .select(ApplicationRow::as_select())
                .first::<ApplicationRow>(connection)
                .optional()?;
            Ok(row.map(row_to_application).transpose()?)
        })
        .await
    }

    async fn find_plan(
        &self,
        acronym: &AppAcronym,
        name: &PlanName,
    ) -> ApplicationRepositoryResult<Option<Plan>> {
        let key = (acronym.as_str().to_owned(), name.as_str().to_owned());
        self.run_blocking(application_error, move |connection| {
            let row = plan::table
                .find(key)
                .select(PlanRow::as_select())
                .first::<PlanRow>(connection)
                .optional()?;
            Ok(row.map(row_to_plan).transpose()?)
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresWorkflowStore {
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        let key = id.as_str().to_owned();
        self.run_blocking(task_error, move |connection| {
            let row = task::table
                .find(key)
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            Ok(row.map(row_to_task).transpose()?)
        })
        .await
    }

    async fn find_by_state(
        &self,
        acronym: &AppAcronym,
        state: TaskState,
    ) -> TaskRepositoryResult<Vec<TaskSummary>> {
        let key = acronym.as_str().to_owned();
        self.run_blocking(task_error, move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT task.task_id, task.task_name, task.task_description, ",
                "task.task_owner, plan.plan_colour ",
                "FROM task LEFT JOIN plan ",
                "ON task.task_plan = plan.plan_mvp_name ",
                "AND task.task_app_acronym = plan.plan_app_acronym ",
                "WHERE task.task_app_acronym = $1 AND task.task_state = $2",
            ))
            .bind::<diesel::sql_types::Varchar, _>(key)
            .bind::<diesel::sql_types::Varchar, _>(state.as_str())
            .load::<TaskSummaryRow>(connection)?;
            rows.into_iter()
                .map(|row| row_to_summary(row).map_err(Into::into))
                .collect()
        })
        .await
    }
}
