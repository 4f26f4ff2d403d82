//! Diesel row models for the workflow tables.

use super::schema::{application, plan, task, users};
use chrono::NaiveDate;
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Login name.
    pub user_name: String,
    /// bcrypt hash.
    pub password: String,
    /// Mail address.
    pub email: Option<String>,
    /// Active flag.
    pub active: bool,
}

/// Query result row for applications.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = application)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApplicationRow {
    /// Acronym.
    pub app_acronym: String,
    /// Last allocated running number.
    pub app_rnumber: i32,
    /// Create permit.
    pub app_permit_create: String,
    /// `open` permit.
    pub app_permit_open: String,
    /// `todo` permit.
    pub app_permit_todo: String,
    /// `doing` permit.
    pub app_permit_doing: String,
    /// `done` permit.
    pub app_permit_done: String,
}

/// Query result row for plans.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = plan)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PlanRow {
    /// Owning application.
    pub plan_app_acronym: String,
    /// Plan name.
    pub plan_mvp_name: String,
    /// Display colour.
    pub plan_colour: Option<String>,
}

/// Query result row for tasks; also the insert model.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub task_id: String,
    /// Name.
    pub task_name: String,
    /// Description.
    pub task_description: Option<String>,
    /// Audit log, `None` when empty.
    pub task_notes: Option<String>,
    /// Plan name.
    pub task_plan: Option<String>,
    /// Owning application.
    pub task_app_acronym: String,
    /// Lifecycle state.
    pub task_state: String,
    /// Creator.
    pub task_creator: String,
    /// Owner.
    pub task_owner: String,
    /// Creation date.
    pub task_createdate: NaiveDate,
}

/// Row returned by the state query, with the plan colour left-joined in.
#[derive(Debug, Clone, QueryableByName)]
pub struct TaskSummaryRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub task_id: String,
    /// Name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub task_name: String,
    /// Description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub task_description: Option<String>,
    /// Owner.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub task_owner: String,
    /// Colour of the matching plan.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub plan_colour: Option<String>,
}
