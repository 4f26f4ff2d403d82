//! Diesel schema for the workflow tables.

diesel::table! {
    /// User records with bcrypt credential hashes.
    users (user_name) {
        /// Login name.
        #[max_length = 50]
        user_name -> Varchar,
        /// bcrypt hash of the password.
        #[max_length = 255]
        password -> Varchar,
        /// Mail address for notifications.
        #[max_length = 255]
        email -> Nullable<Varchar>,
        /// Whether the account may act.
        active -> Bool,
    }
}

diesel::table! {
    /// Permission groups.
    group_list (group_id) {
        /// Surrogate key.
        group_id -> Int4,
        /// Unique group name.
        #[max_length = 50]
        group_name -> Varchar,
    }
}

diesel::table! {
    /// User-to-group membership.
    user_group (user_name, group_id) {
        /// Member.
        #[max_length = 50]
        user_name -> Varchar,
        /// Group joined.
        group_id -> Int4,
    }
}

diesel::table! {
    /// Applications with per-state permitted groups and the running number.
    application (app_acronym) {
        /// Acronym and task-id prefix.
        #[max_length = 50]
        app_acronym -> Varchar,
        /// Last allocated running number.
        app_rnumber -> Int4,
        /// Group permitted to create tasks.
        #[max_length = 50]
        app_permit_create -> Varchar,
        /// Group acting on `open` tasks.
        #[max_length = 50]
        app_permit_open -> Varchar,
        /// Group acting on `todo` tasks.
        #[max_length = 50]
        app_permit_todo -> Varchar,
        /// Group acting on `doing` tasks.
        #[max_length = 50]
        app_permit_doing -> Varchar,
        /// Group acting on `done` tasks.
        #[max_length = 50]
        app_permit_done -> Varchar,
    }
}

diesel::table! {
    /// Plans referenced by tasks.
    plan (plan_app_acronym, plan_mvp_name) {
        /// Owning application.
        #[max_length = 50]
        plan_app_acronym -> Varchar,
        /// Plan name.
        #[max_length = 255]
        plan_mvp_name -> Varchar,
        /// Display colour.
        #[max_length = 7]
        plan_colour -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Task records.
    task (task_id) {
        /// `{acronym}_{running_number}`.
        #[max_length = 100]
        task_id -> Varchar,
        /// Task name.
        #[max_length = 64]
        task_name -> Varchar,
        /// Optional description.
        #[max_length = 255]
        task_description -> Nullable<Varchar>,
        /// Newline-delimited audit log.
        task_notes -> Nullable<Text>,
        /// Optional plan name.
        #[max_length = 255]
        task_plan -> Nullable<Varchar>,
        /// Owning application.
        #[max_length = 50]
        task_app_acronym -> Varchar,
        /// Lifecycle state.
        #[max_length = 10]
        task_state -> Varchar,
        /// Creating user.
        #[max_length = 50]
        task_creator -> Varchar,
        /// Current owner.
        #[max_length = 50]
        task_owner -> Varchar,
        /// Creation date.
        task_createdate -> Date,
    }
}

diesel::joinable!(user_group -> users (user_name));
diesel::joinable!(user_group -> group_list (group_id));
diesel::joinable!(plan -> application (plan_app_acronym));
diesel::joinable!(task -> application (task_app_acronym));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    group_list,
    user_group,
    application,
    plan,
    task,
);
