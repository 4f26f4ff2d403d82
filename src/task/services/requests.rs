//! Request payloads accepted by [`super::TaskLifecycleService`].
//!
//! Fields arrive unvalidated; the service checks presence and limits in a
//! fixed order before doing any I/O.

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) username: String,
    pub(super) password: String,
    pub(super) name: String,
    pub(super) app_acronym: String,
    pub(super) description: Option<String>,
    pub(super) note: Option<String>,
    pub(super) plan: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        app_acronym: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            name: name.into(),
            app_acronym: app_acronym.into(),
            description: None,
            note: None,
            plan: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the note recorded as the first audit entry.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets the plan reference.
    #[must_use]
    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }
}

/// Request payload for listing an application's tasks in one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksByStateRequest {
    pub(super) username: String,
    pub(super) password: String,
    pub(super) app_acronym: String,
    pub(super) state: String,
}

impl TasksByStateRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        app_acronym: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            app_acronym: app_acronym.into(),
            state: state.into(),
        }
    }
}

/// Request payload for moving a task to another lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    pub(super) username: String,
    pub(super) password: String,
    pub(super) task_id: String,
    pub(super) target_state: String,
    pub(super) note: Option<String>,
}

impl TransitionTaskRequest {
    /// Creates a request to move `task_id` to `target_state`.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        task_id: impl Into<String>,
        target_state: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            task_id: task_id.into(),
            target_state: target_state.into(),
            note: None,
        }
    }

    /// Creates a request to promote `task_id` to `done`.
    #[must_use]
    pub fn promote_to_done(
        username: impl Into<String>,
        password: impl Into<String>,
        task_id: impl Into<String>,
    ) -> Self {
        Self::new(username, password, task_id, "done")
    }

    /// Sets a note appended to the task's audit log.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
