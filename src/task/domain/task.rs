//! Task aggregate root.

use super::{AuditEntry, AuditLog, TaskDescription, TaskDomainError, TaskId, TaskName, TaskState};
use crate::application::domain::{AppAcronym, PlanColour, PlanName};
use crate::identity::domain::Username;
use chrono::NaiveDate;
use mockable::Clock;

/// Validated content of a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task name.
    pub name: TaskName,
    /// Optional description.
    pub description: Option<TaskDescription>,
    /// Optional free-form note recorded as the first audit entry.
    pub note: Option<String>,
    /// Optional plan reference.
    pub plan: Option<PlanName>,
    /// Owning application.
    pub app_acronym: AppAcronym,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    description: Option<TaskDescription>,
    notes: AuditLog,
    plan: Option<PlanName>,
    app_acronym: AppAcronym,
    state: TaskState,
    creator: Username,
    owner: Username,
    created_on: NaiveDate,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted audit notes.
    pub notes: AuditLog,
    /// Persisted plan reference, if any.
    pub plan: Option<PlanName>,
    /// Persisted owning application.
    pub app_acronym: AppAcronym,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted creator.
    pub creator: Username,
    /// Persisted owner.
    pub owner: Username,
    /// Persisted creation date.
    pub created_on: NaiveDate,
}

impl Task {
    /// Opens a new task under a freshly minted identifier.
    ///
    /// The creator becomes the owner, the creation date is today's UTC date,
    /// and a supplied note becomes the first audit entry.
    #[must_use]
    pub fn open(id: TaskId, draft: TaskDraft, creator: Username, clock: &impl Clock) -> Self {
        let mut notes = AuditLog::empty();
        if let Some(text) = draft.note.as_deref().filter(|text| !text.is_empty()) {
            notes.append(&AuditEntry::new(
                &clock.local(),
                creator.clone(),
                TaskState::Open,
                text,
            ));
        }

        Self {
            id,
            name: draft.name,
            description: draft.description,
            notes,
            plan: draft.plan,
            app_acronym: draft.app_acronym,
            state: TaskState::Open,
            owner: creator.clone(),
            creator,
            created_on: clock.utc().date_naive(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            notes: data.notes,
            plan: data.plan,
            app_acronym: data.app_acronym,
            state: data.state,
            creator: data.creator,
            owner: data.owner,
            created_on: data.created_on,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the audit notes.
    #[must_use]
    pub const fn notes(&self) -> &AuditLog {
        &self.notes
    }

    /// Returns the plan reference, if any.
    #[must_use]
    pub const fn plan(&self) -> Option<&PlanName> {
        self.plan.as_ref()
    }

    /// Returns the owning application.
    #[must_use]
    pub const fn app_acronym(&self) -> &AppAcronym {
        &self.app_acronym
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the user who created the task.
    #[must_use]
    pub const fn creator(&self) -> &Username {
        &self.creator
    }

    /// Returns the current owner.
    #[must_use]
    pub const fn owner(&self) -> &Username {
        &self.owner
    }

    /// Returns the creation date.
    #[must_use]
    pub const fn created_on(&self) -> NaiveDate {
        self.created_on
    }

    /// Moves the task to `target`, handing ownership to `actor`.
    ///
    /// A supplied note is appended to the audit log stamped with the new
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the current
    /// state is not an allowed predecessor of `target`. The task is left
    /// unchanged on error.
    pub fn transition_to(
        &mut self,
        target: TaskState,
        actor: &Username,
        note: Option<&str>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.state.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id.clone(),
                from: self.state,
                to: target,
            });
        }

        self.state = target;
        self.owner = actor.clone();
        if let Some(text) = note.filter(|text| !text.is_empty()) {
            self.notes
                .append(&AuditEntry::new(&clock.local(), actor.clone(), target, text));
        }
        Ok(())
    }
}

/// Read model returned by state queries: a task joined with its plan colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Current owner.
    pub owner: String,
    /// Colour of the referenced plan; `None` without a plan or a matching one.
    pub plan_colour: Option<PlanColour>,
}
