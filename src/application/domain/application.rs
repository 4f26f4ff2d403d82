//! Application aggregate: per-state permitted groups and the running number.

use super::ApplicationDomainError;
use crate::identity::domain::GroupName;
use crate::task::domain::TaskState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application acronym; the application's primary key and task-id prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppAcronym(String);

impl AppAcronym {
    /// Creates an acronym.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationDomainError::MissingField`] when empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ApplicationDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(ApplicationDomainError::MissingField("task_appAcronym"));
        }
        Ok(Self(raw))
    }

    /// Returns the acronym as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AppAcronym {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AppAcronym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic per-application counter that mints task identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunningNumber(u32);

impl RunningNumber {
    /// Wraps a stored counter value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the counter value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the next number, exactly one higher.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationDomainError::RunningNumberExhausted`] at the
    /// counter's upper bound.
    pub const fn next(self) -> Result<Self, ApplicationDomainError> {
        match self.0.checked_add(1) {
            Some(value) => Ok(Self(value)),
            None => Err(ApplicationDomainError::RunningNumberExhausted(self.0)),
        }
    }
}

impl fmt::Display for RunningNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The group permitted to act on a task while it sits in each state.
///
/// `close` is terminal and has no permitted group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePermits {
    /// Group acting on `open` tasks.
    pub open: GroupName,
    /// Group acting on `todo` tasks.
    pub todo: GroupName,
    /// Group acting on `doing` tasks.
    pub doing: GroupName,
    /// Group acting on `done` tasks.
    pub done: GroupName,
}

impl StatePermits {
    /// Returns the permitted group for tasks in `state`.
    #[must_use]
    pub const fn for_state(&self, state: TaskState) -> Option<&GroupName> {
        match state {
            TaskState::Open => Some(&self.open),
            TaskState::Todo => Some(&self.todo),
            TaskState::Doing => Some(&self.doing),
            TaskState::Done => Some(&self.done),
            TaskState::Close => None,
        }
    }
}

/// Application aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    acronym: AppAcronym,
    permit_create: GroupName,
    permits: StatePermits,
    running_number: RunningNumber,
}

impl Application {
    /// Builds an application from stored fields.
    #[must_use]
    pub const fn new(
        acronym: AppAcronym,
        permit_create: GroupName,
        permits: StatePermits,
        running_number: RunningNumber,
    ) -> Self {
        Self {
            acronym,
            permit_create,
            permits,
            running_number,
        }
    }

    /// Returns the acronym.
    #[must_use]
    pub const fn acronym(&self) -> &AppAcronym {
        &self.acronym
    }

    /// Returns the group permitted to create tasks.
    #[must_use]
    pub const fn permit_create(&self) -> &GroupName {
        &self.permit_create
    }

    /// Returns the per-state permitted groups.
    #[must_use]
    pub const fn permits(&self) -> &StatePermits {
        &self.permits
    }

    /// Returns the permitted group for tasks in `state`.
    #[must_use]
    pub const fn permitted_group(&self, state: TaskState) -> Option<&GroupName> {
        self.permits.for_state(state)
    }

    /// Returns the last allocated running number.
    #[must_use]
    pub const fn running_number(&self) -> RunningNumber {
        self.running_number
    }

    /// Records `number` as the last allocated running number.
    pub const fn set_running_number(&mut self, number: RunningNumber) {
        self.running_number = number;
    }
}
