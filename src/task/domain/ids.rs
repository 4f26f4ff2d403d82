//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use crate::application::domain::{AppAcronym, RunningNumber};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task identifier of the form `{acronym}_{running_number}`.
///
/// Identifiers are minted once from an application's running number and are
/// never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Composes the identifier for a freshly allocated running number.
    #[must_use]
    pub fn compose(acronym: &AppAcronym, number: RunningNumber) -> Self {
        Self(format!("{acronym}_{number}"))
    }

    /// Wraps an identifier supplied by a caller or read from storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingField`] when empty.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(TaskDomainError::MissingField("task_id"));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checks that `value` is present and at most `max` characters long.
fn bounded(value: String, field: &'static str, max: usize) -> Result<String, TaskDomainError> {
    if value.is_empty() {
        return Err(TaskDomainError::MissingField(field));
    }
    if value.chars().count() > max {
        return Err(TaskDomainError::FieldTooLong { field, max });
    }
    Ok(value)
}

/// Task name of at most [`TaskName::MAX_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Longest accepted name, in characters.
    pub const MAX_LENGTH: usize = 64;

    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingField`] when empty and
    /// [`TaskDomainError::FieldTooLong`] when over the limit.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        bounded(value.into(), "task_name", Self::MAX_LENGTH).map(Self)
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Task description of at most [`TaskDescription::MAX_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Longest accepted description, in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingField`] when empty and
    /// [`TaskDomainError::FieldTooLong`] when over the limit.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        bounded(value.into(), "task_description", Self::MAX_LENGTH).map(Self)
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
