//! Append-only audit log kept in a task's notes.

use super::TaskState;
use crate::identity::domain::Username;
use chrono::{DateTime, TimeZone};
use std::fmt;

/// en-US locale layout, e.g. `10/19/2026, 3:04:05 PM`.
const STAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A single audit entry: `[timestamp] (actor - state): text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    stamp: String,
    actor: Username,
    state: TaskState,
    text: String,
}

impl AuditEntry {
    /// Stamps `text` with the time, the acting user, and the task state.
    #[must_use]
    pub fn new<Tz>(at: &DateTime<Tz>, actor: Username, state: TaskState, text: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            stamp: at.format(STAMP_FORMAT).to_string(),
            actor,
            state,
            text: text.to_owned(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({} - {}): {}",
            self.stamp, self.actor, self.state, self.text
        )
    }
}

/// Newline-delimited audit entries. Entries are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLog(String);

impl AuditLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Restores a log from its stored text.
    #[must_use]
    pub fn from_persisted(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns whether the log has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the stored text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.0.lines().filter(|line| !line.is_empty())
    }

    /// Appends one entry.
    pub fn append(&mut self, entry: &AuditEntry) {
        if !self.0.is_empty() {
            self.0.push('\n');
        }
        self.0.push_str(&entry.to_string());
    }
}
