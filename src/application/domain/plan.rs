//! Plan catalog entries that tasks may reference.

use super::{AppAcronym, ApplicationDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plan name, unique within one application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanName(String);

impl PlanName {
    /// Creates a plan name.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationDomainError::MissingField`] when empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ApplicationDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(ApplicationDomainError::MissingField("task_plan"));
        }
        Ok(Self(raw))
    }

    /// Returns the plan name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display colour of a plan, as stored (for example `#ff8800`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanColour(String);

impl PlanColour {
    /// Wraps a stored colour.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the colour as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A plan within an application, keyed by `(application, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    app_acronym: AppAcronym,
    name: PlanName,
    colour: Option<PlanColour>,
}

impl Plan {
    /// Builds a plan from stored fields.
    #[must_use]
    pub const fn new(app_acronym: AppAcronym, name: PlanName, colour: Option<PlanColour>) -> Self {
        Self {
            app_acronym,
            name,
            colour,
        }
    }

    /// Returns the owning application.
    #[must_use]
    pub const fn app_acronym(&self) -> &AppAcronym {
        &self.app_acronym
    }

    /// Returns the plan name.
    #[must_use]
    pub const fn name(&self) -> &PlanName {
        &self.name
    }

    /// Returns the display colour, if set.
    #[must_use]
    pub const fn colour(&self) -> Option<&PlanColour> {
        self.colour.as_ref()
    }
}
