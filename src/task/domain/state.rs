//! Task lifecycle states and the edges between them.

use super::ParseTaskStateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Task has been created and awaits release.
    Open,
    /// Task has been released for work.
    Todo,
    /// Task is being worked on.
    Doing,
    /// Task work is complete and awaits closing.
    Done,
    /// Task is closed; no further transitions.
    Close,
}

impl TaskState {
    /// Every state, in lifecycle order.
    pub const ALL: [Self; 5] = [Self::Open, Self::Todo, Self::Doing, Self::Done, Self::Close];

    /// Returns the canonical storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
            Self::Close => "close",
        }
    }

    /// Returns the states a task must be in to move to `self`.
    #[must_use]
    pub const fn allowed_predecessors(self) -> &'static [Self] {
        match self {
            Self::Open => &[],
            Self::Todo => &[Self::Open],
            Self::Doing => &[Self::Todo],
            Self::Done => &[Self::Doing],
            Self::Close => &[Self::Open, Self::Todo, Self::Doing, Self::Done],
        }
    }

    /// Returns whether `self -> target` is a lifecycle edge.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        target.allowed_predecessors().contains(&self)
    }

    /// Returns whether the state has no outbound transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Close)
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "open" => Ok(Self::Open),
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            "close" => Ok(Self::Close),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
