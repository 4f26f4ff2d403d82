//! Error types for application registry values.

use thiserror::Error;

/// Errors returned while constructing application registry values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationDomainError {
    /// A required field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Incrementing the running number would overflow its storage type.
    #[error("running number {0} cannot be incremented")]
    RunningNumberExhausted(u32),
}
