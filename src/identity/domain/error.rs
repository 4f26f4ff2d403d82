//! Error types for identity value validation.

use thiserror::Error;

/// Errors returned while constructing identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// A required credential field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The plaintext password exceeds the accepted input length.
    #[error("password exceeds {max} UTF-16 code units")]
    PasswordTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
}
