//! Domain model for users, credentials, and group membership.
//!
//! Identity records are read-only inputs to the workflow: they are created and
//! deactivated elsewhere.

mod error;
mod user;

pub use error::IdentityDomainError;
pub use user::{
    AuthenticatedUser, Credentials, EmailAddress, GroupName, Password, User, Username,
};
