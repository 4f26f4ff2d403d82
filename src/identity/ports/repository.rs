//! Repository port for user and group lookups.

use crate::identity::domain::{EmailAddress, GroupName, User, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity repository operations.
pub type IdentityRepositoryResult<T> = Result<T, IdentityRepositoryError>;

/// Read-only identity store contract.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Finds a user by username.
    ///
    /// Returns `None` when no such user exists.
    async fn find_user(&self, username: &Username) -> IdentityRepositoryResult<Option<User>>;

    /// Returns the names of every group the user belongs to.
    async fn group_names(&self, username: &Username) -> IdentityRepositoryResult<Vec<GroupName>>;

    /// Returns the mail address of every member of `group` that has one.
    async fn member_emails(&self, group: &GroupName)
    -> IdentityRepositoryResult<Vec<EmailAddress>>;
}

/// Errors returned by identity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
