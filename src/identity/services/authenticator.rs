//! Per-request credential verification.
//!
//! No session is kept between calls: every operation presents credentials and
//! [`Authenticator::authenticate`] re-validates them against the stored hash.

use crate::identity::{
    domain::{AuthenticatedUser, Credentials},
    ports::{IdentityRepository, IdentityRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned while verifying credentials.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// The user is unknown or the password does not match.
    #[error("invalid username or password")]
    Unauthenticated,

    /// The account exists but is deactivated.
    #[error("account is inactive")]
    AccountInactive,

    /// The stored hash could not be compared.
    #[error("credential check failed: {0}")]
    CredentialCheck(String),

    /// Identity lookup failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
}

/// Verifies credentials against the identity store.
pub struct Authenticator<I>
where
    I: IdentityRepository,
{
    identity: Arc<I>,
}

impl<I> Clone for Authenticator<I>
where
    I: IdentityRepository,
{
    fn clone(&self) -> Self {
        Self {
            identity: Arc::clone(&self.identity),
        }
    }
}

impl<I> Authenticator<I>
where
    I: IdentityRepository,
{
    /// Creates an authenticator over an identity store handle.
    #[must_use]
    pub const fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Resolves credentials to an authenticated actor.
    ///
    /// The active flag is checked before the hash so an inactive account is
    /// reported as such whatever password was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::Unauthenticated`] for an unknown user or
    /// wrong password, [`AuthenticationError::AccountInactive`] for a
    /// deactivated account, and the remaining variants for store or hash
    /// failures.
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, AuthenticationError> {
        let username = credentials.username();
        let user = self
            .identity
            .find_user(username)
            .await?
            .ok_or(AuthenticationError::Unauthenticated)?;

        if !user.is_active() {
            debug!(user = %username, "rejected inactive account");
            return Err(AuthenticationError::AccountInactive);
        }

        let plaintext = credentials.password().expose().to_owned();
        let hash = user.password_hash().to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
            .await
            .map_err(|err| AuthenticationError::CredentialCheck(err.to_string()))?
            .map_err(|err| AuthenticationError::CredentialCheck(err.to_string()))?;
        if !matches {
            debug!(user = %username, "rejected credential mismatch");
            return Err(AuthenticationError::Unauthenticated);
        }

        let groups = self.identity.group_names(username).await?;
        Ok(AuthenticatedUser::new(username.clone(), groups))
    }
}
