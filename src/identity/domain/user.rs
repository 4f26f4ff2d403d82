//! User records, credentials, and group membership values.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login name of a user; the primary key of the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a username.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::MissingField`] when the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(IdentityDomainError::MissingField("username"));
        }
        Ok(Self(raw))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plaintext password supplied with a request.
///
/// The value is capped at [`Password::MAX_LENGTH`] UTF-16 code units as a
/// literal input rule, so a character outside the Basic Multilingual Plane
/// counts twice. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Longest accepted plaintext password, in UTF-16 code units.
    pub const MAX_LENGTH: usize = 10;

    /// Creates a password value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::MissingField`] when empty and
    /// [`IdentityDomainError::PasswordTooLong`] when longer than
    /// [`Password::MAX_LENGTH`] UTF-16 code units.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(IdentityDomainError::MissingField("password"));
        }
        if raw.encode_utf16().count() > Self::MAX_LENGTH {
            return Err(IdentityDomainError::PasswordTooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the plaintext for hash comparison.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**)")
    }
}

/// Username and password pair presented on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Password,
}

impl Credentials {
    /// Validates and pairs a claimed username with its plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when either field is missing or the
    /// password is too long.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    /// Returns the claimed username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the plaintext password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }
}

/// Name of a permission group such as `pl_1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    /// Wraps a group name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the group name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mail address stored on a user record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Wraps a stored address.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user record as held by the identity store.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    password_hash: String,
    active: bool,
    email: Option<EmailAddress>,
}

impl User {
    /// Builds a user record from stored fields.
    #[must_use]
    pub fn new(
        username: Username,
        password_hash: impl Into<String>,
        active: bool,
        email: Option<EmailAddress>,
    ) -> Self {
        Self {
            username,
            password_hash: password_hash.into(),
            active,
            email,
        }
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the stored bcrypt hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns whether the account may act.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the mail address, if any.
    #[must_use]
    pub const fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("active", &self.active)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// A verified actor: an active user whose credential matched, together with
/// the groups it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: Username,
    groups: Vec<GroupName>,
}

impl AuthenticatedUser {
    /// Creates an authenticated actor.
    #[must_use]
    pub const fn new(username: Username, groups: Vec<GroupName>) -> Self {
        Self { username, groups }
    }

    /// Returns the actor's username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the actor's group memberships.
    #[must_use]
    pub fn groups(&self) -> &[GroupName] {
        &self.groups
    }

    /// Returns whether the actor belongs to `group`.
    #[must_use]
    pub fn is_member_of(&self, group: &GroupName) -> bool {
        self.groups.iter().any(|candidate| candidate == group)
    }
}
