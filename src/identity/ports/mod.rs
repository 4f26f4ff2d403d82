//! Port contracts for identity lookups.

pub mod repository;

pub use repository::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult};
