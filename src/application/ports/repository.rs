//! Repository port for application and plan lookups outside a transaction.

use crate::application::domain::{AppAcronym, Application, Plan, PlanName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for application repository operations.
pub type ApplicationRepositoryResult<T> = Result<T, ApplicationRepositoryError>;

/// Read-only application registry and plan catalog contract.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Finds an application by acronym.
    ///
    /// Returns `None` when the application does not exist.
    async fn find_application(
        &self,
        acronym: &AppAcronym,
    ) -> ApplicationRepositoryResult<Option<Application>>;

    /// Finds a plan by its composite key.
    ///
    /// Returns `None` when the application has no plan of that name.
    async fn find_plan(
        &self,
        acronym: &AppAcronym,
        name: &PlanName,
    ) -> ApplicationRepositoryResult<Option<Plan>>;
}

/// Errors returned by application repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ApplicationRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ApplicationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
