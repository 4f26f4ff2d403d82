//! Domain model for the application registry and plan catalog.

mod application;
mod error;
mod plan;

pub use application::{AppAcronym, Application, RunningNumber, StatePermits};
pub use error::ApplicationDomainError;
pub use plan::{Plan, PlanColour, PlanName};
