//! Adapters serving the identity, application, and task ports over one
//! store handle.
//!
//! - [`memory::InMemoryWorkflowStore`] for tests and local runs
//! - [`postgres::PostgresWorkflowStore`] backed by diesel and r2d2

pub mod memory;
pub mod postgres;

pub use memory::InMemoryWorkflowStore;
pub use postgres::{PgPool, PostgresWorkflowStore};
