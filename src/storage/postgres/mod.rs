//! `PostgreSQL` adapters for the workflow ports.
//!
//! Diesel queries run on the blocking thread pool. Reads use a pooled
//! connection each; units of work run in one read-committed transaction and
//! lock the running-number and task rows they touch.

mod conversion;
mod models;
mod repository;
mod schema;
mod transaction;


pub use conversion::RowError;
pub use repository::{PgPool, PostgresWorkflowStore};
