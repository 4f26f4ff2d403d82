//! Taskflow: a task-tracking workflow service.
//!
//! Authenticated users create tasks under an application and move them
//! through a fixed lifecycle, gated by the group the application permits for
//! each state.
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, mail, HTTP)
//!
//! # Modules
//!
//! - [`identity`]: Users, groups, and per-request credential checks
//! - [`application`]: Per-application permits, running numbers, and plans
//! - [`task`]: Task lifecycle, permission evaluation, and orchestration
//! - [`notification`]: Post-commit notices when a task reaches `done`
//! - [`storage`]: In-memory and `PostgreSQL` stores serving every port
//! - [`api`]: The HTTP routes

pub mod api;
pub mod application;
pub mod config;
pub mod identity;
pub mod notification;
pub mod storage;
pub mod task;
pub mod telemetry;
