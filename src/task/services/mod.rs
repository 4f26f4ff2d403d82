//! Application services for task lifecycle orchestration.

mod error;
mod lifecycle;
pub mod permission;
mod requests;

pub use error::{TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::{TaskLifecycleService, TransitionReceipt, WorkflowBackend};
pub use requests::{CreateTaskRequest, TasksByStateRequest, TransitionTaskRequest};
