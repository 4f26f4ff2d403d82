//! Domain model for task lifecycle management.
//!
//! Tasks move through `open -> todo -> doing -> done`, and any non-terminal
//! state may move to `close`. Infrastructure concerns stay outside the domain
//! boundary.

mod error;
mod ids;
mod notes;
mod state;
mod task;

pub use error::{ParseTaskStateError, TaskDomainError};
pub use ids::{TaskDescription, TaskId, TaskName};
pub use notes::{AuditEntry, AuditLog};
pub use state::TaskState;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskSummary};
