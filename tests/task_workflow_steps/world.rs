//! Shared world state for task workflow BDD scenarios.

use crate::test_helpers::{SeededWorkflow, seeded_workflow};
use rstest::fixture;
use taskflow::api::{ApiError, ResponseCode};
use taskflow::task::services::TaskLifecycleResult;

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    pub workflow: SeededWorkflow,
    pub last_created_id: Option<String>,
    pub last_code: Option<ResponseCode>,
}

impl TaskWorkflowWorld {
    /// Creates a world over a freshly seeded workflow.
    ///
    /// # Panics
    ///
    /// Panics if the seed data cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workflow: seeded_workflow().expect("seeded workflow"),
            last_created_id: None,
            last_code: None,
        }
    }

    /// Records the response code a request would have been answered with.
    pub fn record<T>(&mut self, result: &TaskLifecycleResult<T>) {
        let code = match result {
            Ok(_) => ResponseCode::S001,
            Err(err) => ApiError::from(err).code(),
        };
        self.last_code = Some(code);
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
