//! Seeded in-memory workflow shared by the integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use taskflow::application::domain::{
    AppAcronym, Application, Plan, PlanColour, PlanName, RunningNumber, StatePermits,
};
use taskflow::identity::domain::{EmailAddress, GroupName, User, Username};
use taskflow::notification::adapters::RecordingNotifier;
use taskflow::storage::InMemoryWorkflowStore;
use taskflow::task::domain::{
    AuditLog, PersistedTaskData, Task, TaskId, TaskName, TaskState,
};
use taskflow::task::services::TaskLifecycleService;

/// Application every seeded task belongs to.
pub const DEMO: &str = "DEMO";
/// Plan seeded with [`SPRINT_COLOUR`].
pub const SPRINT: &str = "Sprint 1";
/// Colour of [`SPRINT`].
pub const SPRINT_COLOUR: &str = "#ff8800";

/// Service type wired over the seeded store.
pub type TestService = TaskLifecycleService<InMemoryWorkflowStore, RecordingNotifier, DefaultClock>;

/// Store, recorder, and service sharing one dataset.
pub struct SeededWorkflow {
    /// Seeded store.
    pub store: Arc<InMemoryWorkflowStore>,
    /// Recorder receiving every done notification.
    pub notifier: Arc<RecordingNotifier>,
    /// Service over `store` and `notifier`.
    pub service: TestService,
}

/// Builds the seeded dataset.
///
/// `DEMO` grants create, `open` and `todo` to `pl_1` and `doing` and `done`
/// to `pl_2`, with running number 5. Users: `alice` (`pl_1`, `pw12345`),
/// `bob` (`pl_2`, `bobpw`), `erin` (both groups, `erinpw`), and the
/// inactive `carol` (`pl_1`, `carolpw`).
///
/// # Errors
///
/// Returns an error if a seed value fails validation or hashing fails.
pub fn seeded_workflow() -> eyre::Result<SeededWorkflow> {
    let store = InMemoryWorkflowStore::new();
    store.add_application(Application::new(
        AppAcronym::new(DEMO)?,
        GroupName::new("pl_1"),
        StatePermits {
            open: GroupName::new("pl_1"),
            todo: GroupName::new("pl_1"),
            doing: GroupName::new("pl_2"),
            done: GroupName::new("pl_2"),
        },
        RunningNumber::new(5),
    ));
    store.add_plan(Plan::new(
        AppAcronym::new(DEMO)?,
        PlanName::new(SPRINT)?,
        Some(PlanColour::new(SPRINT_COLOUR)),
    ));
    for (name, password, active, groups) in [
        ("alice", "pw12345", true, &["pl_1"][..]),
        ("bob", "bobpw", true, &["pl_2"][..]),
        ("erin", "erinpw", true, &["pl_1", "pl_2"][..]),
        ("carol", "carolpw", false, &["pl_1"][..]),
    ] {
        let username = Username::new(name)?;
        let email = EmailAddress::new(format!("{name}@example.com"));
        store.add_user(User::new(
            username.clone(),
            bcrypt::hash(password, 4)?,
            active,
            Some(email),
        ));
        for group in groups {
            store.add_membership(&username, GroupName::new(*group));
        }
    }

    let store = Arc::new(store);
    let notifier = Arc::new(RecordingNotifier::new());
    let service = TaskLifecycleService::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        Arc::new(DefaultClock),
    );
    Ok(SeededWorkflow {
        store,
        notifier,
        service,
    })
}

/// Builds a `DEMO` task owned by `alice` in `state`.
///
/// # Errors
///
/// Returns an error if `id` is empty.
pub fn task_in_state(id: &str, state: TaskState) -> eyre::Result<Task> {
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id)?,
        name: TaskName::new(format!("Task {id}"))?,
        description: None,
        notes: AuditLog::empty(),
        plan: None,
        app_acronym: AppAcronym::new(DEMO)?,
        state,
        creator: Username::new("alice")?,
        owner: Username::new("alice")?,
        created_on: chrono::Utc::now().date_naive(),
    }))
}

/// Returns the `DEMO` running number.
///
/// # Errors
///
/// Returns an error if `DEMO` is not seeded.
pub fn running_number(workflow: &SeededWorkflow) -> eyre::Result<u32> {
    workflow
        .store
        .running_number(&AppAcronym::new(DEMO)?)
        .map(RunningNumber::value)
        .ok_or_else(|| eyre::eyre!("DEMO application is not seeded"))
}
