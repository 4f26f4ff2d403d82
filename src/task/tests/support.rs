//! Seeded workflow fixtures shared by the task tests.

use crate::application::domain::{
    AppAcronym, Application, Plan, PlanColour, PlanName, RunningNumber, StatePermits,
};
use crate::identity::domain::{EmailAddress, GroupName, User, Username};
use crate::notification::adapters::RecordingNotifier;
use crate::storage::InMemoryWorkflowStore;
use crate::task::domain::{
    AuditLog, PersistedTaskData, Task, TaskDescription, TaskId, TaskName, TaskState,
};
use crate::task::services::TaskLifecycleService;
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

pub(super) const DEMO: &str = "DEMO";
pub(super) const SPRINT: &str = "Sprint 1";
pub(super) const SPRINT_COLOUR: &str = "#ff8800";

pub(super) type TestService =
    TaskLifecycleService<InMemoryWorkflowStore, RecordingNotifier, DefaultClock>;

/// A seeded store plus the service and recorder wired over it.
pub(super) struct Workflow {
    pub(super) store: Arc<InMemoryWorkflowStore>,
    pub(super) notifier: Arc<RecordingNotifier>,
    pub(super) service: TestService,
}

impl Workflow {
    pub(super) fn running_number(&self) -> u32 {
        self.store
            .running_number(&acronym())
            .map(RunningNumber::value)
            .expect("DEMO application is seeded")
    }

    pub(super) async fn task(&self, id: &str) -> Task {
        use crate::task::ports::TaskRepository;
        self.store
            .find_by_id(&TaskId::new(id).expect("valid id"))
            .await
            .expect("lookup should succeed")
            .expect("task should exist")
    }

    pub(super) fn put_task(&self, id: &str, state: TaskState, plan: Option<&str>) {
        self.store.put_task(task_in_state(id, state, plan));
    }
}

pub(super) fn acronym() -> AppAcronym {
    AppAcronym::new(DEMO).expect("valid acronym")
}

pub(super) fn username(name: &str) -> Username {
    Username::new(name).expect("valid username")
}

fn add_user(store: &InMemoryWorkflowStore, name: &str, password: &str, active: bool, groups: &[&str]) {
    let hash = bcrypt::hash(password, 4).expect("hash should succeed");
    let email = EmailAddress::new(format!("{name}@example.com"));
    store.add_user(User::new(username(name), hash, active, Some(email)));
    for group in groups {
        store.add_membership(&username(name), GroupName::new(*group));
    }
}

/// `DEMO` with `permit_create`, `open` and `todo` on `pl_1`, `doing` and
/// `done` on `pl_2`, and running number 5.
///
/// Users: `alice` (`pl_1`, `pw12345`), `bob` (`pl_2`, `bobpw`), `erin`
/// (`pl_1` and `pl_2`, `erinpw`), `carol` (inactive, `pl_1`, `carolpw`).
pub(super) fn seeded_store() -> InMemoryWorkflowStore {
    let store = InMemoryWorkflowStore::new();
    store.add_application(Application::new(
        acronym(),
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
        acronym(),
        PlanName::new(SPRINT).expect("valid plan"),
        Some(PlanColour::new(SPRINT_COLOUR)),
    ));
    add_user(&store, "alice", "pw12345", true, &["pl_1"]);
    add_user(&store, "bob", "bobpw", true, &["pl_2"]);
    add_user(&store, "erin", "erinpw", true, &["pl_1", "pl_2"]);
    add_user(&store, "carol", "carolpw", false, &["pl_1"]);
    store
}

pub(super) fn task_in_state(id: &str, state: TaskState, plan: Option<&str>) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id).expect("valid id"),
        name: TaskName::new(format!("Task {id}")).expect("valid name"),
        description: Some(TaskDescription::new("seeded").expect("valid description")),
        notes: AuditLog::empty(),
        plan: plan.map(|name| PlanName::new(name).expect("valid plan")),
        app_acronym: acronym(),
        state,
        creator: username("alice"),
        owner: username("alice"),
        created_on: NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"),
    })
}

#[fixture]
pub(super) fn workflow() -> Workflow {
    let store = Arc::new(seeded_store());
    let notifier = Arc::new(RecordingNotifier::new());
    let service = TaskLifecycleService::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        Arc::new(DefaultClock),
    );
    Workflow {
        store,
        notifier,
        service,
    }
}
