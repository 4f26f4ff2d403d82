//! In-memory workflow store for tests and local runs.
//!
//! One mutex guards the whole dataset. A transaction runs its closure against
//! a working copy and swaps the copy in only when the closure succeeds, so a
//! failed unit of work leaves nothing behind.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::{
    domain::{AppAcronym, Application, Plan, PlanName, RunningNumber},
    ports::{ApplicationRepository, ApplicationRepositoryError, ApplicationRepositoryResult},
};
use crate::identity::{
    domain::{EmailAddress, GroupName, User, Username},
    ports::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult},
};
use crate::task::{
    domain::{Task, TaskId, TaskState, TaskSummary},
    ports::{
        TaskRepository, TaskRepositoryError, TaskRepositoryResult, WorkflowStore,
        WorkflowStoreError, WorkflowStoreResult, WorkflowTransaction,
    },
};

/// Thread-safe in-memory implementation of every workflow port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowStore {
    state: Arc<Mutex<WorkflowState>>,
}

#[derive(Debug, Clone, Default)]
struct WorkflowState {
    users: BTreeMap<Username, User>,
    memberships: BTreeMap<Username, BTreeSet<GroupName>>,
    applications: HashMap<AppAcronym, Application>,
    plans: HashMap<(AppAcronym, PlanName), Plan>,
    tasks: Vec<Task>,
}

impl WorkflowState {
    fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }
}

fn poisoned<T>(err: &PoisonError<T>) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

impl InMemoryWorkflowStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn seed(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds or replaces a user record.
    pub fn add_user(&self, user: User) {
        self.seed().users.insert(user.username().clone(), user);
    }

    /// Adds `username` to `group`.
    pub fn add_membership(&self, username: &Username, group: GroupName) {
        self.seed()
            .memberships
            .entry(username.clone())
            .or_default()
            .insert(group);
    }

    /// Adds or replaces an application.
    pub fn add_application(&self, application: Application) {
        self.seed()
            .applications
            .insert(application.acronym().clone(), application);
    }

    /// Adds or replaces a plan.
    pub fn add_plan(&self, plan: Plan) {
        self.seed()
            .plans
            .insert((plan.app_acronym().clone(), plan.name().clone()), plan);
    }

    /// Stores a task as-is, replacing any task with the same identifier.
    pub fn put_task(&self, task: Task) {
        let mut state = self.seed();
        state.tasks.retain(|existing| existing.id() != task.id());
        state.tasks.push(task);
    }

    /// Returns the application's last allocated running number.
    #[must_use]
    pub fn running_number(&self, acronym: &AppAcronym) -> Option<RunningNumber> {
        self.seed()
            .applications
            .get(acronym)
            .map(Application::running_number)
    }

    fn run_transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn WorkflowTransaction) -> Result<T, E>,
        E: From<WorkflowStoreError>,
    {
        let mut guard = self
            .state
            .lock()
            .map_err(|err| WorkflowStoreError::persistence(poisoned(&err)))?;
        let mut working = MemoryTransaction {
            state: guard.clone(),
        };
        let value = work(&mut working)?;
        *guard = working.state;
        Ok(value)
    }

    fn read<T, E>(
        &self,
        to_error: impl FnOnce(std::io::Error) -> E,
        f: impl FnOnce(&WorkflowState) -> T,
    ) -> Result<T, E> {
        let state = self.state.lock().map_err(|err| to_error(poisoned(&err)))?;
        Ok(f(&state))
    }
}

struct MemoryTransaction {
    state: WorkflowState,
}

impl WorkflowTransaction for MemoryTransaction {
    fn lock_running_number(
        &mut self,
        acronym: &AppAcronym,
    ) -> WorkflowStoreResult<Option<RunningNumber>> {
        Ok(self
            .state
            .applications
            .get(acronym)
            .map(Application::running_number))
    }

    fn save_running_number(
        &mut self,
        acronym: &AppAcronym,
        number: RunningNumber,
    ) -> WorkflowStoreResult<()> {
        if let Some(application) = self.state.applications.get_mut(acronym) {
            application.set_running_number(number);
        }
        Ok(())
    }

    fn application(&mut self, acronym: &AppAcronym) -> WorkflowStoreResult<Option<Application>> {
        Ok(self.state.applications.get(acronym).cloned())
    }

    fn insert_task(&mut self, task: &Task) -> WorkflowStoreResult<()> {
        if self.state.task(task.id()).is_some() {
            return Err(WorkflowStoreError::DuplicateTask(task.id().clone()));
        }
        self.state.tasks.push(task.clone());
        Ok(())
    }

    fn lock_task(&mut self, id: &TaskId) -> WorkflowStoreResult<Option<Task>> {
        Ok(self.state.task(id).cloned())
    }

    fn update_task(&mut self, task: &Task, expected: TaskState) -> WorkflowStoreResult<u64> {
        let Some(stored) = self
            .state
            .tasks
            .iter_mut()
            .find(|stored| stored.id() == task.id() && stored.state() == expected)
        else {
            return Ok(0);
        };
        *stored = task.clone();
        Ok(1)
    }
}

#[async_trait]
impl WorkflowStore for InMemoryWorkflowStore {
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn WorkflowTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<WorkflowStoreError> + Send + 'static,
    {
        self.run_transaction(work)
    }
}

#[async_trait]
impl IdentityRepository for InMemoryWorkflowStore {
    async fn find_user(&self, username: &Username) -> IdentityRepositoryResult<Option<User>> {
        self.read(IdentityRepositoryError::persistence, |state| {
            state.users.get(username).cloned()
        })
    }

    async fn group_names(&self, username: &Username) -> IdentityRepositoryResult<Vec<GroupName>> {
        self.read(IdentityRepositoryError::persistence, |state| {
            state
                .memberships
                .get(username)
                .map(|groups| groups.iter().cloned().collect())
                .unwrap_or_default()
        })
    }

    async fn member_emails(
        &self,
        group: &GroupName,
    ) -> IdentityRepositoryResult<Vec<EmailAddress>> {
        self.read(IdentityRepositoryError::persistence, |state| {
            state
                .memberships
                .iter()
                .filter(|(_, groups)| groups.contains(group))
                .filter_map(|(username, _)| state.users.get(username))
                .filter_map(|user| user.email().cloned())
                .collect()
        })
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryWorkflowStore {
    async fn find_application(
        &self,
        acronym: &AppAcronym,
    ) -> ApplicationRepositoryResult<Option<Application>> {
        self.read(ApplicationRepositoryError::persistence, |state| {
            state.applications.get(acronym).cloned()
        })
    }

    async fn find_plan(
        &self,
        acronym: &AppAcronym,
        name: &PlanName,
    ) -> ApplicationRepositoryResult<Option<Plan>> {
        self.read(ApplicationRepositoryError::persistence, |state| {
            state.plans.get(&(acronym.clone(), name.clone())).cloned()
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryWorkflowStore {
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.read(TaskRepositoryError::persistence, |state| {
            state.task(id).cloned()
        })
    }

    async fn find_by_state(
        &self,
        acronym: &AppAcronym,
        task_state: TaskState,
    ) -> TaskRepositoryResult<Vec<TaskSummary>> {
        self.read(TaskRepositoryError::persistence, |state| {
            state
                .tasks
                .iter()
                .filter(|task| task.app_acronym() == acronym && task.state() == task_state)
                .map(|task| summarize(state, task))
                .collect()
        })
    }
}

fn summarize(state: &WorkflowState, task: &Task) -> TaskSummary {
    let plan_colour = task
        .plan()
        .and_then(|plan| {
            state
                .plans
                .get(&(task.app_acronym().clone(), plan.clone()))
        })
        .and_then(|plan| plan.colour().cloned());
    TaskSummary {
        id: task.id().clone(),
        name: task.name().as_str().to_owned(),
        description: task.description().map(|d| d.as_str().to_owned()),
        owner: task.owner().as_str().to_owned(),
        plan_colour,
    }
}
