//! Service layer for task creation, state queries, and state transitions.

use super::{
    error::{TaskLifecycleError, TaskLifecycleResult},
    permission,
    requests::{CreateTaskRequest, TasksByStateRequest, TransitionTaskRequest},
};
use crate::application::{
    domain::{AppAcronym, Application, PlanName},
    ports::ApplicationRepository,
};
use crate::identity::{
    domain::{AuthenticatedUser, Credentials, GroupName},
    ports::IdentityRepository,
    services::Authenticator,
};
use crate::notification::{NotificationDispatcher, Notifier, TaskDoneNotice};
use crate::task::{
    domain::{Task, TaskDescription, TaskDraft, TaskId, TaskName, TaskState, TaskSummary},
    ports::{TaskRepository, WorkflowStore},
};
use mockable::Clock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Every port the lifecycle service needs, served by one store handle.
pub trait WorkflowBackend:
    WorkflowStore + TaskRepository + ApplicationRepository + IdentityRepository + 'static
{
}

impl<T> WorkflowBackend for T where
    T: WorkflowStore + TaskRepository + ApplicationRepository + IdentityRepository + 'static
{
}

/// Outcome of a committed transition.
#[derive(Debug)]
pub struct TransitionReceipt {
    /// The task as committed.
    pub task: Task,
    /// Background notification delivery, when the transition triggers one.
    ///
    /// Dropping the handle leaves delivery running.
    pub notification: Option<JoinHandle<()>>,
}

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<S, N, C>
where
    S: WorkflowBackend,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    authenticator: Authenticator<S>,
    dispatcher: NotificationDispatcher<S, N>,
    clock: Arc<C>,
}

impl<S, N, C> Clone for TaskLifecycleService<S, N, C>
where
    S: WorkflowBackend,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            authenticator: self.authenticator.clone(),
            dispatcher: self.dispatcher.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, N, C> TaskLifecycleService<S, N, C>
where
    S: WorkflowBackend,
    N: Notifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(store: Arc<S>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            authenticator: Authenticator::new(Arc::clone(&store)),
            dispatcher: NotificationDispatcher::new(Arc::clone(&store), notifier),
            store,
            clock,
        }
    }

    /// Creates a task in state `open` under the application's next running
    /// number.
    ///
    /// Checks, first failure wins: required fields, field limits,
    /// credentials, the application's create permission, plan existence.
    /// The running-number bump and the insert then commit together or not at
    /// all.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] for any failed check,
    /// [`TaskLifecycleError::DuplicateTask`] when the minted identifier is
    /// taken, and store variants for persistence failures.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        require_fields(&[
            ("username", &request.username),
            ("password", &request.password),
            ("task_name", &request.name),
            ("task_appAcronym", &request.app_acronym),
        ])?;
        let credentials = Credentials::new(request.username, request.password)?;
        let draft = TaskDraft {
            name: TaskName::new(request.name)?,
            description: present(request.description)
                .map(TaskDescription::new)
                .transpose()?,
            note: present(request.note),
            plan: present(request.plan).map(PlanName::new).transpose()?,
            app_acronym: AppAcronym::new(request.app_acronym)?,
        };

        let actor = self.authenticator.authenticate(&credentials).await?;
        let application = self.application(&draft.app_acronym).await?;
        if !permission::can_create(&application, &actor) {
            return Err(TaskLifecycleError::Forbidden(actor.username().clone()));
        }
        if let Some(plan) = &draft.plan {
            if self.store.find_plan(&draft.app_acronym, plan).await?.is_none() {
                return Err(TaskLifecycleError::PlanNotFound {
                    app: draft.app_acronym.clone(),
                    plan: plan.clone(),
                });
            }
        }

        let clock = Arc::clone(&self.clock);
        let creator = actor.username().clone();
        let task = self
            .store
            .transaction(move |tx| -> TaskLifecycleResult<Task> {
                let current = tx
                    .lock_running_number(&draft.app_acronym)?
                    .ok_or_else(|| TaskLifecycleError::ApplicationNotFound(draft.app_acronym.clone()))?;
                let next = current.next()?;
                tx.save_running_number(&draft.app_acronym, next)?;
                let task = Task::open(TaskId::compose(&draft.app_acronym, next), draft, creator, &*clock);
                tx.insert_task(&task)?;
                Ok(task)
            })
            .await?;

        info!(task_id = %task.id(), user = %task.creator(), "task created");
        Ok(task)
    }

    /// Lists an application's tasks in one state, each with its plan colour.
    ///
    /// Any authenticated active user may read any application.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidState`] for an unknown state name
    /// (checked before credentials), credential errors, and store variants.
    pub async fn tasks_by_state(
        &self,
        request: TasksByStateRequest,
    ) -> TaskLifecycleResult<Vec<TaskSummary>> {
        require_fields(&[
            ("username", &request.username),
            ("password", &request.password),
            ("task_appAcronym", &request.app_acronym),
            ("task_state", &request.state),
        ])?;
        let credentials = Credentials::new(request.username, request.password)?;
        let state = TaskState::try_from(request.state.as_str())?;
        let acronym = AppAcronym::new(request.app_acronym)?;

        self.authenticator.authenticate(&credentials).await?;
        Ok(self.store.find_by_state(&acronym, state).await?)
    }

    /// Moves a task to the requested state and hands ownership to the
    /// requester.
    ///
    /// Authorization is evaluated against the task's state as read before the
    /// transaction. Inside the transaction the task is re-read and locked; if
    /// its state no longer matches the authorized one the request fails with
    /// [`TaskLifecycleError::NoOp`] and nothing is written. The update is
    /// guarded by the authorized state as well. A committed move to `done`
    /// schedules a notification to the application's `permit_done` group.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`],
    /// [`TaskLifecycleError::Forbidden`],
    /// [`TaskLifecycleError::InvalidTransition`] (state unchanged),
    /// [`TaskLifecycleError::NoOp`] when the task moved after authorization,
    /// and validation, credential, or store variants.
    pub async fn transition_task(
        &self,
        request: TransitionTaskRequest,
    ) -> TaskLifecycleResult<TransitionReceipt> {
        require_fields(&[
            ("username", &request.username),
            ("password", &request.password),
            ("task_id", &request.task_id),
            ("task_state", &request.target_state),
        ])?;
        let credentials = Credentials::new(request.username, request.password)?;
        let target = TaskState::try_from(request.target_state.as_str())?;
        let task_id = TaskId::new(request.task_id)?;

        let actor = self.authenticator.authenticate(&credentials).await?;
        let authorized = self.authorize_transition(&task_id, &actor).await?;

        let clock = Arc::clone(&self.clock);
        let actor_name = actor.username().clone();
        let note = present(request.note);
        let (task, recipients_group) = self
            .store
            .transaction(move |tx| -> TaskLifecycleResult<(Task, Option<GroupName>)> {
                let mut task = tx
                    .lock_task(&task_id)?
                    .ok_or_else(|| TaskLifecycleError::TaskNotFound(task_id.clone()))?;
                if task.state() != authorized {
                    debug!(
                        task_id = %task_id,
                        authorized = %authorized,
                        current = %task.state(),
                        "task state changed since authorization"
                    );
                    return Err(TaskLifecycleError::NoOp(task_id));
                }
                task.transition_to(target, &actor_name, note.as_deref(), &*clock)?;
                if tx.update_task(&task, authorized)? == 0 {
                    return Err(TaskLifecycleError::NoOp(task_id));
                }

                let recipients_group = if target == TaskState::Done {
                    tx.application(task.app_acronym())?
                        .map(|application| application.permits().done.clone())
                } else {
                    None
                };
                Ok((task, recipients_group))
            })
            .await?;

        info!(
            task_id = %task.id(),
            state = %task.state(),
            owner = %task.owner(),
            "task transitioned"
        );
        let notification = recipients_group.map(|group| {
            self.dispatcher.task_done(TaskDoneNotice {
                task_id: task.id().clone(),
                actor: task.owner().clone(),
                recipients_group: group,
            })
        });
        Ok(TransitionReceipt { task, notification })
    }

    async fn authorize_transition(
        &self,
        task_id: &TaskId,
        actor: &AuthenticatedUser,
    ) -> TaskLifecycleResult<TaskState> {
        let task = self
            .store
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskLifecycleError::TaskNotFound(task_id.clone()))?;
        let application = self.application(task.app_acronym()).await?;
        if permission::can_act_on(&application, task.state(), actor) {
            return Ok(task.state());
        }
        debug!(
            task_id = %task_id,
            state = %task.state(),
            user = %actor.username(),
            "transition not permitted for current state"
        );
        Err(TaskLifecycleError::Forbidden(actor.username().clone()))
    }

    async fn application(&self, acronym: &AppAcronym) -> TaskLifecycleResult<Application> {
        self.store
            .find_application(acronym)
            .await?
            .ok_or_else(|| TaskLifecycleError::ApplicationNotFound(acronym.clone()))
    }
}

/// Fails on the first absent field, in the order given.
fn require_fields(fields: &[(&'static str, &String)]) -> TaskLifecycleResult<()> {
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((name, _)) => Err(TaskLifecycleError::MissingField(name)),
        None => Ok(()),
    }
}

/// Treats an empty optional field as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
