//! Unit-of-work tests for [`InMemoryWorkflowStore`].

use crate::test_helpers::{DEMO, running_number, seeded_workflow, task_in_state};
use eyre::ensure;
use rstest::rstest;
use taskflow::application::domain::{AppAcronym, RunningNumber};
use taskflow::storage::InMemoryWorkflowStore;
use taskflow::task::{
    domain::{TaskId, TaskState},
    ports::{TaskRepository, WorkflowStore, WorkflowStoreError},
};

#[derive(Debug)]
enum ProbeError {
    Abort,
    Store(WorkflowStoreError),
}

impl From<WorkflowStoreError> for ProbeError {
    fn from(err: WorkflowStoreError) -> Self {
        Self::Store(err)
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_closure_discards_its_writes() -> eyre::Result<()> {
    let workflow = seeded_workflow()?;
    let acronym = AppAcronym::new(DEMO)?;
    let task = task_in_state("DEMO_6", TaskState::Open)?;

    let outcome = workflow
        .store
        .transaction(move |tx| -> Result<(), ProbeError> {
            tx.save_running_number(&acronym, RunningNumber::new(6))?;
            tx.insert_task(&task)?;
            Err(ProbeError::Abort)
        })
        .await;

    ensure!(matches!(outcome, Err(ProbeError::Abort)), "got {outcome:?}");
    ensure!(running_number(&workflow)? == 5, "counter must stay at 5");
    ensure!(
        workflow.store.find_by_id(&TaskId::new("DEMO_6")?).await?.is_none(),
        "insert must be rolled back"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn successful_closure_commits_every_write() -> eyre::Result<()> {
    let workflow = seeded_workflow()?;
    let acronym = AppAcronym::new(DEMO)?;
    let task = task_in_state("DEMO_6", TaskState::Open)?;

    workflow
        .store
        .transaction(move |tx| -> Result<(), ProbeError> {
            let current = tx.lock_running_number(&acronym)?.ok_or(ProbeError::Abort)?;
            let next = current.next().map_err(|_| ProbeError::Abort)?;
            tx.save_running_number(&acronym, next)?;
            tx.insert_task(&task)?;
            Ok(())
        })
        .await
        .map_err(|err| eyre::eyre!("transaction failed: {err:?}"))?;

    ensure!(running_number(&workflow)? == 6, "counter should be 6");
    ensure!(
        workflow.store.find_by_id(&TaskId::new("DEMO_6")?).await?.is_some(),
        "task should be stored"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_of_existing_identifier_is_duplicate() -> eyre::Result<()> {
    let store = InMemoryWorkflowStore::new();
    store.put_task(task_in_state("DEMO_6", TaskState::Open)?);
    let task = task_in_state("DEMO_6", TaskState::Open)?;

    let outcome = store
        .transaction(move |tx| -> Result<(), ProbeError> {
            tx.insert_task(&task)?;
            Ok(())
        })
        .await;

    ensure!(
        matches!(
            outcome,
            Err(ProbeError::Store(WorkflowStoreError::DuplicateTask(ref id))) if id.as_str() == "DEMO_6"
        ),
        "got {outcome:?}"
    );
    Ok(())
}

#[rstest]
#[case(TaskState::Doing, 1)]
#[case(TaskState::Todo, 0)]
#[tokio::test(flavor = "multi_thread")]
async fn update_is_guarded_by_expected_state(
    #[case] expected: TaskState,
    #[case] changed: u64,
) -> eyre::Result<()> {
    let store = InMemoryWorkflowStore::new();
    store.put_task(task_in_state("DEMO_6", TaskState::Doing)?);
    let updated = task_in_state("DEMO_6", TaskState::Done)?;

    let rows = store
        .transaction(move |tx| -> Result<u64, ProbeError> {
            Ok(tx.update_task(&updated, expected)?)
        })
        .await
        .map_err(|err| eyre::eyre!("transaction failed: {err:?}"))?;

    ensure!(rows == changed, "expected {changed} rows, got {rows}");
    let stored = store
        .find_by_id(&TaskId::new("DEMO_6")?)
        .await?
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    let state = if changed == 1 {
        TaskState::Done
    } else {
        TaskState::Doing
    };
    ensure!(stored.state() == state, "unexpected state {}", stored.state());
    Ok(())
}
