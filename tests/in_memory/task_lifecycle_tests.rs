//! End-to-end task flows over the in-memory store.

use crate::test_helpers::{SPRINT, SPRINT_COLOUR, running_number, seeded_workflow};
use eyre::{bail, ensure};
use rstest::rstest;
use taskflow::task::{
    domain::TaskState,
    services::{
        CreateTaskRequest, TaskLifecycleError, TasksByStateRequest, TransitionTaskRequest,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_listed_under_open() -> eyre::Result<()> {
    let workflow = seeded_workflow()?;
    let task = workflow
        .service
        .create_task(
            CreateTaskRequest::new("alice", "pw12345", "Fix bug", "DEMO")
                .with_description("desc")
                .with_plan(SPRINT),
        )
        .await?;

    let rows = workflow
        .service
        .tasks_by_state(TasksByStateRequest::new("alice", "pw12345", "DEMO", "open"))
        .await?;

    ensure!(rows.len() == 1, "expected one row, got {rows:?}");
    let Some(row) = rows.first() else {
        bail!("missing row");
    };
    ensure!(&row.id == task.id(), "unexpected row {row:?}");
    ensure!(row.description.as_deref() == Some("desc"), "description lost");
    ensure!(
        row.plan_colour.as_ref().map(|colour| colour.as_str()) == Some(SPRINT_COLOUR),
        "colour lost"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn promotion_hands_ownership_and_notifies_done_group() -> eyre::Result<()> {
    let workflow = seeded_workflow()?;
    let task = workflow
        .service
        .create_task(CreateTaskRequest::new("alice", "pw12345", "Ship", "DEMO"))
        .await?;
    let id = task.id().as_str().to_owned();
    for target in ["todo", "doing"] {
        workflow
            .service
            .transition_task(TransitionTaskRequest::new("erin", "erinpw", id.as_str(), target))
            .await?;
    }

    let receipt = workflow
        .service
        .transition_task(TransitionTaskRequest::promote_to_done("bob", "bobpw", id.as_str()))
        .await?;

    ensure!(receipt.task.state() == TaskState::Done, "task should be done");
    ensure!(receipt.task.owner().as_str() == "bob", "bob should own it");
    if let Some(delivery) = receipt.notification {
        delivery.await?;
    }
    let sent = workflow.notifier.sent();
    ensure!(sent.len() == 1, "expected one message, got {sent:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_creation_leaves_counter_alone() -> eyre::Result<()> {
    let workflow = seeded_workflow()?;

    let result = workflow
        .service
        .create_task(CreateTaskRequest::new("bob", "bobpw", "Nope", "DEMO"))
        .await;

    ensure!(
        matches!(result, Err(TaskLifecycleError::Forbidden(_))),
        "got {result:?}"
    );
    ensure!(running_number(&workflow)? == 5, "counter must stay at 5");
    Ok(())
}
