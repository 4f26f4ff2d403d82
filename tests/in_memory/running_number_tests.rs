//! Identifier minting under concurrent creation.

use std::collections::BTreeSet;

use crate::test_helpers::{running_number, seeded_workflow};
use eyre::ensure;
use rstest::rstest;
use taskflow::task::services::CreateTaskRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_mint_distinct_consecutive_ids() -> eyre::Result<()> {
    let workflow = seeded_workflow()?;

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let service = workflow.service.clone();
            tokio::spawn(async move {
                service
                    .create_task(CreateTaskRequest::new(
                        "alice",
                        "pw12345",
                        format!("Task {index}"),
                        "DEMO",
                    ))
                    .await
            })
        })
        .collect();

    let mut ids = BTreeSet::new();
    for handle in handles {
        let task = handle.await??;
        ids.insert(task.id().as_str().to_owned());
    }

    let expected: BTreeSet<String> = (6..=13).map(|number| format!("DEMO_{number}")).collect();
    ensure!(ids == expected, "unexpected ids {ids:?}");
    ensure!(running_number(&workflow)? == 13, "counter should be 13");
    Ok(())
}
