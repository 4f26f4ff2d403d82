//! Unit tests for the lifecycle edges and `Task::transition_to`.

use super::support::{task_in_state, username};
use crate::task::domain::{TaskDomainError, TaskState};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case(TaskState::Open, TaskState::Todo, true)]
#[case(TaskState::Open, TaskState::Doing, false)]
#[case(TaskState::Open, TaskState::Done, false)]
#[case(TaskState::Open, TaskState::Close, true)]
#[case(TaskState::Open, TaskState::Open, false)]
#[case(TaskState::Todo, TaskState::Doing, true)]
#[case(TaskState::Todo, TaskState::Open, false)]
#[case(TaskState::Todo, TaskState::Done, false)]
#[case(TaskState::Todo, TaskState::Close, true)]
#[case(TaskState::Doing, TaskState::Done, true)]
#[case(TaskState::Doing, TaskState::Todo, false)]
#[case(TaskState::Doing, TaskState::Close, true)]
#[case(TaskState::Done, TaskState::Close, true)]
#[case(TaskState::Done, TaskState::Doing, false)]
#[case(TaskState::Done, TaskState::Done, false)]
fn can_transition_to_returns_expected(
    #[case] from: TaskState,
    #[case] to: TaskState,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
fn close_is_terminal() {
    for target in TaskState::ALL {
        assert!(
            !TaskState::Close.can_transition_to(target),
            "close must not move to {target}"
        );
    }
    assert!(TaskState::Close.is_terminal());
}

#[rstest]
fn open_is_never_a_target() {
    assert!(TaskState::Open.allowed_predecessors().is_empty());
}

#[rstest]
fn done_is_reachable_only_from_doing() {
    assert_eq!(TaskState::Done.allowed_predecessors(), &[TaskState::Doing]);
}

#[rstest]
fn transition_hands_ownership_to_actor() -> eyre::Result<()> {
    let mut task = task_in_state("DEMO_6", TaskState::Doing, None);

    task.transition_to(TaskState::Done, &username("bob"), None, &DefaultClock)?;

    ensure!(task.state() == TaskState::Done, "state should be done");
    ensure!(task.owner() == &username("bob"), "owner should be bob");
    ensure!(task.creator() == &username("alice"), "creator never changes");
    ensure!(task.notes().is_empty(), "no note was supplied");
    Ok(())
}

#[rstest]
fn transition_appends_note_stamped_with_new_state() -> eyre::Result<()> {
    let mut task = task_in_state("DEMO_6", TaskState::Open, None);

    task.transition_to(
        TaskState::Todo,
        &username("alice"),
        Some("ready for work"),
        &DefaultClock,
    )?;
    task.transition_to(TaskState::Doing, &username("erin"), Some("picked up"), &DefaultClock)?;

    let entries: Vec<&str> = task.notes().entries().collect();
    ensure!(entries.len() == 2, "expected two entries, got {entries:?}");
    ensure!(
        entries.first().is_some_and(|e| e.ends_with("] (alice - todo): ready for work")),
        "unexpected first entry: {entries:?}"
    );
    ensure!(
        entries.get(1).is_some_and(|e| e.ends_with("] (erin - doing): picked up")),
        "unexpected second entry: {entries:?}"
    );
    Ok(())
}

#[rstest]
#[case(TaskState::Open)]
#[case(TaskState::Todo)]
#[case(TaskState::Done)]
#[case(TaskState::Close)]
fn promote_to_done_rejected_outside_doing(#[case] from: TaskState) -> eyre::Result<()> {
    let mut task = task_in_state("DEMO_6", from, None);
    let before = task.clone();

    let result = task.transition_to(TaskState::Done, &username("bob"), Some("x"), &DefaultClock);

    match result {
        Err(TaskDomainError::InvalidStateTransition { from: reported, to, .. }) => {
            ensure!(reported == from, "reported from-state should be {from}");
            ensure!(to == TaskState::Done, "reported target should be done");
        }
        other => bail!("expected InvalidStateTransition, got {other:?}"),
    }
    ensure!(task == before, "task must be unchanged on error");
    Ok(())
}

#[rstest]
#[case("open", TaskState::Open)]
#[case("todo", TaskState::Todo)]
#[case("doing", TaskState::Doing)]
#[case("done", TaskState::Done)]
#[case("close", TaskState::Close)]
fn state_names_parse_exactly(#[case] raw: &str, #[case] expected: TaskState) {
    assert_eq!(TaskState::try_from(raw), Ok(expected));
    assert_eq!(expected.as_str(), raw);
}

#[rstest]
#[case("Done")]
#[case(" done")]
#[case("closed")]
#[case("")]
fn unknown_state_names_are_rejected(#[case] raw: &str) {
    assert!(TaskState::try_from(raw).is_err());
}
