//! Unit tests for notice rendering and post-commit dispatch.

use super::adapters::RecordingNotifier;
use super::{Notification, NotificationDispatcher, Notifier, NotifierError, NotifierResult, TaskDoneNotice};
use crate::identity::domain::{EmailAddress, GroupName, User, Username};
use crate::storage::InMemoryWorkflowStore;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use mockall::mock;
use rstest::{fixture, rstest};
use std::sync::Arc;

mock! {
    Transport {}

    #[async_trait]
    impl Notifier for Transport {
        async fn send(&self, notification: &Notification) -> NotifierResult<()>;
    }
}

fn notice(group: &str) -> TaskDoneNotice {
    TaskDoneNotice {
        task_id: TaskId::new("DEMO_6").expect("valid id"),
        actor: Username::new("bob").expect("valid username"),
        recipients_group: GroupName::new(group),
    }
}

/// `pl_2` holds `bob` and `erin` with mail, and `dave` without.
#[fixture]
fn identity() -> Arc<InMemoryWorkflowStore> {
    let store = InMemoryWorkflowStore::new();
    for (name, email) in [
        ("bob", Some("bob@example.com")),
        ("erin", Some("erin@example.com")),
        ("dave", None),
    ] {
        let username = Username::new(name).expect("valid username");
        store.add_user(User::new(
            username.clone(),
            "unused",
            true,
            email.map(EmailAddress::new),
        ));
        store.add_membership(&username, GroupName::new("pl_2"));
    }
    Arc::new(store)
}

#[rstest]
fn notice_renders_subject_and_body() {
    let recipients = vec![EmailAddress::new("bob@example.com")];
    let rendered = notice("pl_2")
        .render(recipients.clone())
        .expect("templates should render");

    assert_eq!(rendered.recipients, recipients);
    assert_eq!(rendered.subject, "Task DEMO_6 Promoted to Done");
    assert_eq!(
        rendered.body,
        "The task with ID DEMO_6 has been promoted to Done by bob."
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatcher_sends_one_message_to_every_member_with_mail(
    identity: Arc<InMemoryWorkflowStore>,
) {
    let notifier = Arc::new(RecordingNotifier::new());
    let dispatcher = NotificationDispatcher::new(identity, Arc::clone(&notifier));

    dispatcher
        .task_done(notice("pl_2"))
        .await
        .expect("delivery task should finish");

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    let recipients: Vec<&str> = sent
        .first()
        .map(|message| message.recipients.iter().map(EmailAddress::as_str).collect())
        .unwrap_or_default();
    assert_eq!(recipients, ["bob@example.com", "erin@example.com"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatcher_skips_groups_without_recipients(identity: Arc<InMemoryWorkflowStore>) {
    let mut transport = MockTransport::new();
    transport.expect_send().never();
    let dispatcher = NotificationDispatcher::new(identity, Arc::new(transport));

    dispatcher
        .task_done(notice("pl_9"))
        .await
        .expect("delivery task should finish");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_is_contained(identity: Arc<InMemoryWorkflowStore>) {
    let mut transport = MockTransport::new();
    transport.expect_send().times(1).returning(|_| {
        Err(NotifierError::transport(std::io::Error::other(
            "relay unavailable",
        )))
    });
    let dispatcher = NotificationDispatcher::new(identity, Arc::new(transport));

    let outcome = dispatcher.task_done(notice("pl_2")).await;

    assert!(outcome.is_ok(), "delivery task must not panic: {outcome:?}");
}
