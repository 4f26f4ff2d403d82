//! Post-commit handoff to the notification sink.

use super::{domain::TaskDoneNotice, ports::Notifier};
use crate::identity::ports::IdentityRepository;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Hands committed `done` transitions to a background task that resolves
/// recipients and sends the message.
///
/// Nothing the background task does can fail the transition: every error is
/// logged and dropped.
pub struct NotificationDispatcher<I, N>
where
    I: IdentityRepository + 'static,
    N: Notifier + 'static,
{
    identity: Arc<I>,
    notifier: Arc<N>,
}

impl<I, N> Clone for NotificationDispatcher<I, N>
where
    I: IdentityRepository + 'static,
    N: Notifier + 'static,
{
    fn clone(&self) -> Self {
        Self {
            identity: Arc::clone(&self.identity),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<I, N> NotificationDispatcher<I, N>
where
    I: IdentityRepository + 'static,
    N: Notifier + 'static,
{
    /// Creates a dispatcher over an identity store and a notifier.
    #[must_use]
    pub const fn new(identity: Arc<I>, notifier: Arc<N>) -> Self {
        Self { identity, notifier }
    }

    /// Spawns delivery of `notice` and returns immediately.
    ///
    /// Dropping the returned handle detaches the task.
    pub fn task_done(&self, notice: TaskDoneNotice) -> JoinHandle<()> {
        let identity = Arc::clone(&self.identity);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move { deliver(&*identity, &*notifier, notice).await })
    }
}

async fn deliver<I, N>(identity: &I, notifier: &N, notice: TaskDoneNotice)
where
    I: IdentityRepository,
    N: Notifier,
{
    let recipients = match identity.member_emails(&notice.recipients_group).await {
        Ok(recipients) => recipients,
        Err(err) => {
            warn!(task_id = %notice.task_id, error = %err, "could not resolve notification recipients");
            return;
        }
    };
    if recipients.is_empty() {
        info!(
            task_id = %notice.task_id,
            group = %notice.recipients_group,
            "no recipients for done notification"
        );
        return;
    }

    let notification = match notice.render(recipients) {
        Ok(notification) => notification,
        Err(err) => {
            warn!(task_id = %notice.task_id, error = %err, "could not render done notification");
            return;
        }
    };
    if let Err(err) = notifier.send(&notification).await {
        let addresses = notification
            .recipients
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        warn!(task_id = %notice.task_id, %addresses, error = %err, "done notification failed");
    }
}
