//! Notifier that only records messages in the service log.

use crate::notification::{
    domain::Notification,
    ports::{Notifier, NotifierResult},
};
use async_trait::async_trait;
use tracing::info;

/// Logs each notification instead of delivering it.
///
/// Used when no SMTP relay is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> NotifierResult<()> {
        let recipients = notification
            .recipients
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        info!(%recipients, subject = %notification.subject, "notification (not delivered)");
        Ok(())
    }
}
