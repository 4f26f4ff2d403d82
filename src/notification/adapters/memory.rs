//! In-memory notifier for tests.

use crate::notification::{
    domain::Notification,
    ports::{Notifier, NotifierError, NotifierResult},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe notifier that keeps every message it is given.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .read()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> NotifierResult<()> {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| NotifierError::transport(std::io::Error::other(err.to_string())))?;
        sent.push(notification.clone());
        Ok(())
    }
}
