//! Port contract for the outbound mail transport.

use super::domain::Notification;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Delivers one message to a list of recipients.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `notification` as a single message.
    async fn send(&self, notification: &Notification) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// A sender or recipient address could not be parsed.
    #[error("invalid mail address '{0}'")]
    InvalidAddress(String),

    /// The transport rejected or failed to deliver the message.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
