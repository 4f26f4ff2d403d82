//! SMTP notifier backed by `lettre`.

use crate::notification::{
    domain::Notification,
    ports::{Notifier, NotifierError, NotifierResult},
};
use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Connection settings for an SMTP relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    /// Relay host name.
    pub host: String,
    /// Relay port.
    pub port: u16,
    /// Optional login name.
    pub username: Option<String>,
    /// Optional login password.
    pub password: Option<String>,
    /// Sender mailbox, e.g. `Taskflow <taskflow@example.com>`.
    pub from: String,
}

/// Sends notifications through an SMTP relay using STARTTLS.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Builds a notifier for the configured relay.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::InvalidAddress`] for an unparsable sender and
    /// [`NotifierError::Transport`] when the relay cannot be configured.
    pub fn new(settings: &SmtpSettings) -> NotifierResult<Self> {
        let from = parse_mailbox(&settings.from)?;
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(NotifierError::transport)?
            .port(settings.port);
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

fn parse_mailbox(raw: &str) -> NotifierResult<Mailbox> {
    raw.parse::<Mailbox>()
        .map_err(|_| NotifierError::InvalidAddress(raw.to_owned()))
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notification: &Notification) -> NotifierResult<()> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN);
        for recipient in &notification.recipients {
            builder = builder.to(parse_mailbox(recipient.as_str())?);
        }
        let message = builder
            .body(notification.body.clone())
            .map_err(NotifierError::transport)?;
        self.transport
            .send(message)
            .await
            .map_err(NotifierError::transport)?;
        Ok(())
    }
}
