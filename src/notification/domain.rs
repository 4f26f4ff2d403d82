//! Outbound notification values and their templates.

use crate::identity::domain::{EmailAddress, GroupName, Username};
use crate::task::domain::TaskId;
use minijinja::{Environment, context};

const DONE_SUBJECT_TEMPLATE: &str = "Task {{ task_id }} Promoted to Done";
const DONE_BODY_TEMPLATE: &str =
    "The task with ID {{ task_id }} has been promoted to Done by {{ actor }}.";

/// A rendered message addressed to one or more recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Every recipient of the single message.
    pub recipients: Vec<EmailAddress>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Fact handed to the notification sink once a `done` transition commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDoneNotice {
    /// Task that reached `done`.
    pub task_id: TaskId,
    /// User who promoted it.
    pub actor: Username,
    /// The application's `permit_done` group, whose members are told.
    pub recipients_group: GroupName,
}

impl TaskDoneNotice {
    /// Renders the notice for `recipients`.
    ///
    /// # Errors
    ///
    /// Returns a [`minijinja::Error`] when a template fails to render.
    pub fn render(&self, recipients: Vec<EmailAddress>) -> Result<Notification, minijinja::Error> {
        let environment = Environment::new();
        let values = context! {
            task_id => self.task_id.as_str(),
            actor => self.actor.as_str(),
        };
        Ok(Notification {
            recipients,
            subject: environment.render_str(DONE_SUBJECT_TEMPLATE, &values)?,
            body: environment.render_str(DONE_BODY_TEMPLATE, &values)?,
        })
    }
}
