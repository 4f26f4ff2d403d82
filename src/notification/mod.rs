//! Best-effort notifications sent after a task reaches `done`.
//!
//! Delivery runs after the transition has committed, on its own task, and is
//! never part of the transition's success criterion.

pub mod adapters;
pub mod dispatcher;
pub mod domain;
pub mod ports;

pub use dispatcher::NotificationDispatcher;
pub use domain::{Notification, TaskDoneNotice};
pub use ports::{Notifier, NotifierError, NotifierResult};

#[cfg(test)]
mod tests;
