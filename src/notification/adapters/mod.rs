//! Notifier adapters.

pub mod logging;
pub mod memory;
pub mod smtp;

pub use logging::LogNotifier;
pub use memory::RecordingNotifier;
pub use smtp::{SmtpNotifier, SmtpSettings};
