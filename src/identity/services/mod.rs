//! Identity services.

mod authenticator;

pub use authenticator::{AuthenticationError, Authenticator};
