//! Task lifecycle management.
//!
//! Tasks belong to an application, carry an identifier minted from that
//! application's running number, and move through
//! `open -> todo -> doing -> done`, with `close` reachable from every
//! non-terminal state. Each move is authorized against the group the
//! application permits for the task's current state, hands ownership to the
//! actor, and may append an audit note. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Adapters serving these ports live in [`crate::storage`].

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
