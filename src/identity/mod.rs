//! Users, group membership, and credential verification.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - The per-request credential check in [`services`]

pub mod domain;
pub mod ports;
pub mod services;
