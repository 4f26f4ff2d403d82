//! Application registry and plan catalog.
//!
//! An application owns its tasks, its plans, the group permitted to act in
//! each lifecycle state, and the running number that mints task identifiers.
//! The running number is only ever advanced inside a workflow transaction
//! (see [`crate::task::ports::WorkflowTransaction`]); this module exposes the
//! values and the read-only lookups.

pub mod domain;
pub mod ports;
