//! Unit tests for the task lifecycle module.

mod state_transition_tests;
mod support;
