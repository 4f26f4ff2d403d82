//! Group-based authorization for task operations.
//!
//! Pure functions over an application's permit table and an authenticated
//! actor; callers fetch both before asking.

use crate::application::domain::Application;
use crate::identity::domain::AuthenticatedUser;
use crate::task::domain::TaskState;

/// Returns whether `actor` may create tasks in `application`.
#[must_use]
pub fn can_create(application: &Application, actor: &AuthenticatedUser) -> bool {
    actor.is_member_of(application.permit_create())
}

/// Returns whether `actor` may act on a task of `application` whose current
/// state is `state`.
///
/// Tasks in a state without a permitted group (`close`) admit nobody.
#[must_use]
pub fn can_act_on(application: &Application, state: TaskState, actor: &AuthenticatedUser) -> bool {
    application
        .permitted_group(state)
        .is_some_and(|group| actor.is_member_of(group))
}
