//! Route Guard: projects a session snapshot into a render decision.
//!
//! The guard is stateless and makes no network calls; the UI layer turns
//! the decision into a placeholder, a navigation, or the wrapped content.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::manager::SessionSnapshot;

/// Path of the login surface that anonymous viewers are sent to.
pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not settled yet; render a neutral placeholder.
    Pending,
    /// Settled without a token; navigate away and render nothing.
    Redirect(&'static str),
    Render,
}

/// Decide what a protected route may show for `session`.
#[must_use]
pub fn guard(session: &SessionSnapshot) -> GuardDecision {
    if !session.is_settled() {
        GuardDecision::Pending
    } else if session.access_token.is_none() {
        GuardDecision::Redirect(LOGIN_PATH)
    } else {
        GuardDecision::Render
    }
}
