//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::{GuardDecision, SessionSnapshot, guard};

/// Whether a settled session without a token should leave the current route.
pub fn should_redirect_unauth(state: &SessionSnapshot) -> bool {
    matches!(guard(state), GuardDecision::Redirect(_))
}

/// Replace the current route with the login surface whenever the session
/// settles without an access token.
pub fn install_unauth_redirect<F>(auth: RwSignal<SessionSnapshot>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(path) = guard(&auth.get()) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
