//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`AuthHandle`] is provided once by the root component. Route guards and
//! user-aware components read the mirrored [`SessionSnapshot`] signal; only
//! the login form and logout buttons go through the handle's mutators.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::{Role, SessionManager, SessionSnapshot};

use crate::net::api::API_ORIGIN;
use crate::net::auth_backend::HttpAuthBackend;
use crate::util::browser::{BrowserClock, LocalSpawner};
use crate::util::storage::LocalStorageStore;

/// Session manager wired to the browser implementations.
pub type ConsoleSession = SessionManager<LocalStorageStore, HttpAuthBackend, BrowserClock, LocalSpawner>;

/// Cloneable handle to the page-wide session.
#[derive(Clone)]
pub struct AuthHandle {
    /// Reactive mirror of the manager state, updated after every change.
    pub state: RwSignal<SessionSnapshot>,
    manager: Arc<ConsoleSession>,
}

impl Default for AuthHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthHandle {
    pub fn new() -> Self {
        let state = RwSignal::new(SessionSnapshot::default());
        let manager = SessionManager::new(
            LocalStorageStore,
            HttpAuthBackend::new(API_ORIGIN),
            BrowserClock,
            LocalSpawner,
        )
        .with_observer(move |snapshot| state.set(snapshot.clone()));
        Self { state, manager: Arc::new(manager) }
    }

    /// Restore tokens from `localStorage` and settle the session.
    ///
    /// Runs only in the browser; server renders stay in the loading state so
    /// hydration starts from the same markup.
    pub fn start(&self) {
        #[cfg(feature = "hydrate")]
        {
            let manager = Arc::clone(&self.manager);
            leptos::task::spawn_local(async move { manager.start().await });
        }
    }

    /// Adopt a token pair returned by the login endpoint.
    ///
    /// # Errors
    ///
    /// Returns a message when the tokens could not be persisted.
    pub async fn login(&self, access_token: String, refresh_token: String) -> Result<(), String> {
        self.manager
            .login(access_token, refresh_token)
            .await
            .map_err(|e| e.to_string())
    }

    pub fn logout(&self) {
        self.manager.logout();
    }

    /// Access token to attach to an authenticated request, refreshed if expired.
    pub async fn valid_access_token(&self) -> Option<String> {
        self.manager.valid_access_token().await
    }
}

/// Role of the signed-in user, if any.
pub fn current_role(state: &SessionSnapshot) -> Option<Role> {
    state.user.as_ref().map(|user| user.role)
}
