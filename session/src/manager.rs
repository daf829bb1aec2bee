//! Session Manager: token pair ownership, identity derivation, refresh, logout.
//!
//! ARCHITECTURE
//! ============
//! Every mutator (`start`, `login`, a successful refresh) calls
//! [`SessionManager::on_access_token_changed`] explicitly instead of relying
//! on change observation, so the decode step always runs to completion before
//! the mutator returns. Observers receive a [`SessionSnapshot`] after each
//! state change.
//!
//! CONCURRENCY
//! ===========
//! State lives behind a short-lived `std::sync::Mutex` that is never held
//! across an await. Refresh attempts are serialized by an async gate: a
//! caller that waited behind another refresh re-reads the current token
//! instead of spending the refresh token a second time.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::sync::{Mutex, PoisonError};

use futures::FutureExt as _;

use crate::backend::{AuthBackend, Clock, Spawner};
use crate::claims::{Identity, TokenStatus};
use crate::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, StorageError, TokenStore};

/// Error surfaced by [`SessionManager::login`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to persist session tokens: {0}")]
    Storage(#[from] StorageError),
}

/// Position in the session state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing has been read from storage yet.
    #[default]
    Uninitialized,
    /// Tokens are being restored, or a restored token has not been decoded yet.
    Restoring,
    Authenticated,
    Anonymous,
    /// An expired access token is being exchanged.
    Refreshing,
}

/// Point-in-time view of the session handed to pages and guards.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<Identity>,
    /// `true` until the initial restore from storage completes; never `true` again.
    pub is_loading: bool,
    pub phase: SessionPhase,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            access_token: None,
            refresh_token: None,
            user: None,
            is_loading: true,
            phase: SessionPhase::Uninitialized,
        }
    }
}

impl SessionSnapshot {
    /// Whether restore and any in-flight refresh have resolved.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.is_loading && matches!(self.phase, SessionPhase::Authenticated | SessionPhase::Anonymous)
    }

    /// `Authorization` header value for the held access token.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.access_token.as_deref().map(|token| format!("Bearer {token}"))
    }
}

type Observer = Box<dyn Fn(&SessionSnapshot) + Send + Sync>;

enum RefreshOutcome {
    /// Carries the access token this refresh installed.
    Refreshed(String),
    /// The session changed while waiting; the current token must be re-read.
    Superseded,
    LoggedOut,
}

/// Owner of the token pair and the derived identity.
pub struct SessionManager<S, A, C, P> {
    store: S,
    backend: A,
    clock: C,
    spawner: P,
    state: Mutex<SessionSnapshot>,
    refresh_gate: futures::lock::Mutex<()>,
    observer: Option<Observer>,
}

impl<S, A, C, P> SessionManager<S, A, C, P>
where
    S: TokenStore,
    A: AuthBackend,
    C: Clock,
    P: Spawner,
{
    pub fn new(store: S, backend: A, clock: C, spawner: P) -> Self {
        Self {
            store,
            backend,
            clock,
            spawner,
            state: Mutex::new(SessionSnapshot::default()),
            refresh_gate: futures::lock::Mutex::new(()),
            observer: None,
        }
    }

    /// Register a callback fired with a fresh snapshot after every change.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&SessionSnapshot) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Where detached work such as the revoke call is handed off.
    pub fn spawner(&self) -> &P {
        &self.spawner
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock_state().clone()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.lock_state().access_token.clone()
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.lock_state().refresh_token.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<Identity> {
        self.lock_state().user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.lock_state().phase
    }

    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.lock_state().bearer()
    }

    /// Restore the token pair from durable storage.
    ///
    /// Makes no network call. A storage read failure leaves the session
    /// anonymous. Only the first call has any effect.
    pub fn restore(&self) {
        if !self.is_loading() {
            log::warn!("session restore requested after initialization; ignoring");
            return;
        }
        self.update(|s| s.phase = SessionPhase::Restoring);

        let (access_token, refresh_token) = match self.read_stored() {
            Ok(pair) => pair,
            Err(err) => {
                log::error!("session restore failed, starting anonymous: {err}");
                (None, None)
            }
        };
        log::debug!(
            "session restored (access token: {}, refresh token: {})",
            access_token.is_some(),
            refresh_token.is_some()
        );

        self.update(|s| {
            s.phase = if access_token.is_some() { SessionPhase::Restoring } else { SessionPhase::Anonymous };
            s.access_token = access_token;
            s.refresh_token = refresh_token;
            s.user = None;
            s.is_loading = false;
        });
    }

    /// Restore from storage, then derive identity from the restored token.
    pub async fn start(&self) {
        self.restore();
        self.on_access_token_changed().await;
    }

    /// Adopt a freshly issued token pair.
    ///
    /// The tokens are not validated here; the decode step that follows
    /// decides whether they yield a user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the pair could not be persisted.
    /// The in-memory session is updated either way.
    pub async fn login(&self, access_token: String, refresh_token: String) -> Result<(), SessionError> {
        self.update(|s| {
            s.access_token = Some(access_token.clone()).filter(|t| !t.is_empty());
            s.refresh_token = Some(refresh_token.clone()).filter(|t| !t.is_empty());
            s.user = None;
        });
        let persisted = self
            .store
            .set(ACCESS_TOKEN_KEY, &access_token)
            .and_then(|()| self.store.set(REFRESH_TOKEN_KEY, &refresh_token));
        if let Err(err) = &persisted {
            log::error!("failed to persist session tokens: {err}");
        }

        self.on_access_token_changed().await;
        persisted.map_err(SessionError::from)
    }

    /// Clear the session locally and ask the service to revoke the refresh token.
    ///
    /// Local clearing is unconditional. The revoke call runs as a detached
    /// task and its outcome is discarded.
    pub fn logout(&self) {
        let mut revoked = None;
        self.update(|s| {
            revoked = s.refresh_token.take();
            s.access_token = None;
            s.user = None;
            s.phase = SessionPhase::Anonymous;
        });
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(err) = self.store.remove(key) {
                log::warn!("failed to clear {key} from storage: {err}");
            }
        }

        if let Some(refresh_token) = revoked {
            let revoke = self.backend.revoke(refresh_token);
            self.spawner.spawn_detached(
                async move {
                    if let Err(err) = revoke.await {
                        log::debug!("refresh token revoke failed (ignored): {err}");
                    }
                }
                .boxed_local(),
            );
        }
    }

    /// Decode the current access token and settle the session.
    ///
    /// No token → anonymous. Malformed → logout. Expired → refresh, then
    /// decode the replacement once more; a replacement this reaction
    /// installed that is itself expired ends in logout rather than another
    /// refresh. Tokens installed by someone else (a login during the call)
    /// are evaluated from scratch.
    pub async fn on_access_token_changed(&self) {
        let mut installed: Option<String> = None;
        loop {
            let Some(token) = self.access_token() else {
                self.update(|s| {
                    s.user = None;
                    s.phase = SessionPhase::Anonymous;
                });
                return;
            };

            match TokenStatus::evaluate(&token, self.clock.now_secs()) {
                TokenStatus::Valid(identity) => {
                    self.update(|s| {
                        s.user = Some(identity);
                        s.phase = SessionPhase::Authenticated;
                    });
                    return;
                }
                TokenStatus::Malformed(err) => {
                    log::warn!("access token rejected, logging out: {err}");
                    self.logout();
                    return;
                }
                TokenStatus::Expired if installed.as_deref() == Some(token.as_str()) => {
                    log::warn!("access token still expired after refresh, logging out");
                    self.logout();
                    return;
                }
                TokenStatus::Expired => match self.refresh_expired(&token).await {
                    RefreshOutcome::LoggedOut => return,
                    RefreshOutcome::Refreshed(access_token) => installed = Some(access_token),
                    RefreshOutcome::Superseded => installed = None,
                },
            }
        }
    }

    /// Access token that is valid right now, refreshing first if needed.
    pub async fn valid_access_token(&self) -> Option<String> {
        self.on_access_token_changed().await;
        self.access_token()
    }

    async fn refresh_expired(&self, expired: &str) -> RefreshOutcome {
        let _gate = self.refresh_gate.lock().await;
        if self.access_token().as_deref() != Some(expired) {
            return RefreshOutcome::Superseded;
        }
        let Some(refresh_token) = self.refresh_token() else {
            log::info!("access token expired and no refresh token is held, logging out");
            self.logout();
            return RefreshOutcome::LoggedOut;
        };

        self.update(|s| {
            s.user = None;
            s.phase = SessionPhase::Refreshing;
        });
        let result = self.backend.refresh(&refresh_token).await;

        // A logout or login during the call owns the session now.
        let current = self.snapshot();
        if current.refresh_token.as_deref() != Some(refresh_token.as_str())
            || current.access_token.as_deref() != Some(expired)
        {
            log::debug!("session changed during refresh; discarding refresh result");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(access_token) if !access_token.is_empty() => {
                self.update(|s| s.access_token = Some(access_token.clone()));
                if let Err(err) = self.store.set(ACCESS_TOKEN_KEY, &access_token) {
                    log::error!("failed to persist refreshed access token, logging out: {err}");
                    self.logout();
                    return RefreshOutcome::LoggedOut;
                }
                log::debug!("access token refreshed");
                RefreshOutcome::Refreshed(access_token)
            }
            Ok(_) => {
                log::warn!("refresh returned an empty access token, logging out");
                self.logout();
                RefreshOutcome::LoggedOut
            }
            Err(err) => {
                log::warn!("token refresh failed, logging out: {err}");
                self.logout();
                RefreshOutcome::LoggedOut
            }
        }
    }

    fn read_stored(&self) -> Result<(Option<String>, Option<String>), StorageError> {
        let access_token = self.store.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty());
        let refresh_token = self.store.get(REFRESH_TOKEN_KEY)?.filter(|t| !t.is_empty());
        Ok((access_token, refresh_token))
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, mutate: impl FnOnce(&mut SessionSnapshot)) {
        let snapshot = {
            let mut state = self.lock_state();
            mutate(&mut state);
            state.clone()
        };
        if let Some(observer) = &self.observer {
            observer(&snapshot);
        }
    }
}
