//! Remote auth service, clock, and task-spawning seams.
//!
//! ERROR HANDLING
//! ==============
//! Backends report every refresh failure as an [`AuthError`]; the session
//! manager collapses all of them into a logout, so the variants exist for
//! logging and for callers (login/register forms) that surface messages.

use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::future::LocalBoxFuture;

/// Failure talking to the auth service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The service answered with a non-success status.
    #[error("auth service returned {status}: {message}")]
    Rejected { status: u16, message: String },
    /// The request never produced a response.
    #[error("auth service unreachable: {0}")]
    Network(String),
    /// No response within the configured timeout.
    #[error("auth service did not answer within {0:?}")]
    Timeout(Duration),
    /// The response body did not have the expected shape.
    #[error("unexpected auth service response: {0}")]
    Decode(String),
}

impl AuthError {
    /// Message suitable for showing next to a form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// The two auth-service calls the session lifecycle makes on its own.
pub trait AuthBackend {
    /// Exchange `refresh_token` for a new access token (`POST /iam/auth/refresh`).
    fn refresh(&self, refresh_token: &str) -> impl Future<Output = Result<String, AuthError>>;

    /// Ask the service to invalidate `refresh_token` (`POST /iam/auth/logout`).
    ///
    /// The returned future owns everything it needs so it can be detached.
    fn revoke(&self, refresh_token: String) -> LocalBoxFuture<'static, Result<(), AuthError>>;
}

/// Wall-clock source used for expiry checks.
pub trait Clock {
    /// Seconds since the Unix epoch, with sub-second precision.
    fn now_secs(&self) -> f64;
}

/// [`Clock`] backed by `std::time::SystemTime`. Not usable on `wasm32-unknown-unknown`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |elapsed| elapsed.as_secs_f64())
    }
}

/// Runs fire-and-forget work whose result nobody waits on.
pub trait Spawner {
    fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>);
}
