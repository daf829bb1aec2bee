//! Browser transport for the session lifecycle's own IAM calls.
//!
//! TRADE-OFFS
//! ==========
//! Refresh and revoke race a `gloo-timers` sleep so a hung request resolves
//! to `AuthError::Timeout` (and therefore a logout) instead of leaving the
//! console in the refreshing state forever.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "auth_backend_test.rs"]
mod auth_backend_test;

use std::time::Duration;

use futures::future::LocalBoxFuture;
use session::wire::{endpoint_url, endpoints};
use session::{AuthBackend, AuthError};

/// Upper bound on a refresh or revoke round trip.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// [`AuthBackend`] over `fetch`.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    origin: String,
    timeout: Duration,
}

impl HttpAuthBackend {
    pub fn new(origin: &str) -> Self {
        Self { origin: origin.trim_end_matches('/').to_owned(), timeout: DEFAULT_AUTH_TIMEOUT }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl AuthBackend for HttpAuthBackend {
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let url = endpoint_url(&self.origin, endpoints::REFRESH);
            with_timeout(self.timeout, post_refresh(url, refresh_token)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = refresh_token;
            Err(AuthError::Network("not available on server".to_owned()))
        }
    }

    fn revoke(&self, refresh_token: String) -> LocalBoxFuture<'static, Result<(), AuthError>> {
        let url = endpoint_url(&self.origin, endpoints::LOGOUT);
        let timeout = self.timeout;
        Box::pin(async move {
            #[cfg(feature = "hydrate")]
            {
                with_timeout(timeout, post_revoke(url, refresh_token)).await
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (url, timeout, refresh_token);
                Err(AuthError::Network("not available on server".to_owned()))
            }
        })
    }
}

#[cfg(feature = "hydrate")]
async fn with_timeout<T>(
    timeout: Duration,
    request: impl Future<Output = Result<T, AuthError>>,
) -> Result<T, AuthError> {
    use futures::future::{Either, select};

    let request = std::pin::pin!(request);
    let timer = std::pin::pin!(gloo_timers::future::sleep(timeout));
    match select(request, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(AuthError::Timeout(timeout)),
    }
}

#[cfg(feature = "hydrate")]
async fn post_refresh(url: String, refresh_token: &str) -> Result<String, AuthError> {
    use session::wire::{RefreshResponse, RefreshTokenBody};

    let resp = gloo_net::http::Request::post(&url)
        .json(&RefreshTokenBody { refresh_token })
        .map_err(|e| AuthError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::Rejected { status, message: session::wire::failure_message(&body, "Refresh failed") });
    }
    let body: RefreshResponse = resp.json().await.map_err(|e| AuthError::Decode(e.to_string()))?;
    Ok(body.access_token)
}

#[cfg(feature = "hydrate")]
async fn post_revoke(url: String, refresh_token: String) -> Result<(), AuthError> {
    use session::wire::RefreshTokenBody;

    let resp = gloo_net::http::Request::post(&url)
        .json(&RefreshTokenBody { refresh_token: &refresh_token })
        .map_err(|e| AuthError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(AuthError::Rejected { status: resp.status(), message: "Logout failed".to_owned() });
    }
    Ok(())
}
