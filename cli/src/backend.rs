//! `reqwest` transport for the IAM service.
//!
//! Every request is bounded by the configured timeout; an elapsed timer maps
//! to `AuthError::Timeout` so a hung refresh ends in logout.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::future::Future;
use std::time::Duration;

use futures::FutureExt as _;
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use session::wire::{
    LoginRequest, MeResponse, RefreshResponse, RefreshTokenBody, RegisterRequest, TokenPair, endpoint_url, endpoints,
    failure_message,
};
use session::{AuthBackend, AuthError, Role};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    origin: String,
    timeout: Duration,
}

impl ReqwestBackend {
    pub fn new(origin: &str, timeout: Duration) -> Self {
        Self { client: reqwest::Client::new(), origin: origin.trim_end_matches('/').to_owned(), timeout }
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.origin, path)
    }

    /// `POST /iam/auth/login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let request = self.client.post(self.url(endpoints::LOGIN)).json(&LoginRequest { email, password });
        bounded(self.timeout, send_json(request, "Login failed")).await
    }

    /// `POST /iam/auth/register`; the success body is ignored.
    pub async fn register(&self, email: &str, password: &str, role: Role) -> Result<(), AuthError> {
        let request = self
            .client
            .post(self.url(endpoints::REGISTER))
            .json(&RegisterRequest { email, password, role });
        bounded(self.timeout, send_unit(request, "Registration failed")).await
    }

    /// `GET /iam/me` with the bearer token.
    pub async fn me(&self, access_token: &str) -> Result<MeResponse, AuthError> {
        let request = self.client.get(self.url(endpoints::ME)).bearer_auth(access_token);
        bounded(self.timeout, send_json(request, "Profile request failed")).await
    }
}

impl AuthBackend for ReqwestBackend {
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let request = self
            .client
            .post(self.url(endpoints::REFRESH))
            .json(&RefreshTokenBody { refresh_token });
        let body: RefreshResponse = bounded(self.timeout, send_json(request, "Refresh failed")).await?;
        Ok(body.access_token)
    }

    fn revoke(&self, refresh_token: String) -> LocalBoxFuture<'static, Result<(), AuthError>> {
        let request = self
            .client
            .post(self.url(endpoints::LOGOUT))
            .json(&RefreshTokenBody { refresh_token: &refresh_token });
        bounded(self.timeout, send_unit(request, "Logout failed")).boxed_local()
    }
}

async fn bounded<T>(timeout: Duration, request: impl Future<Output = Result<T, AuthError>>) -> Result<T, AuthError> {
    tokio::time::timeout(timeout, request)
        .await
        .unwrap_or(Err(AuthError::Timeout(timeout)))
}

async fn send(request: reqwest::RequestBuilder, fallback: &str) -> Result<reqwest::Response, AuthError> {
    let response = request.send().await.map_err(|e| AuthError::Network(e.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AuthError::Rejected { status: status.as_u16(), message: failure_message(&body, fallback) })
}

async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder, fallback: &str) -> Result<T, AuthError> {
    send(request, fallback)
        .await?
        .json::<T>()
        .await
        .map_err(|e| AuthError::Decode(e.to_string()))
}

async fn send_unit(request: reqwest::RequestBuilder, fallback: &'static str) -> Result<(), AuthError> {
    send(request, fallback).await.map(drop)
}
