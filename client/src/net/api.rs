//! REST helpers for the page-level IAM calls.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>` so forms can show the server's `message`
//! field directly instead of panicking during hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::Role;
#[cfg(any(test, feature = "hydrate"))]
use session::wire::{endpoint_url, failure_message};

use super::types::{BuildingsResponse, MeResponse, TokenPair};

/// Origin of the IAM service, fixed at build time.
pub const API_ORIGIN: &str = match option_env!("BMS_API_ORIGIN") {
    Some(origin) => origin,
    None => session::wire::DEFAULT_API_ORIGIN,
};

#[cfg(any(test, feature = "hydrate"))]
fn api_url(path: &str) -> String {
    endpoint_url(API_ORIGIN, path)
}

#[cfg(any(test, feature = "hydrate"))]
fn login_failed_message(body: &str) -> String {
    failure_message(body, "Login failed")
}

#[cfg(any(test, feature = "hydrate"))]
fn register_failed_message(body: &str) -> String {
    failure_message(body, "Registration failed")
}

#[cfg(any(test, feature = "hydrate"))]
fn me_failed_message(status: u16) -> String {
    format!("profile request failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn buildings_failed_message(status: u16) -> String {
    format!("Failed to fetch buildings: {status}")
}

/// Exchange credentials for a token pair via `POST /iam/auth/login`.
///
/// # Errors
///
/// Returns the server's `message` (or "Login failed") on a non-OK status, or
/// the transport error text.
pub async fn login(email: &str, password: &str) -> Result<TokenPair, String> {
    #[cfg(feature = "hydrate")]
    {
        use session::wire::{LoginRequest, endpoints};

        let resp = gloo_net::http::Request::post(&api_url(endpoints::LOGIN))
            .json(&LoginRequest { email, password })
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let body = resp.text().await.unwrap_or_default();
            return Err(login_failed_message(&body));
        }
        resp.json::<TokenPair>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password);
        Err("not available on server".to_owned())
    }
}

/// Create an account via `POST /iam/auth/register`.
///
/// # Errors
///
/// Returns the server's `message` (or "Registration failed") on a non-OK
/// status, or the transport error text.
pub async fn register(email: &str, password: &str, role: Role) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use session::wire::{RegisterRequest, endpoints};

        let resp = gloo_net::http::Request::post(&api_url(endpoints::REGISTER))
            .json(&RegisterRequest { email, password, role })
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let body = resp.text().await.unwrap_or_default();
            return Err(register_failed_message(&body));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password, role);
        Err("not available on server".to_owned())
    }
}

/// Fetch the signed-in user from `GET /iam/me`.
///
/// # Errors
///
/// Returns an error string on transport failure or a non-OK status; callers
/// treat any error as "not signed in".
pub async fn fetch_me(access_token: &str) -> Result<MeResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&api_url(session::wire::endpoints::ME))
            .header("Authorization", &format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(me_failed_message(resp.status()));
        }
        resp.json::<MeResponse>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = access_token;
        Err("not available on server".to_owned())
    }
}

/// List the building inventory via `GET /buildings/`.
///
/// # Errors
///
/// Returns an error string on transport failure or a non-OK status.
pub async fn fetch_buildings(access_token: &str) -> Result<BuildingsResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&api_url(session::wire::endpoints::BUILDINGS))
            .header("Authorization", &format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(buildings_failed_message(resp.status()));
        }
        resp.json::<BuildingsResponse>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = access_token;
        Err("not available on server".to_owned())
    }
}
