//! Request/response bodies and paths of the IAM service.
//!
//! DESIGN
//! ======
//! Shared by the browser and CLI transports so both speak the exact same
//! camelCase JSON. Only the fields this console reads are modeled.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::claims::Role;

/// Origin the console talks to unless overridden.
pub const DEFAULT_API_ORIGIN: &str = "https://techgazzeta.org";

/// Paths relative to the API origin.
pub mod endpoints {
    pub const LOGIN: &str = "/iam/auth/login";
    pub const REGISTER: &str = "/iam/auth/register";
    pub const REFRESH: &str = "/iam/auth/refresh";
    pub const LOGOUT: &str = "/iam/auth/logout";
    pub const ME: &str = "/iam/me";
    pub const BUILDINGS: &str = "/buildings/";
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
}

/// Body of both the refresh and the logout calls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenBody<'a> {
    pub refresh_token: &'a str,
}

/// Successful login response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// `GET /iam/me` response; the user object is displayed as-is.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MeResponse {
    pub user: Map<String, Value>,
}

/// One entry of the building inventory.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `GET /buildings/` response. A missing list means no buildings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BuildingsResponse {
    #[serde(default)]
    pub buildings: Vec<Building>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Join `origin` and an endpoint path, tolerating a trailing slash on the origin.
#[must_use]
pub fn endpoint_url(origin: &str, path: &str) -> String {
    format!("{}{path}", origin.trim_end_matches('/'))
}

/// The `message` field of an error body, or `fallback` when absent or unparsable.
#[must_use]
pub fn failure_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}
