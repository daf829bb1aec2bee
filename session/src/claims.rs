//! Access-token claim decoding.
//!
//! Tokens are treated as opaque bearer strings: the signature is never
//! checked here, only the base64url payload segment is decoded so the
//! console can learn the expiry, user id, role, and building scope.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Error returned by [`decode_claims`].
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    /// The token has no payload segment.
    #[error("token has no payload segment")]
    Shape,
    /// The payload segment is not base64url.
    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The payload is not a claims object (missing `exp`/`id`, unknown role, ...).
    #[error("token payload is not a valid claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Platform role carried in the access token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Manager,
    BuildingAdmin,
    Resident,
    Provider,
}

impl Role {
    /// Every role, in the order the register form lists them.
    pub const ALL: [Role; 5] = [
        Role::Resident,
        Role::BuildingAdmin,
        Role::Manager,
        Role::Provider,
        Role::SuperAdmin,
    ];

    /// Wire name, as it appears in claims and request bodies.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Manager => "manager",
            Self::BuildingAdmin => "building_admin",
            Self::Resident => "resident",
            Self::Provider => "provider",
        }
    }

    /// Human-readable label for forms.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Manager => "Manager",
            Self::BuildingAdmin => "Building Admin",
            Self::Resident => "Resident",
            Self::Provider => "Provider",
        }
    }

    /// Whether the role may see the building inventory.
    #[must_use]
    pub fn can_manage_buildings(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}

/// Decoded access-token payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Expiry in seconds since the Unix epoch.
    pub exp: f64,
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub building_id: Option<String>,
}

impl Claims {
    #[must_use]
    pub fn is_expired(&self, now_secs: f64) -> bool {
        self.exp < now_secs
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            role: self.role,
            building_id: self.building_id.clone(),
        }
    }
}

/// The signed-in user as derived from a valid access token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub role: Role,
    pub building_id: Option<String>,
}

/// Decode the claims of a JWT-shaped token without verifying its signature.
///
/// Accepts both the base64url and the standard alphabet, with or without
/// padding, in the payload segment.
///
/// # Errors
///
/// Returns [`ClaimsError`] when the token has no payload segment, the payload
/// is not base64, or it does not deserialize into [`Claims`].
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(ClaimsError::Shape)?;
    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(normalized)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Outcome of inspecting an access token at a point in time.
#[derive(Debug)]
pub enum TokenStatus {
    Valid(Identity),
    Expired,
    Malformed(ClaimsError),
}

impl TokenStatus {
    #[must_use]
    pub fn evaluate(token: &str, now_secs: f64) -> Self {
        match decode_claims(token) {
            Ok(claims) if claims.is_expired(now_secs) => Self::Expired,
            Ok(claims) => Self::Valid(claims.identity()),
            Err(err) => Self::Malformed(err),
        }
    }
}
