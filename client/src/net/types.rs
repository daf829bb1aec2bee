//! Wire DTOs for the IAM service plus view helpers over them.
//!
//! The request/response bodies live in `session::wire` so the CLI uses the
//! exact same schema.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde_json::Value;

pub use session::wire::{Building, BuildingsResponse, MeResponse, TokenPair};

/// One labelled row of the profile card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileField {
    pub label: String,
    pub value: String,
}

/// Flatten a `/iam/me` user object into displayable rows, in key order.
///
/// Nested objects and arrays are shown as compact JSON; `null` as an empty
/// string.
pub fn profile_fields(me: &MeResponse) -> Vec<ProfileField> {
    me.user
        .iter()
        .map(|(key, value)| ProfileField {
            label: key.clone(),
            value: match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            },
        })
        .collect()
}

/// Buildings whose name or address contains `term`, ignoring case.
pub fn filter_buildings<'a>(buildings: &'a [Building], term: &str) -> Vec<&'a Building> {
    let needle = term.trim().to_lowercase();
    buildings
        .iter()
        .filter(|b| b.name.to_lowercase().contains(&needle) || b.address.to_lowercase().contains(&needle))
        .collect()
}
