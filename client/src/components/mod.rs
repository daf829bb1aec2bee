//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render console chrome and route gating while reading shared
//! session state from Leptos context.

pub mod navbar;
pub mod page_loader;
pub mod protected_route;
