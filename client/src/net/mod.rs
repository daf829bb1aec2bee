//! Networking modules for the external IAM service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the page-level REST calls, `auth_backend` implements the
//! session lifecycle's refresh/revoke calls, and `types` re-exports the
//! shared wire schema.

pub mod api;
pub mod auth_backend;
pub mod types;
