//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The session is the only cross-page state; pages keep their own form and
//! fetch state in local signals.

pub mod auth;
