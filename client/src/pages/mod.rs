//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pages that need a signed-in user are wrapped in
//! `ProtectedRoute` by the router rather than checking the session themselves.

pub mod buildings;
pub mod home;
pub mod login;
pub mod not_found;
pub mod register;
