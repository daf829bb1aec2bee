//! Session lifecycle shared by the browser console and the native CLI.
//!
//! This crate owns the access/refresh token pair, derives the signed-in
//! identity from the access token claims, and decides what protected routes
//! may render. It performs no I/O of its own: durable storage, the remote
//! auth service, the wall clock, and detached task spawning are injected
//! through the traits in [`store`] and [`backend`], so the same state machine
//! runs on `localStorage` + `gloo-net` in the browser and on a JSON file +
//! `reqwest` in the CLI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never mutate session state directly. They call
//! [`SessionManager::login`] / [`SessionManager::logout`] or read a
//! [`SessionSnapshot`]; [`guard`] projects a snapshot into a render decision.

pub mod backend;
pub mod claims;
pub mod guard;
pub mod manager;
pub mod store;
pub mod wire;

pub use backend::{AuthBackend, AuthError, Clock, Spawner, SystemClock};
pub use claims::{Claims, ClaimsError, Identity, Role, TokenStatus, decode_claims};
pub use guard::{GuardDecision, LOGIN_PATH, guard};
pub use manager::{SessionError, SessionManager, SessionPhase, SessionSnapshot};
pub use store::{ACCESS_TOKEN_KEY, MemoryStore, REFRESH_TOKEN_KEY, StorageError, TokenStore};
