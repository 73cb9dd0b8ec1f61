//! Client-side session management for the GestionPro web application.
//!
//! This crate is the application shell's single source of truth for
//! authentication state: it persists the session token across restarts,
//! talks to the backend's auth endpoints, and decides what the router may
//! render at any point in time.

pub mod api;
pub mod guard;
pub mod models;
pub mod session;
pub mod storage;

pub use api::{ApiError, AuthApi, HttpAuthClient};
pub use guard::RouteDecision;
pub use session::{SessionManager, SessionState};
pub use storage::{FileTokenStore, InMemoryTokenStore, TokenStore};
