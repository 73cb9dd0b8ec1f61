//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user registration, login, current-user lookup, and
//! the declared-but-stubbed password-reset endpoints. They are designed to
//! be nested into the main Axum router under `/api/auth`.

use crate::auth::handlers::*;
use crate::auth::middleware::protect;
use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me).layer(middleware::from_fn(protect)))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/{token}", patch(reset_password))
}
