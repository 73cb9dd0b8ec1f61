//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for user authentication
//! (registration, login, current-user lookup), parse request data, and
//! interact with the `auth::service` for core business logic.

use crate::api::common::{HttpError, service_error_to_http};
use crate::auth::models::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database::models::User;
use crate::errors::ServiceError;
use axum::{
    extract::{Extension, Json, Path},
    http::{HeaderName, StatusCode, header},
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

const NOT_IMPLEMENTED: &str = "This feature is not yet implemented.";

type TokenBearingResponse = (
    StatusCode,
    [(HeaderName, String); 1],
    ResponseJson<AuthResponse>,
);

/// Handle user registration
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<TokenBearingResponse, HttpError> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.register(payload).await {
        Ok((token, user)) => Ok(token_bearing_response(
            StatusCode::CREATED,
            token,
            user,
            &config,
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<TokenBearingResponse, HttpError> {
    let auth_service = AuthService::new(&pool, &config);

    match auth_service.login(payload).await {
        Ok((token, user)) => Ok(token_bearing_response(StatusCode::OK, token, user, &config)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current user information.
///
/// The `protect` middleware has already resolved and attached the user; this
/// handler only echoes it back.
#[axum::debug_handler]
pub async fn me(
    Extension(user): Extension<User>,
) -> Result<ResponseJson<CurrentUserResponse>, HttpError> {
    Ok(ResponseJson(CurrentUserResponse::new(user)))
}

/// Start a password reset. Declared for the client, not yet built.
#[axum::debug_handler]
pub async fn forgot_password() -> HttpError {
    service_error_to_http(ServiceError::not_implemented(NOT_IMPLEMENTED))
}

/// Complete a password reset with an emailed token. Declared for the client,
/// not yet built.
#[axum::debug_handler]
pub async fn reset_password(Path(_token): Path<String>) -> HttpError {
    service_error_to_http(ServiceError::not_implemented(NOT_IMPLEMENTED))
}

fn token_bearing_response(
    status: StatusCode,
    token: String,
    user: User,
    config: &Config,
) -> TokenBearingResponse {
    let cookie = build_jwt_cookie(&token, config);
    (
        status,
        [(header::SET_COOKIE, cookie)],
        ResponseJson(AuthResponse::new(token, user)),
    )
}

/// Mirror the session token into an http-only cookie, scoped to the token's
/// own lifetime.
fn build_jwt_cookie(token: &str, config: &Config) -> String {
    let mut cookie = format!(
        "jwt={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        token,
        config.jwt_expires_in.as_secs()
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}
