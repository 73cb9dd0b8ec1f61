//! Middleware for protecting authenticated routes and handling authorization.
//!
//! This module contains logic for validating session tokens and enforcing
//! role-based permissions across the API endpoints.

use crate::api::common::{HttpError, service_error_to_http};
use crate::config::Config;
use crate::database::models::{Role, User};
use crate::errors::ServiceError;
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;
use std::future::Future;
use std::pin::Pin;

pub const LOGIN_REQUIRED: &str = "Access denied. Please log in.";
pub const TOKEN_INVALID: &str = "Invalid or expired token. Please log in again.";
pub const USER_GONE: &str = "The user belonging to this token no longer exists.";
pub const ACCOUNT_DISABLED: &str = "Your account has been disabled.";
pub const INSUFFICIENT_PERMISSIONS: &str =
    "You do not have permission to perform this action.";

/// Name of the cookie mirroring the session token.
pub const JWT_COOKIE: &str = "jwt";

/// Authentication middleware for protected routes.
///
/// Accepts the token from the `Authorization: Bearer` header or, failing
/// that, the `jwt` cookie. On success the resolved [`User`] is inserted into
/// the request extensions for downstream handlers and role checks.
pub async fn protect(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    mut request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let token = bearer_token(request.headers())
        .or_else(|| cookie_token(request.headers()))
        .ok_or_else(|| service_error_to_http(ServiceError::authentication(LOGIN_REQUIRED)))?;

    let jwt_utils = JwtUtils::from_config(&config);
    let claims = jwt_utils.validate_token(&token).map_err(|error| {
        tracing::debug!("rejected session token: {}", error);
        service_error_to_http(ServiceError::authentication(TOKEN_INVALID))
    })?;

    let repo = UserRepository::new(&pool);
    let user = repo
        .get_user_by_id(&claims.sub)
        .await
        .map_err(|error| service_error_to_http(error.into()))?
        .ok_or_else(|| service_error_to_http(ServiceError::authentication(USER_GONE)))?;

    if !user.active {
        return Err(service_error_to_http(ServiceError::permission_denied(
            ACCOUNT_DISABLED,
        )));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Role authorization middleware factory.
///
/// Returns a middleware closed over the allowed role set. It reads the user
/// attached by [`protect`], so it must always be layered downstream of it.
pub fn authorize(
    allowed: &'static [Role],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, HttpError>> + Send>>
+ Clone {
    move |request: Request, next: Next| {
        Box::pin(async move {
            let user = request.extensions().get::<User>().ok_or_else(|| {
                service_error_to_http(ServiceError::authentication(LOGIN_REQUIRED))
            })?;

            if !allowed.contains(&user.role) {
                return Err(service_error_to_http(ServiceError::permission_denied(
                    INSUFFICIENT_PERMISSIONS,
                )));
            }

            Ok(next.run(request).await)
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie in cookie_header.split(';') {
        if let Some((name, value)) = cookie.trim().split_once('=') {
            if name == JWT_COOKIE && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_requires_the_scheme_prefix() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));

        let headers = headers_with(header::AUTHORIZATION, "Basic abc.def.ghi");
        assert_eq!(bearer_token(&headers), None);

        let headers = headers_with(header::AUTHORIZATION, "Bearer ");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn cookie_token_finds_the_jwt_cookie_among_others() {
        let headers = headers_with(header::COOKIE, "theme=dark; jwt=abc.def.ghi; lang=fr");
        assert_eq!(cookie_token(&headers), Some("abc.def.ghi".to_string()));

        let headers = headers_with(header::COOKIE, "theme=dark; lang=fr");
        assert_eq!(cookie_token(&headers), None);

        let headers = headers_with(header::COOKIE, "jwt=");
        assert_eq!(cookie_token(&headers), None);
    }
}
