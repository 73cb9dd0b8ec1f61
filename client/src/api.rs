//! HTTP client for the backend authentication endpoints.
//!
//! The [`AuthApi`] trait exists so the session manager can be driven by a
//! stub in tests; [`HttpAuthClient`] is the real implementation used by the
//! application shell.

use crate::models::{
    AuthResponseBody, AuthSuccess, CurrentUserBody, ErrorBody, LoginRequest, RegisterRequest,
    SessionUser,
};
use async_trait::async_trait;
use thiserror::Error;

/// A failed API call, carrying the server's own message when one was
/// returned. The message is displayed to the user verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub(crate) fn transport(error: reqwest::Error) -> Self {
        Self {
            status: None,
            message: error.to_string(),
        }
    }

    /// True when the server refused the session token. Any such response,
    /// from any call site, invalidates the whole client session.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

/// The three auth calls the session manager depends on.
#[async_trait]
pub trait AuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthSuccess, ApiError>;
    async fn login(&self, request: &LoginRequest) -> Result<AuthSuccess, ApiError>;
    async fn me(&self, token: &str) -> Result<SessionUser, ApiError>;
}

/// `reqwest`-backed implementation of [`AuthApi`].
pub struct HttpAuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn into_api_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError {
                status: Some(status),
                message: body.message,
            },
            Err(_) => ApiError {
                status: Some(status),
                message: format!("Request failed with status {}", status),
            },
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthClient {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthSuccess, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/auth/register", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if !response.status().is_success() {
            return Err(Self::into_api_error(response).await);
        }

        let body: AuthResponseBody = response.json().await.map_err(ApiError::transport)?;
        Ok(AuthSuccess {
            token: body.token,
            user: body.data.user,
        })
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthSuccess, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if !response.status().is_success() {
            return Err(Self::into_api_error(response).await);
        }

        let body: AuthResponseBody = response.json().await.map_err(ApiError::transport)?;
        Ok(AuthSuccess {
            token: body.token,
            user: body.data.user,
        })
    }

    async fn me(&self, token: &str) -> Result<SessionUser, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/auth/me", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::transport)?;

        if !response.status().is_success() {
            return Err(Self::into_api_error(response).await);
        }

        let body: CurrentUserBody = response.json().await.map_err(ApiError::transport)?;
        Ok(body.data.user)
    }
}
