//! Request payloads and wire shapes shared with the backend's auth API.

use serde::{Deserialize, Serialize};

/// The authenticated user as the client sees it.
///
/// The backend never serializes password material, so there is nothing
/// sensitive here; the struct is safe to keep in memory for the lifetime of
/// the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub nom: String,
    pub email: String,
    pub role: String,
    pub active: bool,
}

/// Payload for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub nom: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Payload for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A successful register or login: the issued token plus the user it names.
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    pub token: String,
    pub user: SessionUser,
}

// Wire envelopes. The backend wraps the user in a `data` object and reports
// failures as `{status, message}`.

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: SessionUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponseBody {
    pub token: String,
    pub data: UserEnvelope,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentUserBody {
    pub data: UserEnvelope,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
