//! Data structures for authentication-related entities.
//!
//! This module defines request payloads and response envelopes for the
//! authentication flow. The response shapes are part of the wire contract
//! consumed by the web client.

use crate::database::models::User;
use serde::{Deserialize, Serialize};

/// Registration request payload.
///
/// Fields are optional so that missing ones produce the documented 400
/// response instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub nom: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Login request payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `data` envelope wrapping the user in auth responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: User,
}

/// Response for successful register and login requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: String,
    pub token: String,
    pub data: UserData,
}

impl AuthResponse {
    pub fn new(token: String, user: User) -> Self {
        Self {
            status: "success".to_string(),
            token,
            data: UserData { user },
        }
    }
}

/// Response for `GET /me`: the authenticated user, no token echo.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub status: String,
    pub data: UserData,
}

impl CurrentUserResponse {
    pub fn new(user: User) -> Self {
        Self {
            status: "success".to_string(),
            data: UserData { user },
        }
    }
}
