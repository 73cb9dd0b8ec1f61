//! Error handling utilities for API responses.
//!
//! Provides structured error responses and conversion between service-layer
//! errors and HTTP responses.
//!
//! # Response Format
//! Every non-2xx response is a JSON body with two fields:
//! - `status`: `"fail"` for client errors, `"error"` for server-side ones
//! - `message`: a human-readable message safe to show to end users
//!
//! # Error Handling Flow
//! 1. Service layer returns a domain-specific `ServiceError`
//! 2. `service_error_to_http` converts it to a status code and JSON body
//! 3. Internal/database details are logged and replaced by a generic message

use crate::errors::ServiceError;
use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Body used for every error response, and for simple status messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    /// `"success"`, `"fail"` (4xx) or `"error"` (5xx and 501)
    pub status: String,
    /// Human-readable message
    pub message: String,
}

impl ApiMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: "fail".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// The error half of every handler's return type.
pub type HttpError = (StatusCode, Json<ApiMessage>);

/// Converts a ServiceError to the appropriate HTTP response.
///
/// Authentication and authorization messages are passed through untouched;
/// they are already written so that they never reveal which specific check
/// failed. Unexpected errors are logged and collapsed into a generic 500.
pub fn service_error_to_http(error: ServiceError) -> HttpError {
    match error {
        ServiceError::Validation { message } => {
            (StatusCode::BAD_REQUEST, Json(ApiMessage::fail(message)))
        }
        ServiceError::Duplicate { message } => {
            (StatusCode::CONFLICT, Json(ApiMessage::fail(message)))
        }
        ServiceError::Authentication { message } => {
            (StatusCode::UNAUTHORIZED, Json(ApiMessage::fail(message)))
        }
        ServiceError::PermissionDenied { message } => {
            (StatusCode::FORBIDDEN, Json(ApiMessage::fail(message)))
        }
        ServiceError::NotImplemented { message } => (
            StatusCode::NOT_IMPLEMENTED,
            Json(ApiMessage::error(message)),
        ),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage::error("An internal error occurred.")),
            )
        }
        ServiceError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage::error("An internal error occurred.")),
            )
        }
    }
}
