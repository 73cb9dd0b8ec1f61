//! GestionPro backend library.
//!
//! Exposes the application modules and the router assembly so that both the
//! server binary and the integration tests can build the same HTTP surface.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::api::common::ApiMessage;
use axum::{
    Extension, Router,
    extract::Request,
    http::StatusCode,
    response::Json,
    routing::get,
};
use config::Config;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Assembles the full application router over a connected pool and loaded
/// configuration.
pub fn build_router(pool: SqlitePool, config: Config) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .nest("/api/auth", auth::routes::auth_router())
        .fallback(not_found_handler)
        .layer(Extension(pool))
        .layer(Extension(config))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn status_handler() -> Json<ApiMessage> {
    Json(ApiMessage::success("API online and operational."))
}

async fn not_found_handler(request: Request) -> (StatusCode, Json<ApiMessage>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiMessage::fail(format!(
            "Route not found: {}",
            request.uri().path()
        ))),
    )
}
