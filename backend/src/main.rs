//! Main entry point for the GestionPro backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and registers all API routes and middleware. Startup is
//! refused outright when the configuration is unusable, most importantly
//! when the token signing secret is missing or still a placeholder.

use backend::config::Config;
use backend::database::Database;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    let db = match Database::new(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Database setup failed: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = backend::build_router(db.pool().clone(), config.clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting GestionPro server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}
