//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secret and lifetime, and
//! cookie security flags.

use anyhow::{Context, Result, bail};
use std::env;
use std::time::Duration;

/// Well-known placeholder shipped in example env files. Starting with this
/// value (or no value at all) would leave every issued token forgeable.
const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_TO_A_LONG_RANDOM_SECRET";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in: Duration,
    pub server_port: u16,
    pub cookie_secure: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Fails when `JWT_SECRET` is unset, empty, or still the insecure
    /// placeholder; the caller is expected to abort startup in that case.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        if secret_is_insecure(&jwt_secret) {
            bail!(
                "JWT_SECRET is empty or still set to the placeholder value; \
                 refusing to start with a forgeable signing secret"
            );
        }

        let jwt_expires_in = humantime::parse_duration(
            &env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| "1d".to_string()),
        )
        .context("JWT_EXPIRES_IN must be a duration string like \"1h\" or \"1d\"")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let cookie_secure = env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .context("COOKIE_SECURE must be true or false")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in,
            server_port,
            cookie_secure,
        })
    }
}

fn secret_is_insecure(secret: &str) -> bool {
    secret.trim().is_empty() || secret == PLACEHOLDER_JWT_SECRET
}
