//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Permission tier assigned to every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "TEXT")] // Store as TEXT in SQLite
pub enum Role {
    #[default]
    Seller,
    Commercial,
    Accountant,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "Seller",
            Role::Commercial => "Commercial",
            Role::Accountant => "Accountant",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "Seller" => Ok(Role::Seller),
            "Commercial" => Ok(Role::Commercial),
            "Accountant" => Ok(Role::Accountant),
            "Admin" => Ok(Role::Admin),
            other => Err(format!("Role '{}' is not supported.", other)),
        }
    }
}

/// A user row as returned to the rest of the application.
///
/// The password hash is deliberately not part of this struct, so it can never
/// leak into a serialized response. Login verification goes through
/// [`UserWithPassword`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub nom: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user row including the stored password hash.
///
/// Only the login path is allowed to fetch this shape.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithPassword {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

/// Validated registration data, prior to password hashing.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1-255 characters"
    ))]
    pub nom: String,

    #[validate(
        email(message = "Please provide a valid email address."),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Password must contain at least 6 characters."))]
    pub password: String,

    pub role: Role,
}

/// Fully prepared user record handed to the repository for insertion.
#[derive(Debug, Clone)]
pub struct InsertUser {
    pub id: String,
    pub nom: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}
