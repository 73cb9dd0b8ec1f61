//! Database repository for user management operations.
//!
//! Provides CRUD operations for system users.

use crate::database::models::{InsertUser, User, UserWithPassword};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, nom, email, role, active, created_at, updated_at";

/// Repository for user database operations.
///
/// Handles all persistence operations for the User entity. Email uniqueness
/// is guaranteed by the unique index on the `email` column, so concurrent
/// inserts with the same address resolve to exactly one winner.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// The password must already be hashed; this layer never sees plaintext.
    /// A unique-index violation on the email column is returned as-is so the
    /// service layer can map it to a duplicate error.
    pub async fn create_user(&self, user: InsertUser) -> Result<User> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, nom, email, password_hash, role, active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(user.nom)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role)
        .bind(true)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by their unique identifier.
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by their email address, without the password hash.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by email including the stored password hash.
    ///
    /// Reserved for credential verification during login.
    pub async fn get_user_by_email_with_password(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPassword>> {
        let user = sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Activates or deactivates a user.
    ///
    /// Deactivation is the only removal path: the row stays, but every
    /// subsequent authenticated request is refused by the middleware.
    ///
    /// # Returns
    /// `true` if a user row was updated, `false` if the id was unknown.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET active = ?, updated_at = ? WHERE id = ?")
            .bind(active)
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
