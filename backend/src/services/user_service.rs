//! User business logic service.
//!
//! Handles user creation and credential verification.

use crate::database::models::{CreateUser, InsertUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

/// Message returned for any credential mismatch. Shared between the
/// unknown-email and wrong-password paths so a caller cannot tell which
/// check failed.
pub const INCORRECT_CREDENTIALS: &str = "Incorrect email or password.";

pub const DUPLICATE_EMAIL: &str = "This email address is already in use.";

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user with full validation.
    ///
    /// The email is trimmed and lowercased before it is stored, so lookups
    /// are case-insensitive by construction. The password is hashed off the
    /// async runtime immediately before the insert; plaintext never reaches
    /// the repository.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures (name, email shape, password length)
    /// - Duplicate email addresses, including those lost to a concurrent
    ///   registration race
    pub async fn create_user(&self, mut create_user: CreateUser) -> ServiceResult<User> {
        create_user.nom = create_user.nom.trim().to_string();
        create_user.email = normalize_email(&create_user.email);

        // Input validation using validator crate
        if let Err(validation_errors) = create_user.validate() {
            let error_messages: Vec<String> = validation_errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error.message.as_ref().unwrap_or(&"Invalid value".into())
                        )
                    })
                })
                .collect();
            return Err(ServiceError::validation(error_messages.join(", ")));
        }

        let password_hash = Self::hash_password(&create_user.password).await?;

        let data = InsertUser {
            id: Uuid::now_v7().to_string(),
            nom: create_user.nom,
            email: create_user.email,
            password_hash,
            role: create_user.role,
        };

        let repo = UserRepository::new(self.pool);
        match repo.create_user(data).await {
            Ok(user) => Ok(user),
            // The unique index is the arbiter for concurrent registrations
            // with the same email; no application-level pre-check.
            Err(error) if is_unique_violation(&error) => {
                Err(ServiceError::duplicate(DUPLICATE_EMAIL))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Verifies a user's credentials and returns the matching user.
    ///
    /// # Errors
    /// Returns the same generic `Authentication` error whether the email is
    /// unknown or the password is wrong.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let record = repo
            .get_user_by_email_with_password(&normalize_email(email))
            .await?;

        let Some(record) = record else {
            return Err(ServiceError::authentication(INCORRECT_CREDENTIALS));
        };

        if !Self::verify_password(password, &record.password_hash).await? {
            return Err(ServiceError::authentication(INCORRECT_CREDENTIALS));
        }

        Ok(record.user)
    }

    /// Retrieves a user by ID with existence verification.
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::validation(format!("User '{}' not found", id)))?;
        Ok(user)
    }

    /// Suspends a user. Their tokens remain cryptographically valid but are
    /// refused by the access-control middleware from now on.
    pub async fn deactivate_user(&self, id: &str) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        if !repo.set_active(id, false).await? {
            return Err(ServiceError::validation(format!("User '{}' not found", id)));
        }
        Ok(())
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// bcrypt is CPU-bound, so the work is moved to a blocking thread to keep
    /// the async runtime responsive for other requests.
    pub async fn hash_password(password: &str) -> ServiceResult<String> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
            .await
            .map_err(|e| ServiceError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| ServiceError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Verifies a password against a stored hash on a blocking thread.
    pub async fn verify_password(password: &str, password_hash: &str) -> ServiceResult<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| {
                ServiceError::internal(format!("Password verification task failed: {}", e))
            })?
            .map_err(|e| ServiceError::internal(format!("Password verification failed: {}", e)))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_unique_violation(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.is_unique_violation()
    )
}
