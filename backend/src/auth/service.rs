//! Core business logic for the authentication system.

use crate::auth::models::{LoginRequest, RegisterRequest};
use crate::config::Config;
use crate::database::models::{CreateUser, Role, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;

const MISSING_REGISTER_FIELDS: &str = "Please provide a name, email address and password.";
const MISSING_LOGIN_FIELDS: &str = "Please provide your email and password.";

/// Authentication service for handling registration, login, and token issuance
pub struct AuthService<'a> {
    user_service: UserService<'a>,
    jwt_utils: JwtUtils,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, config: &Config) -> Self {
        AuthService {
            user_service: UserService::new(pool),
            jwt_utils: JwtUtils::from_config(config),
        }
    }

    /// Create a new user account and issue its first session token.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<(String, User)> {
        let (Some(nom), Some(email), Some(password)) = (
            non_empty(request.nom),
            non_empty(request.email),
            non_empty(request.password),
        ) else {
            return Err(ServiceError::validation(MISSING_REGISTER_FIELDS));
        };

        let role = match request.role {
            Some(role) => role.parse::<Role>().map_err(ServiceError::validation)?,
            None => Role::default(),
        };

        let user = self
            .user_service
            .create_user(CreateUser {
                nom,
                email,
                password,
                role,
            })
            .await?;

        let token = self.jwt_utils.generate_token(&user.id)?;
        Ok((token, user))
    }

    /// Authenticate a user and issue a fresh session token.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<(String, User)> {
        let (Some(email), Some(password)) =
            (non_empty(request.email), non_empty(request.password))
        else {
            return Err(ServiceError::validation(MISSING_LOGIN_FIELDS));
        };

        let user = self.user_service.authenticate_user(&email, &password).await?;

        let token = self.jwt_utils.generate_token(&user.id)?;
        Ok((token, user))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
