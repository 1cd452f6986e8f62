// Authentication service - business logic layer

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};

/// Role assigned to every newly registered user
const DEFAULT_ROLE: &str = "user";

/// Authentication service coordinating credential and token operations
pub struct AuthService {
    user_repo: UserRepository,
    token_service: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(user_repo: UserRepository, token_service: TokenService) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Register a new user
    ///
    /// The email_exists check is a fast path; the store's unique index
    /// catches the concurrent-registration race on insert.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, AuthError> {
        if self.user_repo.email_exists(&request.email).await? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = PasswordService::hash_password(&request.password)?;

        let user = self
            .user_repo
            .insert_user(
                &request.email,
                &password_hash,
                &request.first_name,
                &request.last_name,
                DEFAULT_ROLE,
            )
            .await?;

        tracing::info!(user_id = user.id, "Registered new user");
        Ok(user.into())
    }

    /// Log a user in, issuing and persisting a fresh token pair
    ///
    /// Lookup miss and password mismatch produce the same error so the
    /// response never reveals which field was wrong. A persistence failure
    /// after successful verification fails the whole login; tokens are
    /// never handed out unpersisted.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let (access_token, refresh_token) = self.token_service.issue_pair(
            user.id,
            &user.email,
            &user.first_name,
            &user.last_name,
            &user.role,
        )?;

        self.user_repo
            .update_tokens(user.id, &access_token, &refresh_token)
            .await?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(AuthResponse {
            access_token,
            refresh_token,
            user: user.into(),
        })
    }
}
