// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
};
use crate::validation;

/// Handler for POST /auth/register
/// Creates a new user account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid input", body = String, example = json!({"error": "Validation failed", "details": "email: must be a valid email address"})),
        (status = 409, description = "Email already registered", body = String, example = json!({"error": "User already exists"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Internal server error"}))
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    tracing::debug!("Registration attempt");

    validation::validate_register(&request).map_err(AuthError::Validation)?;

    let user = state.auth_service.register(&request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for POST /auth/login
/// Authenticates a user and returns a fresh token pair
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid input", body = String, example = json!({"error": "Validation failed"})),
        (status = 401, description = "Authentication failed", body = String, example = json!({"error": "Invalid email or password"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Internal server error"}))
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    tracing::debug!("Login attempt");

    validation::validate_login(&request).map_err(AuthError::Validation)?;

    let response = state.auth_service.login(&request).await?;
    Ok(Json(response))
}
