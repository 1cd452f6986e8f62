// Authentication error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

use crate::validation::{describe_violations, FieldViolation};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    /// Request body failed validation
    Validation(Vec<FieldViolation>),
    /// Unknown email or wrong password; callers cannot tell which
    InvalidCredentials,
    /// No Authorization header on a protected route
    MissingToken,
    /// Token structure could not be parsed
    MalformedToken,
    /// Token signature does not match the process key
    InvalidSignature,
    /// Token expiry has passed
    ExpiredToken,
    /// Registration hit an existing email
    EmailAlreadyExists,
    /// Token persistence target does not exist
    UserNotFound,
    DatabaseError(String),
    /// Store operation exceeded its deadline
    StoreTimeout,
    PasswordHashError,
    TokenGenerationError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Validation(violations) => {
                write!(f, "Validation failed: {}", describe_violations(violations))
            }
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::MissingToken => write!(f, "Missing authentication token"),
            AuthError::MalformedToken => write!(f, "Malformed token"),
            AuthError::InvalidSignature => write!(f, "Invalid token signature"),
            AuthError::ExpiredToken => write!(f, "Token has expired"),
            AuthError::EmailAlreadyExists => write!(f, "User already exists"),
            AuthError::UserNotFound => write!(f, "User record not found"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthError::StoreTimeout => write!(f, "Store operation timed out"),
            AuthError::PasswordHashError => write!(f, "Password hashing error"),
            AuthError::TokenGenerationError(msg) => write!(f, "Token generation error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::UserNotFound
            | AuthError::DatabaseError(_)
            | AuthError::StoreTimeout
            | AuthError::PasswordHashError
            | AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // The three token validation failures stay distinct internally but
        // collapse to one external message; clients only learn "401".
        let body = match &self {
            AuthError::Validation(violations) => Json(json!({
                "error": "Validation failed",
                "details": describe_violations(violations),
            })),
            AuthError::InvalidCredentials => {
                Json(json!({ "error": "Invalid email or password" }))
            }
            AuthError::MissingToken => {
                warn!("Missing token on protected route");
                Json(json!({ "error": "Missing authentication token" }))
            }
            AuthError::MalformedToken => {
                warn!("Malformed token rejected");
                Json(json!({ "error": "Invalid or expired token" }))
            }
            AuthError::InvalidSignature => {
                warn!("Token with invalid signature rejected");
                Json(json!({ "error": "Invalid or expired token" }))
            }
            AuthError::ExpiredToken => {
                warn!("Expired token rejected");
                Json(json!({ "error": "Invalid or expired token" }))
            }
            AuthError::EmailAlreadyExists => Json(json!({ "error": "User already exists" })),
            AuthError::UserNotFound => {
                error!("Token persistence target not found");
                Json(json!({ "error": "Internal server error" }))
            }
            AuthError::DatabaseError(msg) => {
                error!("Database error in auth: {}", msg);
                Json(json!({ "error": "Internal server error" }))
            }
            AuthError::StoreTimeout => {
                error!("Store operation exceeded deadline in auth");
                Json(json!({ "error": "Internal server error" }))
            }
            AuthError::PasswordHashError => {
                error!("Password hashing error");
                Json(json!({ "error": "Internal server error" }))
            }
            AuthError::TokenGenerationError(msg) => {
                error!("Token generation error: {}", msg);
                Json(json!({ "error": "Internal server error" }))
            }
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_all_map_to_401() {
        for err in [
            AuthError::MissingToken,
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::ExpiredToken,
            AuthError::InvalidCredentials,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(
            AuthError::EmailAlreadyExists.status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_store_failures_map_to_500() {
        for err in [
            AuthError::StoreTimeout,
            AuthError::DatabaseError("boom".to_string()),
            AuthError::UserNotFound,
            AuthError::PasswordHashError,
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
