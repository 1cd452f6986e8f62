use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::validation::{describe_violations, FieldViolation};

/// Error types for movie catalog operations
#[derive(Debug, thiserror::Error)]
pub enum MovieError {
    #[error("Validation failed: {}", describe_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Movie already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Store operation timed out")]
    StoreTimeout,
}

impl IntoResponse for MovieError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            MovieError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Validation failed",
                    "details": describe_violations(violations),
                })),
            ),
            MovieError::NotFound(imdb_id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("Movie {} not found", imdb_id) })),
            ),
            MovieError::AlreadyExists(imdb_id) => (
                StatusCode::CONFLICT,
                Json(json!({ "error": format!("Movie {} already exists", imdb_id) })),
            ),
            MovieError::DatabaseError(msg) => {
                tracing::error!("Database error in movies: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
            }
            MovieError::StoreTimeout => {
                tracing::error!("Store operation exceeded deadline in movies");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
            }
        };

        (status, body).into_response()
    }
}
