use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a movie in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "tt0133093")]
    pub imdb_id: String,
    #[schema(example = "The Matrix")]
    pub title: String,
    #[schema(example = "Sci-Fi")]
    pub genre: String,
    #[schema(example = 1999)]
    pub year: i32,
    #[schema(example = 8.7, minimum = 0.0, maximum = 10.0)]
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Represents the data needed to add a movie to the catalog
///
/// Validated by `validation::validate_create_movie`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMovie {
    #[schema(example = "tt0133093")]
    pub imdb_id: String,
    #[schema(example = "The Matrix")]
    pub title: String,
    #[schema(example = "Sci-Fi")]
    pub genre: String,
    #[schema(example = 1999)]
    pub year: i32,
    #[schema(example = 8.7, minimum = 0.0, maximum = 10.0)]
    pub rating: f64,
}
