use sqlx::PgPool;
use tokio::time::timeout;

use crate::db::STORE_TIMEOUT;
use crate::movies::error::MovieError;
use crate::movies::models::Movie;

/// Repository for movie catalog operations
#[derive(Clone)]
pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    /// Create a new MovieRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the whole catalog
    pub async fn find_all(&self) -> Result<Vec<Movie>, MovieError> {
        let query = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, imdb_id, title, genre, year, rating, created_at, updated_at
            FROM movies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool);

        let movies = timeout(STORE_TIMEOUT, query)
            .await
            .map_err(|_| MovieError::StoreTimeout)?
            .map_err(|e| MovieError::DatabaseError(e.to_string()))?;

        Ok(movies)
    }

    /// Find one movie by its IMDb identifier
    pub async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<Option<Movie>, MovieError> {
        let query = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, imdb_id, title, genre, year, rating, created_at, updated_at
            FROM movies
            WHERE imdb_id = $1
            "#,
        )
        .bind(imdb_id)
        .fetch_optional(&self.pool);

        let movie = timeout(STORE_TIMEOUT, query)
            .await
            .map_err(|_| MovieError::StoreTimeout)?
            .map_err(|e| MovieError::DatabaseError(e.to_string()))?;

        Ok(movie)
    }

    /// Insert a new movie
    ///
    /// The unique index on imdb_id maps concurrent duplicates to
    /// `AlreadyExists`.
    pub async fn insert(
        &self,
        imdb_id: &str,
        title: &str,
        genre: &str,
        year: i32,
        rating: f64,
    ) -> Result<Movie, MovieError> {
        let query = sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (imdb_id, title, genre, year, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, imdb_id, title, genre, year, rating, created_at, updated_at
            "#,
        )
        .bind(imdb_id)
        .bind(title)
        .bind(genre)
        .bind(year)
        .bind(rating)
        .fetch_one(&self.pool);

        let movie = timeout(STORE_TIMEOUT, query)
            .await
            .map_err(|_| MovieError::StoreTimeout)?
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return MovieError::AlreadyExists(imdb_id.to_string());
                    }
                }
                MovieError::DatabaseError(e.to_string())
            })?;

        Ok(movie)
    }
}
