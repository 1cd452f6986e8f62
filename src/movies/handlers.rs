// HTTP handlers for movie catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::middleware::AuthenticatedUser;
use crate::movies::{error::MovieError, models::{CreateMovie, Movie}};
use crate::validation;

/// Handler for GET /movies
/// Lists the whole catalog; open to unauthenticated clients
#[utoipa::path(
    get,
    path = "/movies",
    responses(
        (status = 200, description = "List of all movies", body = Vec<Movie>),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Internal server error"}))
    ),
    tag = "movies"
)]
pub async fn list_movies_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<Movie>>, MovieError> {
    tracing::debug!("Fetching all movies");

    let movies = state.movie_repo.find_all().await?;

    tracing::debug!("Retrieved {} movies", movies.len());
    Ok(Json(movies))
}

/// Handler for GET /movies/:imdb_id
/// Fetches a single movie; requires a valid access token
#[utoipa::path(
    get,
    path = "/movies/{imdb_id}",
    params(
        ("imdb_id" = String, Path, description = "IMDb identifier, e.g. tt0133093")
    ),
    responses(
        (status = 200, description = "Movie found", body = Movie),
        (status = 401, description = "Missing or invalid token", body = String, example = json!({"error": "Missing authentication token"})),
        (status = 404, description = "Movie not found", body = String, example = json!({"error": "Movie tt0133093 not found"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Internal server error"}))
    ),
    tag = "movies"
)]
pub async fn get_movie_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(imdb_id): Path<String>,
) -> Result<Json<Movie>, MovieError> {
    tracing::debug!(user_id = user.user_id, "Fetching movie {}", imdb_id);

    let movie = state
        .movie_repo
        .find_by_imdb_id(&imdb_id)
        .await?
        .ok_or_else(|| MovieError::NotFound(imdb_id))?;

    Ok(Json(movie))
}

/// Handler for POST /movies
/// Adds a movie to the catalog; requires a valid access token
#[utoipa::path(
    post,
    path = "/movies",
    request_body = CreateMovie,
    responses(
        (status = 201, description = "Movie added", body = Movie),
        (status = 400, description = "Invalid input", body = String, example = json!({"error": "Validation failed", "details": "imdb_id: must match the form tt0000000"})),
        (status = 401, description = "Missing or invalid token", body = String, example = json!({"error": "Missing authentication token"})),
        (status = 409, description = "Movie already in catalog", body = String, example = json!({"error": "Movie tt0133093 already exists"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Internal server error"}))
    ),
    tag = "movies"
)]
pub async fn add_movie_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateMovie>,
) -> Result<(StatusCode, Json<Movie>), MovieError> {
    tracing::debug!(user_id = user.user_id, "Adding movie {}", request.imdb_id);

    validation::validate_create_movie(&request).map_err(MovieError::Validation)?;

    let movie = state
        .movie_repo
        .insert(
            &request.imdb_id,
            &request.title,
            &request.genre,
            request.year,
            request.rating,
        )
        .await?;

    tracing::info!("Added movie {} to the catalog", movie.imdb_id);
    Ok((StatusCode::CREATED, Json(movie)))
}
