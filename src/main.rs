mod auth;
mod db;
mod movies;
mod validation;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, TokenService, UserRepository};
use movies::MovieRepository;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        movies::handlers::list_movies_handler,
        movies::handlers::get_movie_handler,
        movies::handlers::add_movie_handler,
        auth::handlers::register_handler,
        auth::handlers::login_handler,
    ),
    components(
        schemas(
            movies::Movie,
            movies::CreateMovie,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            auth::UserResponse,
        )
    ),
    tags(
        (name = "movies", description = "Movie catalog endpoints"),
        (name = "auth", description = "Registration and login endpoints")
    ),
    info(
        title = "MovieStream API",
        version = "1.0.0",
        description = "Authenticated movie catalog backend"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
///
/// Every component is constructed once at startup and injected here; no
/// process-wide singletons. `FromRef` lets extractors pull the pieces
/// they need (the auth middleware takes the `TokenService`).
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: PgPool,
    pub token_service: TokenService,
    pub auth_service: Arc<AuthService>,
    pub movie_repo: MovieRepository,
}

impl AppState {
    /// Build the full component graph over a connection pool
    pub fn new(db: PgPool, jwt_secret: String) -> Self {
        let token_service = TokenService::new(jwt_secret);
        let auth_service = Arc::new(AuthService::new(
            UserRepository::new(db.clone()),
            token_service.clone(),
        ));
        let movie_repo = MovieRepository::new(db.clone());

        Self {
            db,
            token_service,
            auth_service,
            movie_repo,
        }
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Open routes
        .route("/movies", get(movies::list_movies_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        // Protected routes (handlers take the AuthenticatedUser extractor)
        .route("/movies/:imdb_id", get(movies::get_movie_handler))
        .route("/movies", post(movies::add_movie_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("MovieStream API - Starting...");

    // Get configuration from environment variables
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(AppState::new(db_pool, jwt_secret));

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("MovieStream API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
