// Movie catalog module

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

pub use error::MovieError;
pub use handlers::{add_movie_handler, get_movie_handler, list_movies_handler};
pub use models::{CreateMovie, Movie};
pub use repository::MovieRepository;
