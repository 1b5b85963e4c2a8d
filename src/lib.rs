pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod extract;
pub mod import;
pub mod models;
pub mod password;
pub mod queries;
pub mod routes;
pub mod stats;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Arc<Self> {
        Arc::new(Self { config: Arc::new(config), db })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/genres", get(routes::genres))
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login))
        .route("/book/details/{book_id}", get(routes::books::details))
        .route("/books/search", get(routes::books::search))
        .route("/books/reviews", get(routes::books::reviews))
        .route("/movies/details/{tconst}", get(routes::movies::details))
        .route("/search/movies", get(routes::movies::search))
        .route("/adaptations/books/{tconst}", get(routes::adaptations::books_for_movie))
        .route("/adaptations/movies/{book_id}", get(routes::adaptations::movies_for_book))
        .route("/analytics/movies/topMoviesByGenre", get(routes::analytics::top_movies_by_genre))
        .route("/analytics/reviews-movie-ratings", get(routes::analytics::reviews_movie_ratings))
        .route(
            "/analytics/PositiveReviewsForBooksVSLowMovieRating",
            get(routes::analytics::positive_books_low_movies),
        )
        .route("/analytics/BookAndMovieOutliers", get(routes::analytics::outliers))
        .route("/analytics/rating-stats", get(routes::analytics::rating_stats))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}
