use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppResult,
    extract::Query,
    models::{
        Outlier, PositiveBookLowMovieRow, RatingStats, ReviewVsRatingRow, TopMovieRow,
    },
    queries::analytics,
};

#[derive(Debug, Deserialize)]
pub struct GenreFilter {
    genre: Option<String>,
}

pub async fn top_movies_by_genre(
    State(state): State<Arc<AppState>>,
    Query(q): Query<GenreFilter>,
) -> AppResult<Json<Vec<TopMovieRow>>> {
    Ok(Json(analytics::top_movies_by_genre(&state.db, q.genre.as_deref()).await?))
}

pub async fn reviews_movie_ratings(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<ReviewVsRatingRow>>> {
    Ok(Json(analytics::reviews_vs_movie_ratings(&state.db).await?))
}

pub async fn positive_books_low_movies(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<PositiveBookLowMovieRow>>> {
    Ok(Json(analytics::positive_books_low_movies(&state.db).await?))
}

pub async fn outliers(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Outlier>>> {
    Ok(Json(analytics::outliers(&state.db, state.config.outlier_threshold).await?))
}

pub async fn rating_stats(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<RatingStats>>> {
    Ok(Json(analytics::rating_stats(&state.db).await?))
}
