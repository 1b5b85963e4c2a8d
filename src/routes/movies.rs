use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    extract::Query,
    models::{MovieDetails, MovieSearchRow},
    queries::{
        self, Page,
        movies::{self, MovieSearch},
    },
};

pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(tconst): Path<String>,
) -> AppResult<Json<Vec<MovieDetails>>> {
    let tconst = queries::parse_tconst(&tconst)?;
    let movie = movies::details(&state.db, &tconst).await?.ok_or(AppError::NotFound)?;
    Ok(Json(vec![movie]))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MovieSearch>,
) -> AppResult<Json<Vec<MovieSearchRow>>> {
    let page = Page::new(params.limit, params.offset, state.config.page_size);
    Ok(Json(movies::search(&state.db, &params, page).await?))
}
