use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppResult,
    extract::Query,
    models::AdaptationRow,
    queries::{self, adaptations},
};

#[derive(Debug, Default, Deserialize)]
pub struct AdaptationQuery {
    #[serde(default)]
    all: bool,
}

/// An empty array means the title has no recorded adaptation.
pub async fn books_for_movie(
    State(state): State<Arc<AppState>>,
    Path(tconst): Path<String>,
    Query(q): Query<AdaptationQuery>,
) -> AppResult<Json<Vec<AdaptationRow>>> {
    let tconst = queries::parse_tconst(&tconst)?;
    Ok(Json(adaptations::books_for_movie(&state.db, &tconst, q.all).await?))
}

pub async fn movies_for_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Query(q): Query<AdaptationQuery>,
) -> AppResult<Json<Vec<AdaptationRow>>> {
    let book_id = queries::parse_book_id(&book_id)?;
    Ok(Json(adaptations::movies_for_book(&state.db, book_id, q.all).await?))
}
