use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::{AppError, AppResult},
    extract::Query,
    models::{BookDetails, BookSearchRow, ReviewRow},
    queries::{
        self, Page,
        books::{self, BookSearch, ReviewSort},
    },
};

pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> AppResult<Json<Vec<BookDetails>>> {
    let book_id = queries::parse_book_id(&book_id)?;
    let book = books::details(&state.db, book_id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(vec![book]))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookSearch>,
) -> AppResult<Json<Vec<BookSearchRow>>> {
    let page = Page::new(params.limit, params.offset, state.config.page_size);
    Ok(Json(books::search(&state.db, &params, page).await?))
}

#[derive(Debug, Deserialize)]
pub struct ReviewsQuery {
    book_id: Option<String>,
    #[serde(default)]
    sort: ReviewSort,
    limit: Option<u64>,
    offset: Option<u64>,
}

pub async fn reviews(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ReviewsQuery>,
) -> AppResult<Json<Vec<ReviewRow>>> {
    let book_id = queries::parse_book_id(q.book_id.as_deref().unwrap_or_default())?;
    let page = Page::new(q.limit, q.offset, state.config.page_size);
    Ok(Json(books::reviews(&state.db, book_id, q.sort, page).await?))
}
