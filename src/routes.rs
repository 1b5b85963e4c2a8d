pub mod adaptations;
pub mod analytics;
pub mod auth;
pub mod books;
pub mod movies;

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{AppState, error::AppResult, models::GenreRow, queries};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn genres(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<GenreRow>>> {
    Ok(Json(queries::genres::all(&state.db).await?))
}
