use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::{AppState, error::AppResult, extract::JsonBody, models::Credentials, queries::users};

pub async fn signup(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<Credentials>,
) -> AppResult<(StatusCode, Json<Value>)> {
    users::signup(&state.db, &req.username, &req.password).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "User created" }))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<Credentials>,
) -> AppResult<Json<Value>> {
    let user = users::login(&state.db, &req.username, &req.password).await?;
    Ok(Json(json!({ "message": "Login successful", "username": user.username })))
}
