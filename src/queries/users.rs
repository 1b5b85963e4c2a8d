use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use tracing::{debug, info};

use crate::{
    entities::user,
    error::{AppError, AppResult, is_unique_violation},
    password,
};

pub async fn signup<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password: &str,
) -> AppResult<user::Model> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::bad_request("username is required"));
    }
    if password.is_empty() {
        return Err(AppError::bad_request("password is required"));
    }

    let model = user::ActiveModel {
        id: Default::default(),
        username: Set(username.to_string()),
        password_hash: Set(password::hash(password)),
        created_at: Set(jiff::Timestamp::now().as_second()),
    };

    match model.insert(db).await {
        Ok(user) => {
            info!(username = %user.username, "user created");
            Ok(user)
        },
        Err(err) if is_unique_violation(&err) => {
            debug!(username = %username, "duplicate signup");
            Err(AppError::Conflict("username already exists".to_string()))
        },
        Err(err) => Err(err.into()),
    }
}

/// Unknown usernames and wrong passwords both yield `Unauthorized`.
pub async fn login<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password: &str,
) -> AppResult<user::Model> {
    let found = user::Entity::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await?;

    match found {
        Some(user) if password::verify(password, &user.password_hash) => Ok(user),
        _ => {
            debug!(username = %username, "login rejected");
            Err(AppError::Unauthorized)
        },
    }
}
