use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::{entities::genre, error::AppResult, models::GenreRow};

pub async fn all<C: ConnectionTrait>(db: &C) -> AppResult<Vec<GenreRow>> {
    let genres = genre::Entity::find().order_by_asc(genre::Column::Name).all(db).await?;
    Ok(genres.into_iter().map(|g| GenreRow { id: g.id, name: g.name }).collect())
}
