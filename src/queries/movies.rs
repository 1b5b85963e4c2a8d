use sea_orm::{ConnectionTrait, FromQueryResult, Value};
use serde::Deserialize;
use tracing::debug;

use super::{Filters, Page, statement};
use crate::{
    error::AppResult,
    models::{MovieDetails, MovieSearchRow},
};

const MOVIE_SELECT: &str = r#"SELECT
    m.tconst AS tconst,
    m.primary_title AS primary_title,
    m.original_title AS original_title,
    m.is_adult AS is_adult,
    m.start_year AS start_year,
    m.runtime_minutes AS runtime_minutes,
    r.average_rating AS average_rating,
    r.num_votes AS num_votes,
    (
        SELECT GROUP_CONCAT(name, ', ')
        FROM (
            SELECT g.name AS name
            FROM movie_genres mg
            JOIN genres g ON g.id = mg.genre_id
            WHERE mg.tconst = m.tconst
            ORDER BY g.name
        )
    ) AS genres
FROM movies m
LEFT JOIN ratings r ON r.tconst = m.tconst"#;

#[derive(Debug, Default, Deserialize)]
pub struct MovieSearch {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub year_low: Option<i32>,
    pub year_high: Option<i32>,
    pub runtime_low: Option<i32>,
    pub runtime_high: Option<i32>,
    pub rating_low: Option<f64>,
    pub rating_high: Option<f64>,
    pub adult: Option<bool>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

pub async fn details<C: ConnectionTrait>(db: &C, tconst: &str) -> AppResult<Option<MovieDetails>> {
    let sql = format!("{MOVIE_SELECT}\nWHERE m.tconst = ?");
    let row =
        MovieDetails::find_by_statement(statement(db, &sql, vec![tconst.into()])).one(db).await?;
    Ok(row)
}

pub async fn search<C: ConnectionTrait>(
    db: &C,
    params: &MovieSearch,
    page: Page,
) -> AppResult<Vec<MovieSearchRow>> {
    let mut filters = Filters::default();
    filters.contains(
        "(LOWER(m.primary_title) LIKE ? ESCAPE '\\' OR LOWER(m.original_title) LIKE ? ESCAPE '\\')",
        params.title.as_deref(),
    );
    filters.contains(
        r#"EXISTS (
            SELECT 1 FROM movie_genres mg
            JOIN genres g ON g.id = mg.genre_id
            WHERE mg.tconst = m.tconst AND LOWER(g.name) LIKE ? ESCAPE '\'
        )"#,
        params.genre.as_deref(),
    );
    filters.range("m.start_year", "year", params.year_low, params.year_high)?;
    filters.range("m.runtime_minutes", "runtime", params.runtime_low, params.runtime_high)?;
    filters.range("r.average_rating", "rating", params.rating_low, params.rating_high)?;
    if let Some(adult) = params.adult {
        filters.push("m.is_adult = ?", [Value::from(adult)]);
    }

    let sql = format!(
        r#"{MOVIE_SELECT}
        {where_sql}
        ORDER BY r.average_rating IS NULL, r.average_rating DESC, m.tconst ASC
        LIMIT ? OFFSET ?"#,
        where_sql = filters.where_sql(),
    );

    let mut values = filters.into_values();
    values.extend(page.values());

    let rows = MovieSearchRow::find_by_statement(statement(db, &sql, values)).all(db).await?;
    debug!(results = rows.len(), "movie search");
    Ok(rows)
}
