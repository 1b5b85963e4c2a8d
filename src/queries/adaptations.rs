//! Book↔movie adaptation lookups.
//!
//! When several counterparts are mapped, the one with the longest movie runtime
//! is the canonical adaptation. Remaining ties go to the better-rated side and
//! then to the lowest identifier so the choice is stable across requests.

use sea_orm::{ConnectionTrait, FromQueryResult};
use tracing::debug;

use super::statement;
use crate::{error::AppResult, models::AdaptationRow};

const ADAPTATION_SELECT: &str = r#"SELECT
    b.id AS book_id,
    b.title AS book_title,
    bar.average_rating AS book_average_rating,
    COALESCE(bar.review_count, 0) AS review_count,
    m.tconst AS tconst,
    m.primary_title AS movie_title,
    m.runtime_minutes AS runtime_minutes,
    r.average_rating AS movie_average_rating,
    r.num_votes AS num_votes
FROM book_movie_adaptations ad
JOIN books b ON b.id = ad.book_id
JOIN movies m ON m.tconst = ad.tconst
LEFT JOIN book_average_ratings bar ON bar.book_id = b.id
LEFT JOIN ratings r ON r.tconst = m.tconst"#;

/// Books adapted into the movie `tconst`.
pub async fn books_for_movie<C: ConnectionTrait>(
    db: &C,
    tconst: &str,
    all: bool,
) -> AppResult<Vec<AdaptationRow>> {
    let sql = format!(
        r#"{ADAPTATION_SELECT}
        WHERE ad.tconst = ?
        ORDER BY
            m.runtime_minutes IS NULL, m.runtime_minutes DESC,
            bar.average_rating IS NULL, bar.average_rating DESC,
            b.id ASC
        {limit}"#,
        limit = limit_clause(all),
    );
    let rows =
        AdaptationRow::find_by_statement(statement(db, &sql, vec![tconst.into()])).all(db).await?;
    debug!(tconst = %tconst, matches = rows.len(), "books for movie");
    Ok(rows)
}

/// Movies adapted from the book `book_id`.
pub async fn movies_for_book<C: ConnectionTrait>(
    db: &C,
    book_id: i32,
    all: bool,
) -> AppResult<Vec<AdaptationRow>> {
    let sql = format!(
        r#"{ADAPTATION_SELECT}
        WHERE ad.book_id = ?
        ORDER BY
            m.runtime_minutes IS NULL, m.runtime_minutes DESC,
            r.average_rating IS NULL, r.average_rating DESC,
            m.tconst ASC
        {limit}"#,
        limit = limit_clause(all),
    );
    let rows =
        AdaptationRow::find_by_statement(statement(db, &sql, vec![book_id.into()])).all(db).await?;
    debug!(book_id = book_id, matches = rows.len(), "movies for book");
    Ok(rows)
}

fn limit_clause(all: bool) -> &'static str {
    if all { "" } else { "LIMIT 1" }
}
