use sea_orm::{ConnectionTrait, FromQueryResult, Value};
use serde::Deserialize;
use tracing::debug;

use super::{Filters, Page, statement};
use crate::{
    error::AppResult,
    models::{BookDetails, BookSearchRow, ReviewRow},
};

const BOOK_FROM: &str = r#"
FROM books b
LEFT JOIN book_average_ratings r ON r.book_id = b.id
"#;

// Names are concatenated from an ordered subquery so the joined string is stable.
const AUTHORS_COLUMN: &str = r#"(
    SELECT GROUP_CONCAT(name, ', ')
    FROM (
        SELECT a.name AS name
        FROM book_authors ba
        JOIN authors a ON a.id = ba.author_id
        WHERE ba.book_id = b.id
        ORDER BY a.name
    )
) AS authors"#;

const GENRES_COLUMN: &str = r#"(
    SELECT GROUP_CONCAT(name, ', ')
    FROM (
        SELECT g.name AS name
        FROM book_genres bg
        JOIN genres g ON g.id = bg.genre_id
        WHERE bg.book_id = b.id
        ORDER BY g.name
    )
) AS genres"#;

const PUBLISHED_YEAR: &str = "CAST(SUBSTR(b.published_date, 1, 4) AS INTEGER)";

#[derive(Debug, Default, Deserialize)]
pub struct BookSearch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub year_low: Option<i32>,
    pub year_high: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSort {
    #[default]
    Votes,
    Rating,
}

pub async fn details<C: ConnectionTrait>(db: &C, book_id: i32) -> AppResult<Option<BookDetails>> {
    let sql = format!(
        r#"SELECT
            b.id AS book_id,
            b.title AS book_title,
            b.description AS description,
            b.image_link AS image_link,
            b.publisher AS publisher,
            b.published_date AS published_date,
            {AUTHORS_COLUMN},
            {GENRES_COLUMN},
            r.average_rating AS average_rating,
            COALESCE(r.review_count, 0) AS review_count
        {BOOK_FROM}
        WHERE b.id = ?"#
    );
    let row =
        BookDetails::find_by_statement(statement(db, &sql, vec![book_id.into()])).one(db).await?;
    Ok(row)
}

pub async fn search<C: ConnectionTrait>(
    db: &C,
    params: &BookSearch,
    page: Page,
) -> AppResult<Vec<BookSearchRow>> {
    let mut filters = Filters::default();
    filters.contains("LOWER(b.title) LIKE ? ESCAPE '\\'", params.title.as_deref());
    filters.contains("LOWER(b.publisher) LIKE ? ESCAPE '\\'", params.publisher.as_deref());
    filters.contains(
        r#"EXISTS (
            SELECT 1 FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = b.id AND LOWER(a.name) LIKE ? ESCAPE '\'
        )"#,
        params.author.as_deref(),
    );
    filters.contains(
        r#"EXISTS (
            SELECT 1 FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = b.id AND LOWER(g.name) LIKE ? ESCAPE '\'
        )"#,
        params.genre.as_deref(),
    );
    filters.range(PUBLISHED_YEAR, "year", params.year_low, params.year_high)?;
    filters.range("r.average_rating", "rating", params.min_rating, params.max_rating)?;

    let sql = format!(
        r#"SELECT
            b.id AS book_id,
            b.title AS book_title,
            b.publisher AS publisher,
            b.published_date AS published_date,
            {AUTHORS_COLUMN},
            {GENRES_COLUMN},
            r.average_rating AS average_rating,
            COALESCE(r.review_count, 0) AS review_count
        {BOOK_FROM}
        {where_sql}
        ORDER BY b.title ASC, b.id ASC
        LIMIT ? OFFSET ?"#,
        where_sql = filters.where_sql(),
    );

    let mut values = filters.into_values();
    values.extend(page.values());

    let rows = BookSearchRow::find_by_statement(statement(db, &sql, values)).all(db).await?;
    debug!(results = rows.len(), "book search");
    Ok(rows)
}

pub async fn reviews<C: ConnectionTrait>(
    db: &C,
    book_id: i32,
    sort: ReviewSort,
    page: Page,
) -> AppResult<Vec<ReviewRow>> {
    let order = match sort {
        ReviewSort::Votes => "votes DESC, rating DESC, id ASC",
        ReviewSort::Rating => "rating DESC, votes DESC, id ASC",
    };
    let sql = format!(
        r#"SELECT
            id AS review_id,
            reviewer_name,
            review_text,
            rating,
            votes
        FROM reviews
        WHERE book_id = ?
        ORDER BY {order}
        LIMIT ? OFFSET ?"#
    );
    let mut values: Vec<Value> = vec![book_id.into()];
    values.extend(page.values());
    let rows = ReviewRow::find_by_statement(statement(db, &sql, values)).all(db).await?;
    Ok(rows)
}
