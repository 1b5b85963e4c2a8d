use sea_orm::{ConnectionTrait, FromQueryResult, Value};
use tracing::debug;

use super::statement;
use crate::{
    error::AppResult,
    models::{
        Outlier, PositiveBookLowMovieRow, RatingStats, ReviewVsRatingRow, TitleKind, TopMovieRow,
    },
    stats::{self, Summary},
};

#[derive(Debug, FromQueryResult)]
struct TitleAverage {
    id: String,
    title: String,
    average_rating: f64,
}

const BOOK_AVERAGES: &str = r#"SELECT
    CAST(book_id AS TEXT) AS id,
    title,
    average_rating
FROM book_average_ratings"#;

const MOVIE_AVERAGES: &str = r#"SELECT
    m.tconst AS id,
    m.primary_title AS title,
    r.average_rating AS average_rating
FROM movies m
JOIN ratings r ON r.tconst = m.tconst"#;

pub async fn top_movies_by_genre<C: ConnectionTrait>(
    db: &C,
    genre: Option<&str>,
) -> AppResult<Vec<TopMovieRow>> {
    let mut sql = String::from(
        "SELECT genre, tconst, primary_title, average_rating, num_votes, genre_rank \
         FROM top_movies_by_genre",
    );
    let mut values: Vec<Value> = Vec::new();
    if let Some(genre) = genre.map(str::trim).filter(|g| !g.is_empty()) {
        sql.push_str(" WHERE LOWER(genre) = ?");
        values.push(genre.to_lowercase().into());
    }
    sql.push_str(" ORDER BY genre ASC, genre_rank ASC");

    let rows = TopMovieRow::find_by_statement(statement(db, &sql, values)).all(db).await?;
    Ok(rows)
}

/// Adapted pairs where both sides are rated, with the movie rating rescaled to
/// the 1–5 review scale before taking the difference.
pub async fn reviews_vs_movie_ratings<C: ConnectionTrait>(
    db: &C,
) -> AppResult<Vec<ReviewVsRatingRow>> {
    let sql = r#"SELECT
            bar.book_id AS book_id,
            bar.title AS book_title,
            bar.average_rating AS book_average_rating,
            m.tconst AS tconst,
            m.primary_title AS movie_title,
            r.average_rating AS movie_average_rating,
            (r.average_rating / 2.0 - bar.average_rating) AS rating_gap
        FROM book_movie_adaptations ad
        JOIN book_average_ratings bar ON bar.book_id = ad.book_id
        JOIN movies m ON m.tconst = ad.tconst
        JOIN ratings r ON r.tconst = m.tconst
        ORDER BY ABS(r.average_rating / 2.0 - bar.average_rating) DESC, bar.book_id ASC, m.tconst ASC"#;

    let rows = ReviewVsRatingRow::find_by_statement(statement(db, sql, vec![])).all(db).await?;
    Ok(rows)
}

pub async fn positive_books_low_movies<C: ConnectionTrait>(
    db: &C,
) -> AppResult<Vec<PositiveBookLowMovieRow>> {
    let sql = r#"SELECT
            p.book_id AS book_id,
            p.title AS book_title,
            p.average_rating AS book_average_rating,
            p.review_count AS review_count,
            l.tconst AS tconst,
            l.primary_title AS movie_title,
            l.average_rating AS movie_average_rating,
            l.num_votes AS num_votes
        FROM positive_review_books p
        JOIN book_movie_adaptations ad ON ad.book_id = p.book_id
        JOIN low_rated_movies l ON l.tconst = ad.tconst
        ORDER BY p.average_rating DESC, l.average_rating ASC, p.book_id ASC, l.tconst ASC"#;

    let rows =
        PositiveBookLowMovieRow::find_by_statement(statement(db, sql, vec![])).all(db).await?;
    Ok(rows)
}

/// Books and movies whose average rating is more than `threshold` standard
/// deviations away from the mean of their own kind, sorted by z-score descending.
pub async fn outliers<C: ConnectionTrait>(db: &C, threshold: f64) -> AppResult<Vec<Outlier>> {
    let mut out = Vec::new();
    for (kind, sql) in [(TitleKind::Book, BOOK_AVERAGES), (TitleKind::Movie, MOVIE_AVERAGES)] {
        let titles = title_averages(db, sql).await?;
        let total = titles.len();
        let items = titles.into_iter().map(|t| {
            let rating = t.average_rating;
            (t, rating)
        });
        let flagged = stats::outliers(items.collect(), threshold);
        debug!(kind = ?kind, total = total, outliers = flagged.len(), "outlier scan");
        out.extend(flagged.into_iter().map(|(t, z_score)| Outlier {
            kind,
            id: t.id,
            title: t.title,
            average_rating: t.average_rating,
            z_score,
        }));
    }
    out.sort_by(|a, b| b.z_score.total_cmp(&a.z_score));
    Ok(out)
}

pub async fn rating_stats<C: ConnectionTrait>(db: &C) -> AppResult<Vec<RatingStats>> {
    let mut out = Vec::with_capacity(2);
    for (kind, sql) in [(TitleKind::Book, BOOK_AVERAGES), (TitleKind::Movie, MOVIE_AVERAGES)] {
        let values: Vec<f64> =
            title_averages(db, sql).await?.into_iter().map(|t| t.average_rating).collect();
        let summary = Summary::from_values(&values);
        out.push(RatingStats {
            kind,
            count: values.len(),
            mean: summary.map(|s| s.mean),
            stddev: summary.map(|s| s.stddev),
        });
    }
    Ok(out)
}

async fn title_averages<C: ConnectionTrait>(db: &C, sql: &str) -> AppResult<Vec<TitleAverage>> {
    let rows = TitleAverage::find_by_statement(statement(db, sql, vec![])).all(db).await?;
    Ok(rows)
}
