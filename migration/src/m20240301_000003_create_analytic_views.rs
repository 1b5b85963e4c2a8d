use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const BOOK_AVERAGE_RATINGS: &str = r#"
CREATE VIEW IF NOT EXISTS book_average_ratings AS
SELECT
    b.id AS book_id,
    b.title AS title,
    AVG(CAST(r.rating AS REAL)) AS average_rating,
    COUNT(r.id) AS review_count
FROM books b
JOIN reviews r ON r.book_id = b.id
GROUP BY b.id, b.title
"#;

const TOP_MOVIES_BY_GENRE: &str = r#"
CREATE VIEW IF NOT EXISTS top_movies_by_genre AS
SELECT genre, tconst, primary_title, average_rating, num_votes, genre_rank
FROM (
    SELECT
        g.name AS genre,
        m.tconst AS tconst,
        m.primary_title AS primary_title,
        r.average_rating AS average_rating,
        r.num_votes AS num_votes,
        ROW_NUMBER() OVER (
            PARTITION BY g.id
            ORDER BY r.average_rating DESC, r.num_votes DESC, m.tconst ASC
        ) AS genre_rank
    FROM movie_genres mg
    JOIN genres g ON g.id = mg.genre_id
    JOIN movies m ON m.tconst = mg.tconst
    JOIN ratings r ON r.tconst = m.tconst
) ranked
WHERE genre_rank <= 10
"#;

const POSITIVE_REVIEW_BOOKS: &str = r#"
CREATE VIEW IF NOT EXISTS positive_review_books AS
SELECT book_id, title, average_rating, review_count
FROM book_average_ratings
WHERE average_rating >= 4.0
"#;

const LOW_RATED_MOVIES: &str = r#"
CREATE VIEW IF NOT EXISTS low_rated_movies AS
SELECT
    m.tconst AS tconst,
    m.primary_title AS primary_title,
    r.average_rating AS average_rating,
    r.num_votes AS num_votes
FROM movies m
JOIN ratings r ON r.tconst = m.tconst
WHERE r.average_rating < 5.0
"#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in [BOOK_AVERAGE_RATINGS, TOP_MOVIES_BY_GENRE, POSITIVE_REVIEW_BOOKS, LOW_RATED_MOVIES] {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for view in
            ["low_rated_movies", "positive_review_books", "top_movies_by_genre", "book_average_ratings"]
        {
            db.execute_unprepared(&format!("DROP VIEW IF EXISTS {view}")).await?;
        }
        Ok(())
    }
}
