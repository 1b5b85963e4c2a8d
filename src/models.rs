use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, FromQueryResult)]
pub struct BookDetails {
    pub book_id: i32,
    pub book_title: String,
    pub description: Option<String>,
    pub image_link: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub authors: Option<String>,
    pub genres: Option<String>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

#[derive(Clone, Debug, Serialize, FromQueryResult)]
pub struct BookSearchRow {
    pub book_id: i32,
    pub book_title: String,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub authors: Option<String>,
    pub genres: Option<String>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

#[derive(Clone, Debug, Serialize, FromQueryResult)]
pub struct ReviewRow {
    pub review_id: i32,
    pub reviewer_name: String,
    pub review_text: String,
    pub rating: i32,
    pub votes: i32,
}

#[derive(Clone, Debug, Serialize, FromQueryResult)]
pub struct MovieDetails {
    pub tconst: String,
    pub primary_title: String,
    pub original_title: String,
    pub is_adult: bool,
    pub start_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    pub average_rating: Option<f64>,
    pub num_votes: Option<i32>,
    pub genres: Option<String>,
}

/// Search rows carry the same columns as the detail view.
pub type MovieSearchRow = MovieDetails;

#[derive(Clone, Debug, Serialize, FromQueryResult)]
pub struct GenreRow {
    pub id: i32,
    pub name: String,
}

/// One book↔movie pairing with both sides' ratings.
#[derive(Clone, Debug, Serialize, FromQueryResult)]
pub struct AdaptationRow {
    pub book_id: i32,
    pub book_title: String,
    pub book_average_rating: Option<f64>,
    pub review_count: i64,
    pub tconst: String,
    pub movie_title: String,
    pub runtime_minutes: Option<i32>,
    pub movie_average_rating: Option<f64>,
    pub num_votes: Option<i32>,
}

#[derive(Clone, Debug, Serialize, FromQueryResult)]
pub struct TopMovieRow {
    pub genre: String,
    pub tconst: String,
    pub primary_title: String,
    pub average_rating: f64,
    pub num_votes: i32,
    pub genre_rank: i64,
}

#[derive(Clone, Debug, Serialize, FromQueryResult)]
pub struct ReviewVsRatingRow {
    pub book_id: i32,
    pub book_title: String,
    pub book_average_rating: f64,
    pub tconst: String,
    pub movie_title: String,
    pub movie_average_rating: f64,
    pub rating_gap: f64,
}

#[derive(Clone, Debug, Serialize, FromQueryResult)]
pub struct PositiveBookLowMovieRow {
    pub book_id: i32,
    pub book_title: String,
    pub book_average_rating: f64,
    pub review_count: i64,
    pub tconst: String,
    pub movie_title: String,
    pub movie_average_rating: f64,
    pub num_votes: i32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Book,
    Movie,
}

#[derive(Clone, Debug, Serialize)]
pub struct Outlier {
    pub kind: TitleKind,
    pub id: String,
    pub title: String,
    pub average_rating: f64,
    pub z_score: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct RatingStats {
    pub kind: TitleKind,
    pub count: usize,
    pub mean: Option<f64>,
    pub stddev: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
