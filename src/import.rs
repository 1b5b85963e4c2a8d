//! Bulk loading of a JSON catalog into an empty or partially filled database.
//!
//! Authors and genres are referenced by name and created on first sight. The
//! whole load runs in one transaction, so a bad record leaves nothing behind.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    entities::{
        adaptation, author, book, book_author, book_genre, genre, movie, movie_genre, rating,
        review,
    },
    error::{AppError, AppResult},
};

const CHUNK: usize = 500;

#[derive(Debug, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub books: Vec<BookRecord>,
    #[serde(default)]
    pub movies: Vec<MovieRecord>,
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
    #[serde(default)]
    pub adaptations: Vec<AdaptationRecord>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BookRecord {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub image_link: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieRecord {
    pub tconst: String,
    pub primary_title: String,
    pub original_title: Option<String>,
    #[serde(default)]
    pub is_adult: bool,
    pub start_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub average_rating: Option<f64>,
    pub num_votes: Option<i32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReviewRecord {
    pub book_id: i32,
    pub reviewer_name: String,
    pub review_text: String,
    pub rating: i32,
    #[serde(default)]
    pub votes: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AdaptationRecord {
    pub book_id: i32,
    pub tconst: String,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct LoadSummary {
    pub books: usize,
    pub movies: usize,
    pub ratings: usize,
    pub reviews: usize,
    pub adaptations: usize,
    pub authors: usize,
    pub genres: usize,
}

pub async fn load_catalog(db: &DatabaseConnection, catalog: &Catalog) -> AppResult<LoadSummary> {
    validate(catalog)?;

    let txn = db.begin().await?;
    let mut summary = LoadSummary::default();

    let mut genre_ids = NameIndex::new(NameTable::Genre);
    let mut author_ids = NameIndex::new(NameTable::Author);

    let books: Vec<book::ActiveModel> = catalog
        .books
        .iter()
        .map(|b| book::ActiveModel {
            id: Set(b.id),
            title: Set(b.title.clone()),
            description: Set(b.description.clone()),
            image_link: Set(b.image_link.clone()),
            publisher: Set(b.publisher.clone()),
            published_date: Set(b.published_date.clone()),
        })
        .collect();
    for chunk in books.chunks(CHUNK) {
        book::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
    }
    summary.books = books.len();

    let mut book_authors = Vec::new();
    let mut book_genres = Vec::new();
    for b in &catalog.books {
        for name in dedup_names(&b.authors) {
            let author_id = author_ids.resolve(&txn, name).await?;
            book_authors.push(book_author::ActiveModel { book_id: Set(b.id), author_id: Set(author_id) });
        }
        for name in dedup_names(&b.genres) {
            let genre_id = genre_ids.resolve(&txn, name).await?;
            book_genres.push(book_genre::ActiveModel { book_id: Set(b.id), genre_id: Set(genre_id) });
        }
    }
    for chunk in book_authors.chunks(CHUNK) {
        book_author::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
    }
    for chunk in book_genres.chunks(CHUNK) {
        book_genre::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
    }

    let movies: Vec<movie::ActiveModel> = catalog
        .movies
        .iter()
        .map(|m| movie::ActiveModel {
            tconst: Set(m.tconst.clone()),
            primary_title: Set(m.primary_title.clone()),
            original_title: Set(m.original_title.clone().unwrap_or_else(|| m.primary_title.clone())),
            is_adult: Set(m.is_adult),
            start_year: Set(m.start_year),
            runtime_minutes: Set(m.runtime_minutes),
        })
        .collect();
    for chunk in movies.chunks(CHUNK) {
        movie::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
    }
    summary.movies = movies.len();

    let ratings: Vec<rating::ActiveModel> = catalog
        .movies
        .iter()
        .filter_map(|m| {
            let average = m.average_rating?;
            Some(rating::ActiveModel {
                tconst: Set(m.tconst.clone()),
                average_rating: Set(average),
                num_votes: Set(m.num_votes.unwrap_or(0)),
            })
        })
        .collect();
    for chunk in ratings.chunks(CHUNK) {
        rating::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
    }
    summary.ratings = ratings.len();

    let mut movie_genres = Vec::new();
    for m in &catalog.movies {
        for name in dedup_names(&m.genres) {
            let genre_id = genre_ids.resolve(&txn, name).await?;
            movie_genres
                .push(movie_genre::ActiveModel { tconst: Set(m.tconst.clone()), genre_id: Set(genre_id) });
        }
    }
    for chunk in movie_genres.chunks(CHUNK) {
        movie_genre::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
    }

    let reviews: Vec<review::ActiveModel> = catalog
        .reviews
        .iter()
        .map(|r| review::ActiveModel {
            id: NotSet,
            book_id: Set(r.book_id),
            reviewer_name: Set(r.reviewer_name.clone()),
            review_text: Set(r.review_text.clone()),
            rating: Set(r.rating),
            votes: Set(r.votes),
        })
        .collect();
    for chunk in reviews.chunks(CHUNK) {
        review::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
    }
    summary.reviews = reviews.len();

    let adaptations: Vec<adaptation::ActiveModel> = catalog
        .adaptations
        .iter()
        .map(|a| adaptation::ActiveModel { book_id: Set(a.book_id), tconst: Set(a.tconst.clone()) })
        .collect();
    for chunk in adaptations.chunks(CHUNK) {
        adaptation::Entity::insert_many(chunk.to_vec()).exec(&txn).await?;
    }
    summary.adaptations = adaptations.len();

    summary.authors = author_ids.created;
    summary.genres = genre_ids.created;

    txn.commit().await?;
    info!(?summary, "catalog loaded");
    Ok(summary)
}

fn validate(catalog: &Catalog) -> AppResult<()> {
    if let Some(r) = catalog.reviews.iter().find(|r| !(1..=5).contains(&r.rating)) {
        return Err(AppError::bad_request(format!(
            "review of book {} has rating {} outside 1..=5",
            r.book_id, r.rating
        )));
    }
    if let Some(m) = catalog.movies.iter().find(|m| crate::queries::parse_tconst(&m.tconst).is_err())
    {
        return Err(AppError::bad_request(format!("invalid tconst {:?}", m.tconst)));
    }
    if let Some(b) = catalog.books.iter().find(|b| b.id <= 0) {
        return Err(AppError::bad_request(format!("invalid book id {}", b.id)));
    }
    Ok(())
}

fn dedup_names(names: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(names.len());
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[derive(Clone, Copy, Debug)]
enum NameTable {
    Author,
    Genre,
}

/// Name → id lookups for the `authors` and `genres` tables.
struct NameIndex {
    table: NameTable,
    ids: HashMap<String, i32>,
    created: usize,
}

impl NameIndex {
    fn new(table: NameTable) -> Self {
        Self { table, ids: HashMap::new(), created: 0 }
    }

    async fn resolve<C: ConnectionTrait>(&mut self, db: &C, name: &str) -> AppResult<i32> {
        if let Some(id) = self.ids.get(name) {
            return Ok(*id);
        }
        let existing = match self.table {
            NameTable::Author => author::Entity::find()
                .filter(author::Column::Name.eq(name))
                .one(db)
                .await?
                .map(|a| a.id),
            NameTable::Genre => genre::Entity::find()
                .filter(genre::Column::Name.eq(name))
                .one(db)
                .await?
                .map(|g| g.id),
        };
        let id = match existing {
            Some(id) => id,
            None => {
                debug!(table = ?self.table, name = %name, "creating row");
                self.created += 1;
                match self.table {
                    NameTable::Author => {
                        author::ActiveModel { id: NotSet, name: Set(name.to_string()) }
                            .insert(db)
                            .await?
                            .id
                    },
                    NameTable::Genre => {
                        genre::ActiveModel { id: NotSet, name: Set(name.to_string()) }
                            .insert(db)
                            .await?
                            .id
                    },
                }
            },
        };
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_deduplicated() {
        let names = vec![" Fantasy".to_string(), "Fantasy".to_string(), "".to_string(), "Drama".into()];
        assert_eq!(dedup_names(&names), vec!["Fantasy", "Drama"]);
    }

    #[test]
    fn rejects_out_of_range_review_ratings() {
        let catalog = Catalog {
            reviews: vec![ReviewRecord { book_id: 1, rating: 6, ..Default::default() }],
            ..Default::default()
        };
        assert!(matches!(validate(&catalog), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_malformed_tconst() {
        let catalog = Catalog {
            movies: vec![MovieRecord { tconst: "nm0000001".into(), ..Default::default() }],
            ..Default::default()
        };
        assert!(matches!(validate(&catalog), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn parses_minimal_json() {
        let catalog: Catalog = serde_json::from_str(
            r#"{"books":[{"id":1,"title":"Dune","authors":["Frank Herbert"]}],
                "movies":[{"tconst":"tt0087182","primary_title":"Dune","average_rating":6.3}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.books[0].authors, vec!["Frank Herbert"]);
        assert!(catalog.reviews.is_empty());
        assert_eq!(catalog.movies[0].average_rating, Some(6.3));
        assert!(validate(&catalog).is_ok());
    }
}
