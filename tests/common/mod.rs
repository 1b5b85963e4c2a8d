#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use bookreel::{
    AppState, app,
    config::Config,
    db,
    import::{self, AdaptationRecord, BookRecord, Catalog, MovieRecord, ReviewRecord},
};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn seeded() -> Self {
        Self::with_catalog(catalog()).await
    }

    pub async fn with_catalog(catalog: Catalog) -> Self {
        let app = Self::empty().await;
        import::load_catalog(&app.state.db, &catalog).await.unwrap();
        app
    }

    pub async fn empty() -> Self {
        let config = Config::in_memory();
        let db = db::connect_and_migrate(&config).await.unwrap();
        let state = AppState::new(config, db);
        Self { router: app(state.clone()), state }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

pub fn as_array(value: &Value) -> &Vec<Value> {
    value.as_array().unwrap_or_else(|| panic!("expected array, got {value}"))
}

pub fn book(id: i32, title: &str, author: &str, genre: &str, date: &str, publisher: &str) -> BookRecord {
    BookRecord {
        id,
        title: title.to_string(),
        description: Some(format!("{title} description")),
        image_link: None,
        publisher: Some(publisher.to_string()),
        published_date: Some(date.to_string()),
        authors: vec![author.to_string()],
        genres: vec![genre.to_string()],
    }
}

pub fn movie(
    tconst: &str,
    title: &str,
    year: i32,
    runtime: Option<i32>,
    rating: Option<f64>,
    votes: i32,
    genres: &[&str],
) -> MovieRecord {
    MovieRecord {
        tconst: tconst.to_string(),
        primary_title: title.to_string(),
        original_title: None,
        is_adult: false,
        start_year: Some(year),
        runtime_minutes: runtime,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        average_rating: rating,
        num_votes: rating.map(|_| votes),
    }
}

pub fn review(book_id: i32, reviewer: &str, rating: i32, votes: i32) -> ReviewRecord {
    ReviewRecord {
        book_id,
        reviewer_name: reviewer.to_string(),
        review_text: format!("{reviewer} gives it {rating}"),
        rating,
        votes,
    }
}

pub fn adapted(book_id: i32, tconst: &str) -> AdaptationRecord {
    AdaptationRecord { book_id, tconst: tconst.to_string() }
}

/// Book averages: Dune 4.67, The Shining 4.5, It 2.5, The Hobbit 5.0.
/// Rated movies: five at 7.0 and the 1977 Hobbit at 1.0 (the only outlier).
pub fn catalog() -> Catalog {
    Catalog {
        books: vec![
            book(1, "Dune", "Frank Herbert", "Science Fiction", "1965-08-01", "Chilton Books"),
            book(2, "The Shining", "Stephen King", "Horror", "1977-01-28", "Doubleday"),
            book(3, "It", "Stephen King", "Horror", "1986-09-15", "Viking"),
            book(4, "The Hobbit", "J.R.R. Tolkien", "Fantasy", "1937-09-21", "George Allen & Unwin"),
            book(5, "Obscure Novel", "Anon Writer", "Drama", "2001", "Small Press"),
        ],
        movies: vec![
            movie("tt0087182", "Dune", 1984, Some(137), Some(7.0), 150_000, &["Science Fiction"]),
            movie(
                "tt1160419",
                "Dune: Part One",
                2021,
                Some(155),
                Some(7.0),
                800_000,
                &["Science Fiction", "Drama"],
            ),
            movie("tt0081505", "The Shining", 1980, Some(146), Some(7.0), 1_000_000, &["Horror", "Drama"]),
            movie("tt1396484", "It", 2017, Some(135), Some(7.0), 600_000, &["Horror"]),
            movie("tt0077687", "The Hobbit", 1977, Some(77), Some(1.0), 1_000, &["Fantasy"]),
            movie(
                "tt0111161",
                "The Shawshank Redemption",
                1994,
                Some(142),
                Some(7.0),
                2_800_000,
                &["Drama"],
            ),
            movie("tt9999999", "Unrated Film", 2020, None, None, 0, &[]),
        ],
        reviews: vec![
            review(1, "ana", 5, 10),
            review(1, "ben", 5, 3),
            review(1, "cy", 4, 25),
            review(2, "dee", 5, 1),
            review(2, "eli", 4, 0),
            review(3, "fay", 2, 7),
            review(3, "gus", 3, 2),
            review(4, "hal", 5, 4),
            review(4, "ivy", 5, 9),
        ],
        adaptations: vec![
            adapted(1, "tt0087182"),
            adapted(1, "tt1160419"),
            adapted(2, "tt0081505"),
            adapted(3, "tt1396484"),
            adapted(4, "tt0077687"),
        ],
    }
}
