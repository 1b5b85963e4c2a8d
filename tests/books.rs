mod common;

use axum::http::StatusCode;
use bookreel::import::{BookRecord, Catalog};
use common::{TestApp, as_array};

#[tokio::test]
async fn book_details_returns_single_row_with_title() {
    let app = TestApp::seeded().await;
    let (status, body) = app.get("/book/details/1").await;
    assert_eq!(status, StatusCode::OK);
    let rows = as_array(&body);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["book_title"], "Dune");
    assert_eq!(rows[0]["authors"], "Frank Herbert");
    assert_eq!(rows[0]["genres"], "Science Fiction");
    assert_eq!(rows[0]["review_count"], 3);
    let avg = rows[0]["average_rating"].as_f64().unwrap();
    assert!((avg - 14.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn invalid_book_ids_are_not_found() {
    let app = TestApp::seeded().await;
    for uri in ["/book/details/-1", "/book/details/0", "/book/details/abc", "/book/details/999"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn unreviewed_book_has_null_average() {
    let app = TestApp::seeded().await;
    let (status, body) = app.get("/book/details/5").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body[0]["average_rating"].is_null());
    assert_eq!(body[0]["review_count"], 0);
}

#[tokio::test]
async fn search_by_author_is_case_insensitive() {
    let app = TestApp::seeded().await;
    let (status, body) = app.get("/books/search?author=KING").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> =
        as_array(&body).iter().map(|r| r["book_title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["It", "The Shining"]);
}

#[tokio::test]
async fn search_filters_by_year_range() {
    let app = TestApp::seeded().await;
    let (status, body) = app.get("/books/search?year_low=1980&year_high=1990").await;
    assert_eq!(status, StatusCode::OK);
    let rows = as_array(&body);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["book_title"], "It");
}

#[tokio::test]
async fn inverted_year_range_is_an_error() {
    let app = TestApp::seeded().await;
    let (status, body) = app.get("/books/search?year_low=2000&year_high=1990").await;
    assert!(status.is_client_error());
    assert!(body["error"].as_str().unwrap().contains("year"));
}

#[tokio::test]
async fn search_filters_by_genre_and_rating() {
    let app = TestApp::seeded().await;
    let (_, body) = app.get("/books/search?genre=horror").await;
    assert_eq!(as_array(&body).len(), 2);

    let (_, body) = app.get("/books/search?min_rating=4.6").await;
    let titles: Vec<&str> =
        as_array(&body).iter().map(|r| r["book_title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Dune", "The Hobbit"]);
}

#[tokio::test]
async fn search_wildcards_are_literal() {
    let app = TestApp::seeded().await;
    let (status, body) = app.get("/books/search?title=%25").await;
    assert_eq!(status, StatusCode::OK);
    assert!(as_array(&body).is_empty());
}

#[tokio::test]
async fn search_pages_results() {
    let app = TestApp::seeded().await;
    let (_, body) = app.get("/books/search?limit=2&offset=1").await;
    let titles: Vec<&str> =
        as_array(&body).iter().map(|r| r["book_title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["It", "Obscure Novel"]);
}

#[tokio::test]
async fn reviews_sorted_by_votes_then_rating() {
    let app = TestApp::seeded().await;
    let (status, body) = app.get("/books/reviews?book_id=1").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> =
        as_array(&body).iter().map(|r| r["reviewer_name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["cy", "ana", "ben"]);

    let (_, body) = app.get("/books/reviews?book_id=1&sort=rating").await;
    assert_eq!(body[0]["reviewer_name"], "ana");
}

#[tokio::test]
async fn reviews_require_a_book_id() {
    let app = TestApp::seeded().await;
    let (status, _) = app.get("/books/reviews").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = app.get("/books/reviews?book_id=999").await;
    assert_eq!(status, StatusCode::OK);
    assert!(as_array(&body).is_empty());
}

#[tokio::test]
async fn genres_are_listed_alphabetically() {
    let app = TestApp::seeded().await;
    let (status, body) = app.get("/genres").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = as_array(&body).iter().map(|g| g["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Drama", "Fantasy", "Horror", "Science Fiction"]);
}

#[tokio::test]
async fn joined_names_are_alphabetical() {
    let app = TestApp::with_catalog(Catalog {
        books: vec![BookRecord {
            id: 7,
            title: "Good Omens".to_string(),
            authors: vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()],
            genres: vec!["Fantasy".to_string(), "Comedy".to_string()],
            ..Default::default()
        }],
        ..Default::default()
    })
    .await;
    let (status, body) = app.get("/book/details/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["authors"], "Neil Gaiman, Terry Pratchett");
    assert_eq!(body[0]["genres"], "Comedy, Fantasy");
}

#[tokio::test]
async fn malformed_query_values_are_json_errors() {
    let app = TestApp::seeded().await;
    let (status, body) = app.get("/books/search?year_low=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("year_low"));

    let (status, body) = app.get("/search/movies?adult=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
