pub mod adaptation;
pub mod author;
pub mod book;
pub mod book_author;
pub mod book_genre;
pub mod genre;
pub mod movie;
pub mod movie_genre;
pub mod rating;
pub mod review;
pub mod user;
