use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(pk_auto(Genres::Id))
                    .col(string_uniq(Genres::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Authors::Table)
                    .if_not_exists()
                    .col(pk_auto(Authors::Id))
                    .col(string_uniq(Authors::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(pk_auto(Books::Id))
                    .col(string(Books::Title))
                    .col(text_null(Books::Description))
                    .col(string_null(Books::ImageLink))
                    .col(string_null(Books::Publisher))
                    .col(string_null(Books::PublishedDate))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_books_title")
                    .table(Books::Table)
                    .col(Books::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookAuthors::Table)
                    .if_not_exists()
                    .col(integer(BookAuthors::BookId))
                    .col(integer(BookAuthors::AuthorId))
                    .primary_key(Index::create().col(BookAuthors::BookId).col(BookAuthors::AuthorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_authors_book")
                            .from(BookAuthors::Table, BookAuthors::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_authors_author")
                            .from(BookAuthors::Table, BookAuthors::AuthorId)
                            .to(Authors::Table, Authors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookGenres::Table)
                    .if_not_exists()
                    .col(integer(BookGenres::BookId))
                    .col(integer(BookGenres::GenreId))
                    .primary_key(Index::create().col(BookGenres::BookId).col(BookGenres::GenreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_genres_book")
                            .from(BookGenres::Table, BookGenres::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_genres_genre")
                            .from(BookGenres::Table, BookGenres::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(string(Movies::Tconst).primary_key())
                    .col(string(Movies::PrimaryTitle))
                    .col(string(Movies::OriginalTitle))
                    .col(boolean(Movies::IsAdult).default(false))
                    .col(integer_null(Movies::StartYear))
                    .col(integer_null(Movies::RuntimeMinutes))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_primary_title")
                    .table(Movies::Table)
                    .col(Movies::PrimaryTitle)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieGenres::Table)
                    .if_not_exists()
                    .col(string(MovieGenres::Tconst))
                    .col(integer(MovieGenres::GenreId))
                    .primary_key(Index::create().col(MovieGenres::Tconst).col(MovieGenres::GenreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genres_movie")
                            .from(MovieGenres::Table, MovieGenres::Tconst)
                            .to(Movies::Table, Movies::Tconst)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genres_genre")
                            .from(MovieGenres::Table, MovieGenres::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(string(Ratings::Tconst).primary_key())
                    .col(double(Ratings::AverageRating))
                    .col(integer(Ratings::NumVotes).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_movie")
                            .from(Ratings::Table, Ratings::Tconst)
                            .to(Movies::Table, Movies::Tconst)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(pk_auto(Reviews::Id))
                    .col(integer(Reviews::BookId))
                    .col(string(Reviews::ReviewerName))
                    .col(text(Reviews::ReviewText))
                    .col(integer(Reviews::Rating).check(Expr::col(Reviews::Rating).between(1, 5)))
                    .col(integer(Reviews::Votes).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_book")
                            .from(Reviews::Table, Reviews::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_book_id")
                    .table(Reviews::Table)
                    .col(Reviews::BookId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookMovieAdaptations::Table)
                    .if_not_exists()
                    .col(integer(BookMovieAdaptations::BookId))
                    .col(string(BookMovieAdaptations::Tconst))
                    .primary_key(
                        Index::create()
                            .col(BookMovieAdaptations::BookId)
                            .col(BookMovieAdaptations::Tconst),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adaptations_book")
                            .from(BookMovieAdaptations::Table, BookMovieAdaptations::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_adaptations_movie")
                            .from(BookMovieAdaptations::Table, BookMovieAdaptations::Tconst)
                            .to(Movies::Table, Movies::Tconst)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_adaptations_tconst")
                    .table(BookMovieAdaptations::Table)
                    .col(BookMovieAdaptations::Tconst)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BookMovieAdaptations::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Reviews::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Ratings::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieGenres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(BookGenres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(BookAuthors::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Books::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Authors::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genres::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Authors {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Id,
    Title,
    Description,
    ImageLink,
    Publisher,
    PublishedDate,
}

#[derive(DeriveIden)]
enum BookAuthors {
    Table,
    BookId,
    AuthorId,
}

#[derive(DeriveIden)]
enum BookGenres {
    Table,
    BookId,
    GenreId,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Tconst,
    PrimaryTitle,
    OriginalTitle,
    IsAdult,
    StartYear,
    RuntimeMinutes,
}

#[derive(DeriveIden)]
enum MovieGenres {
    Table,
    Tconst,
    GenreId,
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    Tconst,
    AverageRating,
    NumVotes,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    BookId,
    ReviewerName,
    ReviewText,
    Rating,
    Votes,
}

#[derive(DeriveIden)]
enum BookMovieAdaptations {
    Table,
    BookId,
    Tconst,
}
