use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_artists_table::Artists;
use super::m20240101_000003_create_genres_table::Genres;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArtistGenres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ArtistGenres::ArtistId).integer().not_null())
                    .col(ColumnDef::new(ArtistGenres::GenreId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_artist_genres")
                            .col(ArtistGenres::ArtistId)
                            .col(ArtistGenres::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_genres_artist_id")
                            .from(ArtistGenres::Table, ArtistGenres::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_genres_genre_id")
                            .from(ArtistGenres::Table, ArtistGenres::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArtistGenres::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ArtistGenres {
    Table,
    ArtistId,
    GenreId,
}
