use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_venues_table::Venues;
use super::m20240101_000003_create_genres_table::Genres;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VenueGenres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(VenueGenres::VenueId).integer().not_null())
                    .col(ColumnDef::new(VenueGenres::GenreId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_venue_genres")
                            .col(VenueGenres::VenueId)
                            .col(VenueGenres::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_venue_genres_venue_id")
                            .from(VenueGenres::Table, VenueGenres::VenueId)
                            .to(Venues::Table, Venues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_venue_genres_genre_id")
                            .from(VenueGenres::Table, VenueGenres::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VenueGenres::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VenueGenres {
    Table,
    VenueId,
    GenreId,
}
