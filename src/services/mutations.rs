//! Write-side operations on venues, artists and shows.
//!
//! Each operation consumes a [`UnitOfWork`] and commits it on success. Any
//! early return drops the unit of work, which rolls the transaction back.
//! The `insert_*` helpers do the same writes on any connection and leave the
//! commit to the caller.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

use crate::{
    db::{
        entities::{artist, artist_genre, show, venue, venue_genre},
        repositories, UnitOfWork,
    },
    error::{AppError, Result},
    forms::{ArtistInput, ShowInput, VenueInput},
    services::queries,
};

/// Result of a mutation as reported back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

fn apply_venue(active: &mut venue::ActiveModel, input: VenueInput) {
    active.name = Set(input.name);
    active.city = Set(input.city);
    active.state = Set(input.state);
    active.address = Set(input.address);
    active.phone = Set(input.phone);
    active.image_link = Set(input.image_link);
    active.facebook_link = Set(input.facebook_link);
    active.website = Set(input.website);
    active.seeking_talent = Set(input.seeking_talent);
    active.seeking_description = Set(input.seeking_description);
}

fn apply_artist(active: &mut artist::ActiveModel, input: ArtistInput) {
    active.name = Set(input.name);
    active.city = Set(input.city);
    active.state = Set(input.state);
    active.phone = Set(input.phone);
    active.image_link = Set(input.image_link);
    active.facebook_link = Set(input.facebook_link);
    active.website = Set(input.website);
    active.seeking_venue = Set(input.seeking_venue);
    active.seeking_description = Set(input.seeking_description);
}

pub async fn create_venue(uow: UnitOfWork, input: VenueInput) -> Result<venue::Model> {
    let venue = insert_venue(uow.conn(), input).await?;
    uow.commit().await?;

    tracing::info!("Created venue {} ({})", venue.id, venue.name);
    Ok(venue)
}

/// Insert a venue with its genre links without committing.
pub async fn insert_venue<C: ConnectionTrait>(
    conn: &C,
    input: VenueInput,
) -> Result<venue::Model> {
    let genres = repositories::resolve_genres(conn, &input.genres).await?;

    let mut active = <venue::ActiveModel as Default>::default();
    apply_venue(&mut active, input);
    let venue = active.insert(conn).await?;

    repositories::replace_venue_genres(conn, venue.id, &genres).await?;
    Ok(venue)
}

/// Overwrite a venue's fields and replace its genre set.
pub async fn update_venue(uow: UnitOfWork, id: i32, input: VenueInput) -> Result<venue::Model> {
    let existing = queries::find_venue(uow.conn(), id).await?;
    let genres = repositories::resolve_genres(uow.conn(), &input.genres).await?;

    let mut active: venue::ActiveModel = existing.into();
    apply_venue(&mut active, input);
    let venue = active.update(uow.conn()).await?;

    repositories::replace_venue_genres(uow.conn(), venue.id, &genres).await?;
    uow.commit().await?;

    tracing::info!("Updated venue {} ({})", venue.id, venue.name);
    Ok(venue)
}

/// Delete a venue together with its shows and genre links.
pub async fn delete_venue(uow: UnitOfWork, id: i32) -> Result<venue::Model> {
    let venue = queries::find_venue(uow.conn(), id).await?;

    let shows = show::Entity::delete_many()
        .filter(show::Column::VenueId.eq(id))
        .exec(uow.conn())
        .await?;
    venue_genre::Entity::delete_many()
        .filter(venue_genre::Column::VenueId.eq(id))
        .exec(uow.conn())
        .await?;
    venue::Entity::delete_by_id(id).exec(uow.conn()).await?;
    uow.commit().await?;

    tracing::info!(
        "Deleted venue {} ({}) and {} show(s)",
        venue.id,
        venue.name,
        shows.rows_affected
    );
    Ok(venue)
}

pub async fn create_artist(uow: UnitOfWork, input: ArtistInput) -> Result<artist::Model> {
    let artist = insert_artist(uow.conn(), input).await?;
    uow.commit().await?;

    tracing::info!("Created artist {} ({})", artist.id, artist.name);
    Ok(artist)
}

/// Insert a artist with its genre links without committing.
pub async fn insert_artist<C: ConnectionTrait>(
    conn: &C,
    input: ArtistInput,
) -> Result<artist::Model> {
    let genres = repositories::resolve_genres(conn, &input.genres).await?;

    let mut active = <artist::ActiveModel as Default>::default();
    apply_artist(&mut active, input);
    let artist = active.insert(conn).await?;

    repositories::replace_artist_genres(conn, artist.id, &genres).await?;
    Ok(artist)
}

/// Overwrite an artist's fields and replace its genre set.
pub async fn update_artist(
    uow: UnitOfWork,
    id: i32,
    input: ArtistInput,
) -> Result<artist::Model> {
    let existing = queries::find_artist(uow.conn(), id).await?;
    let genres = repositories::resolve_genres(uow.conn(), &input.genres).await?;

    let mut active: artist::ActiveModel = existing.into();
    apply_artist(&mut active, input);
    let artist = active.update(uow.conn()).await?;

    repositories::replace_artist_genres(uow.conn(), artist.id, &genres).await?;
    uow.commit().await?;

    tracing::info!("Updated artist {} ({})", artist.id, artist.name);
    Ok(artist)
}

/// Delete an artist. Artists that still have shows are left untouched.
pub async fn delete_artist(uow: UnitOfWork, id: i32) -> Result<artist::Model> {
    let artist = queries::find_artist(uow.conn(), id).await?;

    let show_count = show::Entity::find()
        .filter(show::Column::ArtistId.eq(id))
        .count(uow.conn())
        .await?;
    if show_count > 0 {
        uow.rollback().await?;
        return Err(AppError::ReferentialViolation(format!(
            "Artist {} still has {} show(s)",
            id, show_count
        )));
    }

    artist_genre::Entity::delete_many()
        .filter(artist_genre::Column::ArtistId.eq(id))
        .exec(uow.conn())
        .await?;
    artist::Entity::delete_by_id(id).exec(uow.conn()).await?;
    uow.commit().await?;

    tracing::info!("Deleted artist {} ({})", artist.id, artist.name);
    Ok(artist)
}

/// List a show. Unknown venue or artist ids are referential violations.
pub async fn create_show(uow: UnitOfWork, input: ShowInput) -> Result<show::Model> {
    let show = match insert_show(uow.conn(), input).await {
        Ok(show) => show,
        Err(e) => {
            uow.rollback().await?;
            return Err(e);
        }
    };
    uow.commit().await?;

    tracing::info!(
        "Listed show {} (artist {} at venue {})",
        show.id,
        show.artist_id,
        show.venue_id
    );
    Ok(show)
}

/// Insert a show after checking both ends exist, without committing.
pub async fn insert_show<C: ConnectionTrait>(conn: &C, input: ShowInput) -> Result<show::Model> {
    let venue_exists = venue::Entity::find_by_id(input.venue_id)
        .one(conn)
        .await?
        .is_some();
    let artist_exists = artist::Entity::find_by_id(input.artist_id)
        .one(conn)
        .await?
        .is_some();
    if !venue_exists || !artist_exists {
        return Err(AppError::ReferentialViolation(format!(
            "Show references missing venue {} or artist {}",
            input.venue_id, input.artist_id
        )));
    }

    let show = show::ActiveModel {
        artist_id: Set(input.artist_id),
        venue_id: Set(input.venue_id),
        start_time: Set(input.start_time.unwrap_or_else(Utc::now)),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(show)
}
