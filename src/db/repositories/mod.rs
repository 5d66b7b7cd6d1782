//! Genre vocabulary lookups and association-table maintenance.
//!
//! Functions are generic over the connection so they run equally against the
//! pool (reads) or inside a [`UnitOfWork`](crate::db::UnitOfWork) (writes).

use std::collections::HashSet;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};

use crate::db::entities::{artist, artist_genre, genre, venue, venue_genre};
use crate::error::Result;

/// All genre names, alphabetically.
pub async fn all_genre_names<C: ConnectionTrait>(conn: &C) -> Result<Vec<String>> {
    Ok(genre::Entity::find()
        .order_by_asc(genre::Column::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(|g| g.name)
        .collect())
}

/// Map submitted names to existing genre rows by exact name.
///
/// Names without a matching row are dropped; genres are never created here.
pub async fn resolve_genres<C: ConnectionTrait>(
    conn: &C,
    names: &[String],
) -> Result<Vec<genre::Model>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let genres = genre::Entity::find()
        .filter(genre::Column::Name.is_in(names.iter().map(String::as_str)))
        .order_by_asc(genre::Column::Name)
        .all(conn)
        .await?;

    let requested: HashSet<&str> = names.iter().map(String::as_str).collect();
    if genres.len() < requested.len() {
        tracing::debug!(
            "Dropped {} unknown genre name(s) from {:?}",
            requested.len() - genres.len(),
            names
        );
    }

    Ok(genres)
}

pub async fn venue_genre_names<C: ConnectionTrait>(
    conn: &C,
    venue: &venue::Model,
) -> Result<Vec<String>> {
    Ok(venue
        .find_related(genre::Entity)
        .order_by_asc(genre::Column::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(|g| g.name)
        .collect())
}

pub async fn artist_genre_names<C: ConnectionTrait>(
    conn: &C,
    artist: &artist::Model,
) -> Result<Vec<String>> {
    Ok(artist
        .find_related(genre::Entity)
        .order_by_asc(genre::Column::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(|g| g.name)
        .collect())
}

/// Replace a venue's genre set wholesale. An empty slice clears it.
pub async fn replace_venue_genres<C: ConnectionTrait>(
    conn: &C,
    venue_id: i32,
    genres: &[genre::Model],
) -> Result<()> {
    venue_genre::Entity::delete_many()
        .filter(venue_genre::Column::VenueId.eq(venue_id))
        .exec(conn)
        .await?;

    if genres.is_empty() {
        return Ok(());
    }

    let links = genres.iter().map(|g| venue_genre::ActiveModel {
        venue_id: Set(venue_id),
        genre_id: Set(g.id),
    });
    venue_genre::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

/// Replace an artist's genre set wholesale. An empty slice clears it.
pub async fn replace_artist_genres<C: ConnectionTrait>(
    conn: &C,
    artist_id: i32,
    genres: &[genre::Model],
) -> Result<()> {
    artist_genre::Entity::delete_many()
        .filter(artist_genre::Column::ArtistId.eq(artist_id))
        .exec(conn)
        .await?;

    if genres.is_empty() {
        return Ok(());
    }

    let links = genres.iter().map(|g| artist_genre::ActiveModel {
        artist_id: Set(artist_id),
        genre_id: Set(g.id),
    });
    artist_genre::Entity::insert_many(links)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

/// Insert any genre names not yet present. Used for seeding the vocabulary.
pub async fn ensure_genres<C: ConnectionTrait>(conn: &C, names: &[&str]) -> Result<usize> {
    let existing = all_genre_names(conn).await?;
    let missing: Vec<genre::ActiveModel> = names
        .iter()
        .filter(|name| !existing.iter().any(|e| e == *name))
        .map(|name| genre::ActiveModel {
            name: Set((*name).to_string()),
            ..Default::default()
        })
        .collect();

    let inserted = missing.len();
    if inserted > 0 {
        genre::Entity::insert_many(missing)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(inserted)
}
