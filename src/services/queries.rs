//! Read-side listings, searches and detail views.
//!
//! Past/upcoming classification always compares against the `now` passed in
//! by the caller: a show is upcoming iff `start_time > now`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::{
    db::{
        entities::{artist, show, venue},
        repositories,
    },
    error::{AppError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

/// A show as listed on a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show as listed on an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: venue::Model,
    pub genres: Vec<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: artist::Model,
    pub genres: Vec<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Split items into (past, upcoming) relative to `now`.
fn partition_shows<T>(
    items: impl IntoIterator<Item = (show::Model, T)>,
    now: DateTime<Utc>,
) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for (show, item) in items {
        if show.is_upcoming(now) {
            upcoming.push(item);
        } else {
            past.push(item);
        }
    }
    (past, upcoming)
}

/// Substring match on Unicode-lowercased text.
///
/// Done in Rust since SQLite's `LOWER` and `LIKE` only fold ASCII.
fn name_contains(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

/// Number of upcoming shows per venue id, for the given venues only.
async fn upcoming_counts<C: ConnectionTrait>(
    conn: &C,
    venue_ids: Vec<i32>,
    now: DateTime<Utc>,
) -> Result<HashMap<i32, usize>> {
    let mut counts = HashMap::new();
    if venue_ids.is_empty() {
        return Ok(counts);
    }

    let shows = show::Entity::find()
        .filter(show::Column::VenueId.is_in(venue_ids))
        .all(conn)
        .await?;

    for show in shows.iter().filter(|s| s.is_upcoming(now)) {
        *counts.entry(show.venue_id).or_insert(0) += 1;
    }

    Ok(counts)
}

/// All venues bucketed by (city, state), buckets in first-seen order by venue id.
pub async fn venues_by_area<C: ConnectionTrait>(
    conn: &C,
    now: DateTime<Utc>,
) -> Result<Vec<VenueArea>> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .all(conn)
        .await?;

    let counts = upcoming_counts(conn, venues.iter().map(|v| v.id).collect(), now).await?;

    let mut areas: Vec<VenueArea> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for venue in venues {
        let key = (venue.city.clone(), venue.state.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            areas.push(VenueArea {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            areas.len() - 1
        });

        areas[slot].venues.push(VenueSummary {
            id: venue.id,
            num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
            name: venue.name,
        });
    }

    Ok(areas)
}

/// Venues whose name contains `term`, ignoring case.
pub async fn search_venues<C: ConnectionTrait>(
    conn: &C,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let needle = term.to_lowercase();
    let venues: Vec<venue::Model> = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .filter(|v| name_contains(&v.name, &needle))
        .collect();

    let counts = upcoming_counts(conn, venues.iter().map(|v| v.id).collect(), now).await?;

    let data: Vec<SearchHit> = venues
        .into_iter()
        .map(|v| SearchHit {
            num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
            id: v.id,
            name: v.name,
        })
        .collect();

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

/// Artists whose name contains `term`, ignoring case.
///
/// `num_upcoming_shows` is always 0 here, unlike venue search.
pub async fn search_artists<C: ConnectionTrait>(conn: &C, term: &str) -> Result<SearchResults> {
    let needle = term.to_lowercase();
    let artists: Vec<artist::Model> = artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .filter(|a| name_contains(&a.name, &needle))
        .collect();

    let data: Vec<SearchHit> = artists
        .into_iter()
        .map(|a| SearchHit {
            id: a.id,
            name: a.name,
            num_upcoming_shows: 0,
        })
        .collect();

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

pub async fn list_artists<C: ConnectionTrait>(conn: &C) -> Result<Vec<ArtistSummary>> {
    Ok(artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(|a| ArtistSummary {
            id: a.id,
            name: a.name,
        })
        .collect())
}

pub async fn find_venue<C: ConnectionTrait>(conn: &C, id: i32) -> Result<venue::Model> {
    venue::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))
}

pub async fn find_artist<C: ConnectionTrait>(conn: &C, id: i32) -> Result<artist::Model> {
    artist::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))
}

/// Venue with its genre names, for prefilling the edit form.
pub async fn venue_for_edit<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<(venue::Model, Vec<String>)> {
    let venue = find_venue(conn, id).await?;
    let genres = repositories::venue_genre_names(conn, &venue).await?;
    Ok((venue, genres))
}

/// Artist with its genre names, for prefilling the edit form.
pub async fn artist_for_edit<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<(artist::Model, Vec<String>)> {
    let artist = find_artist(conn, id).await?;
    let genres = repositories::artist_genre_names(conn, &artist).await?;
    Ok((artist, genres))
}

pub async fn venue_detail<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<VenueDetail> {
    let venue = find_venue(conn, id).await?;
    let genres = repositories::venue_genre_names(conn, &venue).await?;

    let shows = show::Entity::find()
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(artist::Entity)
        .all(conn)
        .await?;

    let entries = shows.into_iter().filter_map(|(show, artist)| {
        let artist = artist?;
        let entry = VenueShow {
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: show.start_time,
        };
        Some((show, entry))
    });
    let (past_shows, upcoming_shows) = partition_shows(entries, now);

    Ok(VenueDetail {
        venue,
        genres,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

pub async fn artist_detail<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<ArtistDetail> {
    let artist = find_artist(conn, id).await?;
    let genres = repositories::artist_genre_names(conn, &artist).await?;

    let shows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(venue::Entity)
        .all(conn)
        .await?;

    let entries = shows.into_iter().filter_map(|(show, venue)| {
        let venue = venue?;
        let entry = ArtistShow {
            venue_id: venue.id,
            venue_name: venue.name,
            venue_image_link: venue.image_link,
            start_time: show.start_time,
        };
        Some((show, entry))
    });
    let (past_shows, upcoming_shows) = partition_shows(entries, now);

    Ok(ArtistDetail {
        artist,
        genres,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Every show with its venue and artist display fields.
pub async fn list_shows<C: ConnectionTrait>(conn: &C) -> Result<Vec<ShowListing>> {
    let shows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .find_also_related(venue::Entity)
        .all(conn)
        .await?;
    if shows.is_empty() {
        return Ok(Vec::new());
    }

    let artist_ids: Vec<i32> = shows.iter().map(|(s, _)| s.artist_id).collect();
    let artists: HashMap<i32, artist::Model> = artist::Entity::find()
        .filter(artist::Column::Id.is_in(artist_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(shows
        .into_iter()
        .filter_map(|(show, venue)| {
            let venue = venue?;
            let artist = artists.get(&show.artist_id)?;
            Some(ShowListing {
                venue_id: venue.id,
                venue_name: venue.name,
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
                start_time: show.start_time,
            })
        })
        .collect())
}
