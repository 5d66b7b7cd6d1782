//! Read-only JSON views over the same queries the HTML pages use.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::{
    error::Result,
    forms::SearchForm,
    services::queries::{
        self, ArtistDetail, ArtistSummary, SearchResults, ShowListing, VenueArea, VenueDetail,
    },
    state::AppState,
};

/// Venues grouped by (city, state)
pub async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<VenueArea>>> {
    let areas = queries::venues_by_area(&state.db, Utc::now()).await?;
    Ok(Json(areas))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Query(search): Query<SearchForm>,
) -> Result<Json<SearchResults>> {
    let results = queries::search_venues(&state.db, &search.search_term, Utc::now()).await?;
    Ok(Json(results))
}

pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>> {
    let detail = queries::venue_detail(&state.db, id, Utc::now()).await?;
    Ok(Json(detail))
}

pub async fn list_artists(State(state): State<AppState>) -> Result<Json<Vec<ArtistSummary>>> {
    let artists = queries::list_artists(&state.db).await?;
    Ok(Json(artists))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Query(search): Query<SearchForm>,
) -> Result<Json<SearchResults>> {
    let results = queries::search_artists(&state.db, &search.search_term).await?;
    Ok(Json(results))
}

pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>> {
    let detail = queries::artist_detail(&state.db, id, Utc::now()).await?;
    Ok(Json(detail))
}

pub async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<ShowListing>>> {
    let shows = queries::list_shows(&state.db).await?;
    Ok(Json(shows))
}
