//! Test utilities for Stagebook
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Test data generators

use chrono::{DateTime, TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    config::Config,
    db::{
        entities::{artist, genre, show, venue},
        repositories,
    },
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run all migrations
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        seed_database: false,
    }
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    AppState::new(db, test_config())
}

/// Build a UTC timestamp, panicking on an impossible date
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("Invalid test timestamp")
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test venue in the database
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venue::Model {
    let venue = venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom St".to_string()),
        phone: Set(None),
        image_link: Set(None),
        facebook_link: Set(None),
        website: Set(None),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    let artist = artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        phone: Set(None),
        image_link: Set(Some(format!("https://images.example.com/{}.jpg", name.len()))),
        facebook_link: Set(None),
        website: Set(None),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show in the database
pub async fn create_test_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: DateTime<Utc>,
) -> show::Model {
    let show = show::ActiveModel {
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        start_time: Set(start_time),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}

/// Create the named genres, skipping any that already exist
pub async fn create_test_genres(db: &DatabaseConnection, names: &[&str]) -> Vec<genre::Model> {
    repositories::ensure_genres(db, names)
        .await
        .expect("Failed to insert test genres");

    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    repositories::resolve_genres(db, &names)
        .await
        .expect("Failed to load test genres")
}

/// Link a venue to genres directly, bypassing the mutation layer
pub async fn link_venue_genres(db: &DatabaseConnection, venue_id: i32, genres: &[genre::Model]) {
    repositories::replace_venue_genres(db, venue_id, genres)
        .await
        .expect("Failed to link venue genres");
}

/// Link an artist to genres directly, bypassing the mutation layer
pub async fn link_artist_genres(db: &DatabaseConnection, artist_id: i32, genres: &[genre::Model]) {
    repositories::replace_artist_genres(db, artist_id, genres)
        .await
        .expect("Failed to link artist genres");
}
