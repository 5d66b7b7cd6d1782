//! Integration tests for the write-side operations
//!
//! Every mutation runs inside a UnitOfWork; failures must leave the store
//! exactly as it was.

use sea_orm::{EntityTrait, PaginatorTrait};

use stagebook::db::entities::{artist, artist_genre, show, venue, venue_genre};
use stagebook::db::UnitOfWork;
use stagebook::error::AppError;
use stagebook::forms::{ArtistInput, ShowInput, VenueInput};
use stagebook::seed;
use stagebook::services::{mutations, queries};
use stagebook::test_utils::*;

fn venue_input(name: &str, genres: &[&str]) -> VenueInput {
    VenueInput {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        image_link: None,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        facebook_link: None,
        website: Some("https://www.themusicalhop.com".to_string()),
        seeking_talent: true,
        seeking_description: Some("We are on the lookout for a local artist".to_string()),
    }
}

fn artist_input(name: &str, genres: &[&str]) -> ArtistInput {
    ArtistInput {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: None,
        image_link: None,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        facebook_link: None,
        website: None,
        seeking_venue: false,
        seeking_description: None,
    }
}

#[tokio::test]
async fn test_create_venue_resolves_known_genres_only() {
    let db = setup_test_db().await;
    create_test_genres(&db, &["Rock n Roll"]).await;

    let input = venue_input("The Musical Hop", &["Rock n Roll", "Nonexistent"]);
    let venue = UnitOfWork::run(&db, |uow| mutations::create_venue(uow, input))
        .await
        .unwrap();

    let (stored, genres) = queries::venue_for_edit(&db, venue.id).await.unwrap();
    assert_eq!(stored.name, "The Musical Hop");
    assert_eq!(stored.website.as_deref(), Some("https://www.themusicalhop.com"));
    assert!(stored.seeking_talent);
    assert_eq!(genres, vec!["Rock n Roll".to_string()]);
    assert_eq!(venue_genre::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_venue_replaces_fields_and_genres() {
    let db = setup_test_db().await;
    create_test_genres(&db, &["Jazz", "Folk", "Reggae"]).await;
    let input = venue_input("The Musical Hop", &["Jazz", "Folk"]);
    let venue = UnitOfWork::run(&db, |uow| mutations::create_venue(uow, input))
        .await
        .unwrap();

    let mut update = venue_input("The Musical Hop II", &["Reggae"]);
    update.seeking_talent = false;
    update.seeking_description = None;
    let updated = UnitOfWork::run(&db, |uow| mutations::update_venue(uow, venue.id, update))
        .await
        .unwrap();

    assert_eq!(updated.id, venue.id);
    assert_eq!(updated.name, "The Musical Hop II");
    assert!(!updated.seeking_talent);
    assert_eq!(updated.seeking_description, None);

    let (_, genres) = queries::venue_for_edit(&db, venue.id).await.unwrap();
    assert_eq!(genres, vec!["Reggae".to_string()]);
}

#[tokio::test]
async fn test_update_missing_venue_is_not_found() {
    let db = setup_test_db().await;

    let input = venue_input("Ghost Venue", &[]);
    let err = UnitOfWork::run(&db, |uow| mutations::update_venue(uow, 7, input))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_artist_with_no_genres_clears_associations() {
    let db = setup_test_db().await;
    create_test_genres(&db, &["Rock n Roll", "Blues"]).await;
    let input = artist_input("Guns N Petals", &["Rock n Roll", "Blues"]);
    let artist = UnitOfWork::run(&db, |uow| mutations::create_artist(uow, input))
        .await
        .unwrap();
    assert_eq!(artist_genre::Entity::find().count(&db).await.unwrap(), 2);

    let update = artist_input("Guns N Petals", &[]);
    UnitOfWork::run(&db, |uow| mutations::update_artist(uow, artist.id, update))
        .await
        .unwrap();

    assert_eq!(artist_genre::Entity::find().count(&db).await.unwrap(), 0);
    let (_, genres) = queries::artist_for_edit(&db, artist.id).await.unwrap();
    assert!(genres.is_empty());
}

#[tokio::test]
async fn test_delete_venue_removes_its_shows() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let other = create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let genres = create_test_genres(&db, &["Jazz"]).await;
    link_venue_genres(&db, venue.id, &genres).await;
    create_test_show(&db, artist.id, venue.id, utc(2019, 5, 21, 21, 30)).await;
    create_test_show(&db, artist.id, venue.id, utc(2099, 1, 1, 20, 0)).await;
    create_test_show(&db, artist.id, other.id, utc(2099, 1, 1, 20, 0)).await;

    let deleted = UnitOfWork::run(&db, |uow| mutations::delete_venue(uow, venue.id))
        .await
        .unwrap();

    assert_eq!(deleted.name, "The Musical Hop");
    assert!(venue::Entity::find_by_id(venue.id).one(&db).await.unwrap().is_none());
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(venue_genre::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(artist::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_missing_venue_is_not_found() {
    let db = setup_test_db().await;

    let err = UnitOfWork::run(&db, |uow| mutations::delete_venue(uow, 404))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_artist_with_shows_is_refused() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let genres = create_test_genres(&db, &["Rock n Roll"]).await;
    link_artist_genres(&db, artist.id, &genres).await;
    create_test_show(&db, artist.id, venue.id, utc(2019, 5, 21, 21, 30)).await;

    let err = UnitOfWork::run(&db, |uow| mutations::delete_artist(uow, artist.id))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ReferentialViolation(_)));
    assert_eq!(artist::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(artist_genre::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_artist_without_shows() {
    let db = setup_test_db().await;
    let artist = create_test_artist(&db, "The Wild Sax Band").await;
    let genres = create_test_genres(&db, &["Jazz"]).await;
    link_artist_genres(&db, artist.id, &genres).await;

    UnitOfWork::run(&db, |uow| mutations::delete_artist(uow, artist.id))
        .await
        .unwrap();

    assert_eq!(artist::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(artist_genre::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_show() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;

    let input = ShowInput {
        artist_id: artist.id,
        venue_id: venue.id,
        start_time: Some(utc(2035, 4, 1, 20, 0)),
    };
    let show = UnitOfWork::run(&db, |uow| mutations::create_show(uow, input))
        .await
        .unwrap();

    assert_eq!(show.venue_id, venue.id);
    assert_eq!(show.artist_id, artist.id);
    assert_eq!(show.start_time, utc(2035, 4, 1, 20, 0));
}

#[tokio::test]
async fn test_create_show_defaults_start_time_to_now() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let before = chrono::Utc::now();

    let input = ShowInput {
        artist_id: artist.id,
        venue_id: venue.id,
        start_time: None,
    };
    let show = UnitOfWork::run(&db, |uow| mutations::create_show(uow, input))
        .await
        .unwrap();

    assert!(show.start_time >= before);
    assert!(show.start_time <= chrono::Utc::now());
}

#[tokio::test]
async fn test_create_show_against_missing_venue() {
    let db = setup_test_db().await;
    let artist = create_test_artist(&db, "Guns N Petals").await;

    let input = ShowInput {
        artist_id: artist.id,
        venue_id: 99,
        start_time: Some(utc(2035, 4, 1, 20, 0)),
    };
    let err = UnitOfWork::run(&db, |uow| mutations::create_show(uow, input))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ReferentialViolation(_)));
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_dropped_unit_of_work_rolls_back() {
    let db = setup_test_db().await;

    {
        let uow = UnitOfWork::begin(&db).await.unwrap();
        create_test_venue_in(&uow).await;
        // Dropped without commit
    }

    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 0);
}

async fn create_test_venue_in(uow: &UnitOfWork) {
    use sea_orm::{ActiveModelTrait, Set};

    venue::ActiveModel {
        name: Set("Uncommitted".to_string()),
        city: Set("Austin".to_string()),
        state: Set("TX".to_string()),
        address: Set("1 Main St".to_string()),
        seeking_talent: Set(false),
        ..Default::default()
    }
    .insert(uow.conn())
    .await
    .unwrap();
}

#[tokio::test]
async fn test_seed_demo_data() {
    let db = setup_test_db().await;

    seed::seed_demo_data(&db).await.unwrap();
    // Seeding twice replaces rather than duplicates
    seed::seed_demo_data(&db).await.unwrap();

    let areas = queries::venues_by_area(&db, utc(2024, 1, 1, 0, 0)).await.unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 3);
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 2);

    let results = queries::search_artists(&db, "Guns").await.unwrap();
    assert_eq!(results.count, 1);
    let (_, genres) = queries::artist_for_edit(&db, results.data[0].id).await.unwrap();
    assert_eq!(genres, vec!["Rock n Roll".to_string()]);
}

#[tokio::test]
async fn test_failed_batch_leaves_existing_listings() {
    let db = setup_test_db().await;
    let existing = create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;

    let uow = UnitOfWork::begin(&db).await.unwrap();
    show::Entity::delete_many().exec(uow.conn()).await.unwrap();
    venue::Entity::delete_many().exec(uow.conn()).await.unwrap();
    mutations::insert_venue(uow.conn(), venue_input("The Musical Hop", &[]))
        .await
        .unwrap();
    let artist = mutations::insert_artist(uow.conn(), artist_input("Guns N Petals", &[]))
        .await
        .unwrap();

    let err = mutations::insert_show(
        uow.conn(),
        ShowInput {
            artist_id: artist.id,
            venue_id: 9999,
            start_time: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ReferentialViolation(_)));
    uow.rollback().await.unwrap();

    let venues = venue::Entity::find().all(&db).await.unwrap();
    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0].id, existing.id);
    assert_eq!(artist::Entity::find().count(&db).await.unwrap(), 0);
}
