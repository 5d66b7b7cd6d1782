//! Integration tests for the read-side queries
//!
//! Covers grouping by location, name search, detail views with the
//! past/upcoming split, and the flat show listing.

use pretty_assertions::assert_eq;

use stagebook::error::AppError;
use stagebook::services::queries;
use stagebook::test_utils::*;

/// The three demo venues plus one artist, in insertion order.
async fn seed_venues(db: &sea_orm::DatabaseConnection) -> (i32, i32, i32) {
    let hop = create_test_venue(db, "The Musical Hop", "San Francisco", "CA").await;
    let pianos = create_test_venue(db, "The Dueling Pianos Bar", "New York", "NY").await;
    let park = create_test_venue(db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    (hop.id, pianos.id, park.id)
}

#[tokio::test]
async fn test_venues_by_area_empty() {
    let db = setup_test_db().await;

    let areas = queries::venues_by_area(&db, utc(2024, 1, 1, 0, 0)).await.unwrap();

    assert!(areas.is_empty());
}

#[tokio::test]
async fn test_venues_by_area_groups_by_city_and_state() {
    let db = setup_test_db().await;
    let (hop, pianos, park) = seed_venues(&db).await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_show(&db, artist.id, park, utc(2035, 4, 1, 20, 0)).await;
    create_test_show(&db, artist.id, park, utc(2035, 4, 8, 20, 0)).await;
    create_test_show(&db, artist.id, hop, utc(2019, 5, 21, 21, 30)).await;

    let areas = queries::venues_by_area(&db, utc(2024, 1, 1, 0, 0)).await.unwrap();

    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0].city, "San Francisco");
    assert_eq!(areas[0].state, "CA");
    assert_eq!(areas[1].city, "New York");

    let sf: Vec<(i32, usize)> = areas[0]
        .venues
        .iter()
        .map(|v| (v.id, v.num_upcoming_shows))
        .collect();
    assert_eq!(sf, vec![(hop, 0), (park, 2)]);

    assert_eq!(areas[1].venues.len(), 1);
    assert_eq!(areas[1].venues[0].id, pianos);
    assert_eq!(areas[1].venues[0].name, "The Dueling Pianos Bar");
}

#[tokio::test]
async fn test_same_city_in_different_states_are_separate_areas() {
    let db = setup_test_db().await;
    create_test_venue(&db, "Ryman", "Portland", "OR").await;
    create_test_venue(&db, "State Theatre", "Portland", "ME").await;

    let areas = queries::venues_by_area(&db, utc(2024, 1, 1, 0, 0)).await.unwrap();

    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0].state, "OR");
    assert_eq!(areas[1].state, "ME");
}

#[tokio::test]
async fn test_search_venues_substring() {
    let db = setup_test_db().await;
    let (hop, _, park) = seed_venues(&db).await;

    let results = queries::search_venues(&db, "Hop", utc(2024, 1, 1, 0, 0)).await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].id, hop);
    assert_eq!(results.data[0].name, "The Musical Hop");

    let results = queries::search_venues(&db, "Music", utc(2024, 1, 1, 0, 0)).await.unwrap();
    let ids: Vec<i32> = results.data.iter().map(|hit| hit.id).collect();
    assert_eq!(results.count, 2);
    assert_eq!(ids, vec![hop, park]);
}

#[tokio::test]
async fn test_search_venues_is_case_insensitive() {
    let db = setup_test_db().await;
    let (hop, _, _) = seed_venues(&db).await;

    for term in ["hop", "HOP", "mUsIcAl h"] {
        let results = queries::search_venues(&db, term, utc(2024, 1, 1, 0, 0)).await.unwrap();
        assert_eq!(results.count, 1, "term {:?}", term);
        assert_eq!(results.data[0].id, hop);
    }
}

#[tokio::test]
async fn test_search_venues_folds_non_ascii_case() {
    let db = setup_test_db().await;
    seed_venues(&db).await;
    let elan = create_test_venue(&db, "ÉLAN Hall", "Montréal", "NY").await;

    for term in ["ÉLAN", "élan", "Élan h", "lan hall"] {
        let results = queries::search_venues(&db, term, utc(2024, 1, 1, 0, 0)).await.unwrap();
        assert_eq!(results.count, 1, "term {:?}", term);
        assert_eq!(results.data[0].id, elan.id);
    }
}

#[tokio::test]
async fn test_search_artists_folds_non_ascii_case() {
    let db = setup_test_db().await;
    let artist = create_test_artist(&db, "Sigur Rós").await;
    create_test_artist(&db, "Matt Quevedo").await;

    for term in ["Sigur Rós", "RÓS", "rós"] {
        let results = queries::search_artists(&db, term).await.unwrap();
        assert_eq!(results.count, 1, "term {:?}", term);
        assert_eq!(results.data[0].id, artist.id);
    }
}

#[tokio::test]
async fn test_search_venues_empty_term_matches_all() {
    let db = setup_test_db().await;
    seed_venues(&db).await;

    let results = queries::search_venues(&db, "", utc(2024, 1, 1, 0, 0)).await.unwrap();

    assert_eq!(results.count, 3);
    assert_eq!(results.data.len(), 3);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let db = setup_test_db().await;
    seed_venues(&db).await;
    create_test_venue(&db, "100% Jazz", "Chicago", "IL").await;

    let results = queries::search_venues(&db, "%", utc(2024, 1, 1, 0, 0)).await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].name, "100% Jazz");

    let results = queries::search_venues(&db, "_", utc(2024, 1, 1, 0, 0)).await.unwrap();
    assert_eq!(results.count, 0);
}

#[tokio::test]
async fn test_search_venues_counts_upcoming_shows() {
    let db = setup_test_db().await;
    let (hop, _, _) = seed_venues(&db).await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_show(&db, artist.id, hop, utc(2019, 5, 21, 21, 30)).await;
    create_test_show(&db, artist.id, hop, utc(2099, 1, 1, 20, 0)).await;

    let results = queries::search_venues(&db, "Hop", utc(2024, 1, 1, 0, 0)).await.unwrap();

    assert_eq!(results.data[0].num_upcoming_shows, 1);
}

#[tokio::test]
async fn test_search_artists_always_reports_zero_upcoming() {
    let db = setup_test_db().await;
    let (hop, _, _) = seed_venues(&db).await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_artist(&db, "Matt Quevedo").await;
    create_test_show(&db, artist.id, hop, utc(2099, 1, 1, 20, 0)).await;

    let results = queries::search_artists(&db, "petals").await.unwrap();

    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].id, artist.id);
    assert_eq!(results.data[0].num_upcoming_shows, 0);
}

#[tokio::test]
async fn test_list_artists() {
    let db = setup_test_db().await;
    let first = create_test_artist(&db, "Guns N Petals").await;
    let second = create_test_artist(&db, "The Wild Sax Band").await;

    let artists = queries::list_artists(&db).await.unwrap();

    let names: Vec<(i32, &str)> = artists.iter().map(|a| (a.id, a.name.as_str())).collect();
    assert_eq!(
        names,
        vec![(first.id, "Guns N Petals"), (second.id, "The Wild Sax Band")]
    );
}

#[tokio::test]
async fn test_venue_detail_partitions_shows() {
    let db = setup_test_db().await;
    let (hop, _, _) = seed_venues(&db).await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_show(&db, artist.id, hop, utc(2019, 5, 21, 21, 30)).await;
    create_test_show(&db, artist.id, hop, utc(2099, 1, 1, 20, 0)).await;

    let detail = queries::venue_detail(&db, hop, utc(2024, 1, 1, 0, 0)).await.unwrap();

    assert_eq!(detail.venue.name, "The Musical Hop");
    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.upcoming_shows_count, 1);
    assert_eq!(detail.past_shows[0].start_time, utc(2019, 5, 21, 21, 30));
    assert_eq!(detail.upcoming_shows[0].start_time, utc(2099, 1, 1, 20, 0));
    assert_eq!(detail.upcoming_shows[0].artist_id, artist.id);
    assert_eq!(detail.upcoming_shows[0].artist_name, "Guns N Petals");
    assert_eq!(detail.upcoming_shows[0].artist_image_link, artist.image_link);
}

#[tokio::test]
async fn test_show_starting_now_is_past() {
    let db = setup_test_db().await;
    let (hop, _, _) = seed_venues(&db).await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let start = utc(2030, 6, 1, 20, 0);
    create_test_show(&db, artist.id, hop, start).await;

    let detail = queries::venue_detail(&db, hop, start).await.unwrap();
    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.upcoming_shows_count, 0);

    let detail = queries::artist_detail(&db, artist.id, utc(2030, 6, 1, 19, 59))
        .await
        .unwrap();
    assert_eq!(detail.past_shows_count, 0);
    assert_eq!(detail.upcoming_shows_count, 1);
}

#[tokio::test]
async fn test_artist_detail_lists_venues_and_genres() {
    let db = setup_test_db().await;
    let (hop, _, park) = seed_venues(&db).await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let genres = create_test_genres(&db, &["Rock n Roll", "Blues"]).await;
    link_artist_genres(&db, artist.id, &genres).await;
    create_test_show(&db, artist.id, hop, utc(2019, 5, 21, 21, 30)).await;
    create_test_show(&db, artist.id, park, utc(2099, 1, 1, 20, 0)).await;

    let detail = queries::artist_detail(&db, artist.id, utc(2024, 1, 1, 0, 0))
        .await
        .unwrap();

    assert_eq!(detail.genres, vec!["Blues".to_string(), "Rock n Roll".to_string()]);
    assert_eq!(detail.past_shows[0].venue_id, hop);
    assert_eq!(detail.past_shows[0].venue_name, "The Musical Hop");
    assert_eq!(detail.upcoming_shows[0].venue_id, park);
    assert_eq!(
        detail.upcoming_shows[0].venue_name,
        "Park Square Live Music & Coffee"
    );
}

#[tokio::test]
async fn test_detail_of_missing_venue_is_not_found() {
    let db = setup_test_db().await;

    let err = queries::venue_detail(&db, 42, utc(2024, 1, 1, 0, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_venue_for_edit_includes_genres() {
    let db = setup_test_db().await;
    let (hop, _, _) = seed_venues(&db).await;
    let genres = create_test_genres(&db, &["Jazz", "Classical"]).await;
    link_venue_genres(&db, hop, &genres).await;

    let (venue, names) = queries::venue_for_edit(&db, hop).await.unwrap();

    assert_eq!(venue.id, hop);
    assert_eq!(names, vec!["Classical".to_string(), "Jazz".to_string()]);
}

#[tokio::test]
async fn test_list_shows_joins_names() {
    let db = setup_test_db().await;
    let (hop, _, park) = seed_venues(&db).await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_show(&db, artist.id, park, utc(2099, 1, 1, 20, 0)).await;
    create_test_show(&db, artist.id, hop, utc(2019, 5, 21, 21, 30)).await;

    let shows = queries::list_shows(&db).await.unwrap();

    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0].venue_name, "The Musical Hop");
    assert_eq!(shows[0].artist_name, "Guns N Petals");
    assert_eq!(shows[0].artist_image_link, artist.image_link);
    assert_eq!(shows[1].venue_id, park);
}

#[tokio::test]
async fn test_list_shows_empty() {
    let db = setup_test_db().await;

    assert!(queries::list_shows(&db).await.unwrap().is_empty());
}
