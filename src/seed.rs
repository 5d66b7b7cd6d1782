//! Genre vocabulary and demo listings.

use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::{
    db::{
        entities::{artist, artist_genre, show, venue, venue_genre},
        repositories, UnitOfWork,
    },
    error::{AppError, Result},
    forms::{ArtistInput, ShowInput, VenueInput},
    services::mutations,
};

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Insert the genre vocabulary. Existing names are left alone.
pub async fn seed_genres(db: &DatabaseConnection) -> Result<usize> {
    UnitOfWork::run(db, |uow| async move {
        let inserted = repositories::ensure_genres(uow.conn(), GENRES).await?;
        uow.commit().await?;
        Ok::<_, AppError>(inserted)
    })
    .await
}

fn demo_venue(
    name: &str,
    city: &str,
    state: &str,
    address: &str,
    phone: &str,
    facebook: &str,
) -> VenueInput {
    VenueInput {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: address.to_string(),
        phone: Some(phone.to_string()),
        image_link: None,
        genres: Vec::new(),
        facebook_link: Some(facebook.to_string()),
        website: None,
        seeking_talent: false,
        seeking_description: None,
    }
}

/// Wipe listings and load the demo venues, artist and shows.
///
/// The wipe and the inserts share one unit of work, so a failure leaves the
/// previous listings in place.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<()> {
    seed_genres(db).await?;

    let uow = UnitOfWork::begin(db).await?;
    show::Entity::delete_many().exec(uow.conn()).await?;
    venue_genre::Entity::delete_many().exec(uow.conn()).await?;
    artist_genre::Entity::delete_many().exec(uow.conn()).await?;
    artist::Entity::delete_many().exec(uow.conn()).await?;
    venue::Entity::delete_many().exec(uow.conn()).await?;
    tracing::debug!("Cleared existing listings");

    let venues = [
        demo_venue(
            "The Musical Hop",
            "San Francisco",
            "CA",
            "1015 Folsom St",
            "123-123-1234",
            "https://www.facebook.com/TheMusicalHop",
        ),
        demo_venue(
            "The Dueling Pianos Bar",
            "New York",
            "NY",
            "335 Delancey Street",
            "914-003-1132",
            "https://www.facebook.com/theduelingpianos",
        ),
        demo_venue(
            "Park Square Live Music & Coffee",
            "San Francisco",
            "CA",
            "34 Whiskey Moore Ave",
            "415-000-1234",
            "https://www.facebook.com/ParkSquareLiveMusicAndCoffee",
        ),
    ];
    let mut venue_ids = Vec::with_capacity(venues.len());
    for input in venues {
        let venue = mutations::insert_venue(uow.conn(), input).await?;
        venue_ids.push(venue.id);
    }

    let guns_n_petals = ArtistInput {
        name: "Guns N Petals".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: Some("326-123-5000".to_string()),
        image_link: None,
        genres: vec!["Rock n Roll".to_string()],
        facebook_link: None,
        website: None,
        seeking_venue: false,
        seeking_description: None,
    };
    let artist = mutations::insert_artist(uow.conn(), guns_n_petals).await?;

    let shows = [
        (venue_ids[0], Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).single()),
        (venue_ids[2], Utc.with_ymd_and_hms(2028, 12, 1, 20, 0, 0).single()),
    ];
    for (venue_id, start_time) in shows {
        let input = ShowInput {
            artist_id: artist.id,
            venue_id,
            start_time,
        };
        mutations::insert_show(uow.conn(), input).await?;
    }

    uow.commit().await?;
    tracing::info!("Seeded demo listings");
    Ok(())
}
