//! Submitted form data and its validation into typed inputs.
//!
//! Raw forms keep every field as text so a bad value produces a field error
//! instead of an extractor rejection. `validate` turns them into the typed
//! inputs consumed by the mutation layer.

use std::{collections::BTreeMap, fmt, sync::OnceLock};

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::Deserialize;

use crate::db::entities::{artist, venue};

pub const STATES: &[&str] = &[
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL",
    "IN", "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE",
    "NH", "NJ", "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VA", "VT", "WA", "WI", "WV", "WY",
];

const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"^\+?\(?[0-9][0-9 ().-]{5,18}[0-9]$").expect("phone pattern is valid")
    })
}

/// Field-level validation errors keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, msg)?;
            first = false;
        }
        Ok(())
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "This field is required.");
    }
    value.to_string()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn state_code(errors: &mut FieldErrors, value: &str) -> String {
    let value = required(errors, "state", value).to_uppercase();
    if !value.is_empty() && !STATES.contains(&value.as_str()) {
        errors.add("state", "Not a valid choice.");
    }
    value
}

fn phone(errors: &mut FieldErrors, value: &str) -> Option<String> {
    let value = optional(value)?;
    if !phone_pattern().is_match(&value) {
        errors.add("phone", "Invalid phone number.");
    }
    Some(value)
}

fn link(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<String> {
    let value = optional(value)?;
    match url::Url::parse(&value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => errors.add(field, "Invalid URL."),
    }
    Some(value)
}

fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "yes" | "on" | "true" | "1")
    )
}

fn genre_names(values: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !names.iter().any(|n| n == value) {
            names.push(value.to_string());
        }
    }
    names
}

fn positive_id(errors: &mut FieldErrors, field: &'static str, value: &str) -> i32 {
    match value.trim().parse::<i32>() {
        Ok(id) if id > 0 => id,
        _ => {
            errors.add(field, "Must be a positive whole number.");
            0
        }
    }
}

/// Parse a submitted show start time. Naive values are taken as UTC.
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

// ============================================================================
// Venue
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_model(venue: &venue::Model, genres: Vec<String>) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            genres,
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent.then(|| "y".to_string()),
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<VenueInput, FieldErrors> {
        let mut errors = FieldErrors::default();
        let input = VenueInput {
            name: required(&mut errors, "name", &self.name),
            city: required(&mut errors, "city", &self.city),
            state: state_code(&mut errors, &self.state),
            address: required(&mut errors, "address", &self.address),
            phone: phone(&mut errors, &self.phone),
            image_link: link(&mut errors, "image_link", &self.image_link),
            genres: genre_names(&self.genres),
            facebook_link: link(&mut errors, "facebook_link", &self.facebook_link),
            website: link(&mut errors, "website_link", &self.website_link),
            seeking_talent: checkbox(self.seeking_talent.as_deref()),
            seeking_description: optional(&self.seeking_description),
        };
        errors.finish(input)
    }
}

// ============================================================================
// Artist
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_model(artist: &artist::Model, genres: Vec<String>) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            genres,
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue.then(|| "y".to_string()),
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ArtistInput, FieldErrors> {
        let mut errors = FieldErrors::default();
        let input = ArtistInput {
            name: required(&mut errors, "name", &self.name),
            city: required(&mut errors, "city", &self.city),
            state: state_code(&mut errors, &self.state),
            phone: phone(&mut errors, &self.phone),
            image_link: link(&mut errors, "image_link", &self.image_link),
            genres: genre_names(&self.genres),
            facebook_link: link(&mut errors, "facebook_link", &self.facebook_link),
            website: link(&mut errors, "website_link", &self.website_link),
            seeking_venue: checkbox(self.seeking_venue.as_deref()),
            seeking_description: optional(&self.seeking_description),
        };
        errors.finish(input)
    }
}

// ============================================================================
// Show
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub artist_id: i32,
    pub venue_id: i32,
    /// Falls back to the creation time when absent.
    pub start_time: Option<DateTime<Utc>>,
}

impl ShowForm {
    pub fn validate(&self) -> Result<ShowInput, FieldErrors> {
        let mut errors = FieldErrors::default();
        let artist_id = positive_id(&mut errors, "artist_id", &self.artist_id);
        let venue_id = positive_id(&mut errors, "venue_id", &self.venue_id);
        let start_time = match optional(&self.start_time) {
            None => None,
            Some(raw) => {
                let parsed = parse_start_time(&raw);
                if parsed.is_none() {
                    errors.add("start_time", "Not a valid datetime value.");
                }
                parsed
            }
        };
        errors.finish(ShowInput {
            artist_id,
            venue_id,
            start_time,
        })
    }
}

/// Name search, submitted from the nav bar or as an API query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}
