use maud::{html, Markup};

use super::components::{delete_button, format_start_time, genre_tags, search_form, show_card};
use super::layout::base_layout;
use crate::services::{
    queries::{ArtistDetail, ArtistSummary, SearchResults, ShowListing, VenueArea, VenueDetail},
    Outcome,
};

pub fn home_page(flash: Option<&Outcome>) -> Markup {
    base_layout(
        "Home",
        flash,
        html! {
            div class="hero" {
                h1 { "Stagebook" }
                p class="lead" { "Find venues, book artists, list shows." }
                div class="actions" {
                    a href="/venues/create" class="btn btn-primary" { "Post a venue" }
                    a href="/artists/create" class="btn btn-primary" { "Post an artist" }
                    a href="/shows/create" class="btn btn-primary" { "Post a show" }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[VenueArea], flash: Option<&Outcome>) -> Markup {
    base_layout(
        "Venues",
        flash,
        html! {
            (search_form("/venues/search", "", "Find a venue"))
            @if areas.is_empty() {
                p class="empty" { "No venues listed yet." }
            }
            @for area in areas {
                section class="area" {
                    h3 { (area.city) ", " (area.state) }
                    ul class="items" {
                        @for venue in &area.venues {
                            li {
                                a href=(format!("/venues/{}", venue.id)) {
                                    (venue.name)
                                }
                                span class="upcoming" {
                                    (venue.num_upcoming_shows) " upcoming"
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Results of a venue or artist name search. `base_path` is `/venues` or `/artists`.
pub fn search_results_page(
    base_path: &str,
    search_term: &str,
    results: &SearchResults,
    flash: Option<&Outcome>,
) -> Markup {
    base_layout(
        "Search",
        flash,
        html! {
            (search_form(&format!("{}/search", base_path), search_term, "Search by name"))
            h3 class="result-count" {
                "Number of search results for \"" (search_term) "\": " (results.count)
            }
            ul class="items" {
                @for hit in &results.data {
                    li {
                        a href=(format!("{}/{}", base_path, hit.id)) { (hit.name) }
                        span class="upcoming" { (hit.num_upcoming_shows) " upcoming" }
                    }
                }
            }
        },
    )
}

pub fn venue_detail_page(detail: &VenueDetail, flash: Option<&Outcome>) -> Markup {
    let venue = &detail.venue;

    base_layout(
        &venue.name,
        flash,
        html! {
            div class="detail" {
                div class="detail-header" {
                    p class="subtitle" { "ID: " (venue.id) }
                    h1 { (venue.name) }
                    (genre_tags(&detail.genres))
                }

                div class="detail-body" {
                    p { (venue.address) }
                    p { (venue.city) ", " (venue.state) }
                    p { (venue.phone.as_deref().unwrap_or("No Phone")) }
                    @if let Some(website) = &venue.website {
                        p { a href=(website) target="_blank" { (website) } }
                    }
                    @if let Some(facebook) = &venue.facebook_link {
                        p { a href=(facebook) target="_blank" { (facebook) } }
                    }
                    @if venue.seeking_talent {
                        div class="seeking" {
                            p class="lead" { "Currently seeking talent" }
                            @if let Some(description) = &venue.seeking_description {
                                p { (description) }
                            }
                        }
                    } @else {
                        p class="not-seeking" { "Not currently seeking talent" }
                    }
                    @if let Some(image) = &venue.image_link {
                        img src=(image) alt="Venue Image" class="detail-image";
                    }
                }

                section class="shows" {
                    h2 { (detail.upcoming_shows_count) " Upcoming Shows" }
                    div class="show-grid" {
                        @for show in &detail.upcoming_shows {
                            (show_card(
                                &format!("/artists/{}", show.artist_id),
                                &show.artist_name,
                                show.artist_image_link.as_deref(),
                                &show.start_time,
                            ))
                        }
                    }
                }

                section class="shows" {
                    h2 { (detail.past_shows_count) " Past Shows" }
                    div class="show-grid" {
                        @for show in &detail.past_shows {
                            (show_card(
                                &format!("/artists/{}", show.artist_id),
                                &show.artist_name,
                                show.artist_image_link.as_deref(),
                                &show.start_time,
                            ))
                        }
                    }
                }

                div class="actions" {
                    a href=(format!("/venues/{}/edit", venue.id)) class="btn btn-default" { "Edit" }
                    (delete_button(&format!("/venues/{}", venue.id), "Delete venue"))
                }
            }
        },
    )
}

pub fn artists_page(artists: &[ArtistSummary], flash: Option<&Outcome>) -> Markup {
    base_layout(
        "Artists",
        flash,
        html! {
            (search_form("/artists/search", "", "Find an artist"))
            @if artists.is_empty() {
                p class="empty" { "No artists listed yet." }
            }
            ul class="items" {
                @for artist in artists {
                    li {
                        a href=(format!("/artists/{}", artist.id)) { (artist.name) }
                    }
                }
            }
        },
    )
}

pub fn artist_detail_page(detail: &ArtistDetail, flash: Option<&Outcome>) -> Markup {
    let artist = &detail.artist;

    base_layout(
        &artist.name,
        flash,
        html! {
            div class="detail" {
                div class="detail-header" {
                    p class="subtitle" { "ID: " (artist.id) }
                    h1 { (artist.name) }
                    (genre_tags(&detail.genres))
                }

                div class="detail-body" {
                    p { (artist.city) ", " (artist.state) }
                    p { (artist.phone.as_deref().unwrap_or("No Phone")) }
                    @if let Some(website) = &artist.website {
                        p { a href=(website) target="_blank" { (website) } }
                    }
                    @if let Some(facebook) = &artist.facebook_link {
                        p { a href=(facebook) target="_blank" { (facebook) } }
                    }
                    @if artist.seeking_venue {
                        div class="seeking" {
                            p class="lead" { "Currently seeking performance venues" }
                            @if let Some(description) = &artist.seeking_description {
                                p { (description) }
                            }
                        }
                    } @else {
                        p class="not-seeking" { "Not currently seeking performance venues" }
                    }
                    @if let Some(image) = &artist.image_link {
                        img src=(image) alt="Artist Image" class="detail-image";
                    }
                }

                section class="shows" {
                    h2 { (detail.upcoming_shows_count) " Upcoming Shows" }
                    div class="show-grid" {
                        @for show in &detail.upcoming_shows {
                            (show_card(
                                &format!("/venues/{}", show.venue_id),
                                &show.venue_name,
                                show.venue_image_link.as_deref(),
                                &show.start_time,
                            ))
                        }
                    }
                }

                section class="shows" {
                    h2 { (detail.past_shows_count) " Past Shows" }
                    div class="show-grid" {
                        @for show in &detail.past_shows {
                            (show_card(
                                &format!("/venues/{}", show.venue_id),
                                &show.venue_name,
                                show.venue_image_link.as_deref(),
                                &show.start_time,
                            ))
                        }
                    }
                }

                div class="actions" {
                    a href=(format!("/artists/{}/edit", artist.id)) class="btn btn-default" { "Edit" }
                    (delete_button(&format!("/artists/{}", artist.id), "Delete artist"))
                }
            }
        },
    )
}

pub fn shows_page(shows: &[ShowListing], flash: Option<&Outcome>) -> Markup {
    base_layout(
        "Shows",
        flash,
        html! {
            @if shows.is_empty() {
                p class="empty" { "No shows listed yet." }
            }
            div class="show-grid" {
                @for show in shows {
                    div class="show-card" {
                        @if let Some(image) = &show.artist_image_link {
                            img src=(image) alt=(show.artist_name) class="show-image";
                        }
                        p class="show-time" { (format_start_time(&show.start_time)) }
                        h5 {
                            a href=(format!("/artists/{}", show.artist_id)) { (show.artist_name) }
                        }
                        p {
                            "playing at "
                            a href=(format!("/venues/{}", show.venue_id)) { (show.venue_name) }
                        }
                    }
                }
            }
        },
    )
}

pub fn not_found_page() -> Markup {
    base_layout(
        "Not Found",
        None,
        html! {
            div class="error-page" {
                h1 { "404" }
                p { "Not Found" }
                a href="/" { "Back home" }
            }
        },
    )
}

pub fn server_error_page() -> Markup {
    base_layout(
        "Server Error",
        None,
        html! {
            div class="error-page" {
                h1 { "500" }
                p { "Something went wrong on our end." }
                a href="/" { "Back home" }
            }
        },
    )
}
