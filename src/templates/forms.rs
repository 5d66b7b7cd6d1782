use maud::{html, Markup};

use super::components::{checkbox_field, genre_select, state_select, text_field};
use super::layout::base_layout;
use crate::{
    forms::{ArtistForm, FieldErrors, ShowForm, VenueForm},
    services::Outcome,
};

/// Where a form posts to, and how its heading reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Edit(i32),
}

impl FormAction {
    fn url(self, base: &str) -> String {
        match self {
            Self::Create => format!("{}/create", base),
            Self::Edit(id) => format!("{}/{}/edit", base, id),
        }
    }
}

pub fn venue_form_page(
    action: FormAction,
    form: &VenueForm,
    errors: &FieldErrors,
    genre_choices: &[String],
    flash: Option<&Outcome>,
) -> Markup {
    let heading = match action {
        FormAction::Create => "List a new venue".to_string(),
        FormAction::Edit(_) => format!("Edit venue {}", form.name),
    };

    base_layout(
        &heading,
        flash,
        html! {
            form method="post" action=(action.url("/venues")) class="form" {
                h3 class="form-heading" { (heading) }
                (text_field("name", "Name", &form.name, true, errors))
                (text_field("city", "City", &form.city, true, errors))
                (state_select(&form.state, errors))
                (text_field("address", "Address", &form.address, true, errors))
                (text_field("phone", "Phone", &form.phone, false, errors))
                (genre_select(genre_choices, &form.genres, errors))
                (text_field("facebook_link", "Facebook Link", &form.facebook_link, false, errors))
                (text_field("image_link", "Image Link", &form.image_link, false, errors))
                (text_field("website_link", "Website Link", &form.website_link, false, errors))
                (checkbox_field("seeking_talent", "Looking for Talent", form.seeking_talent.is_some()))
                (text_field("seeking_description", "Seeking Description", &form.seeking_description, false, errors))
                button type="submit" class="btn btn-primary" {
                    @match action {
                        FormAction::Create => "Create Venue",
                        FormAction::Edit(_) => "Save Venue",
                    }
                }
            }
        },
    )
}

pub fn artist_form_page(
    action: FormAction,
    form: &ArtistForm,
    errors: &FieldErrors,
    genre_choices: &[String],
    flash: Option<&Outcome>,
) -> Markup {
    let heading = match action {
        FormAction::Create => "List a new artist".to_string(),
        FormAction::Edit(_) => format!("Edit artist {}", form.name),
    };

    base_layout(
        &heading,
        flash,
        html! {
            form method="post" action=(action.url("/artists")) class="form" {
                h3 class="form-heading" { (heading) }
                (text_field("name", "Name", &form.name, true, errors))
                (text_field("city", "City", &form.city, true, errors))
                (state_select(&form.state, errors))
                (text_field("phone", "Phone", &form.phone, false, errors))
                (genre_select(genre_choices, &form.genres, errors))
                (text_field("facebook_link", "Facebook Link", &form.facebook_link, false, errors))
                (text_field("image_link", "Image Link", &form.image_link, false, errors))
                (text_field("website_link", "Website Link", &form.website_link, false, errors))
                (checkbox_field("seeking_venue", "Looking for Venues", form.seeking_venue.is_some()))
                (text_field("seeking_description", "Seeking Description", &form.seeking_description, false, errors))
                button type="submit" class="btn btn-primary" {
                    @match action {
                        FormAction::Create => "Create Artist",
                        FormAction::Edit(_) => "Save Artist",
                    }
                }
            }
        },
    )
}

pub fn show_form_page(form: &ShowForm, errors: &FieldErrors, flash: Option<&Outcome>) -> Markup {
    base_layout(
        "List a new show",
        flash,
        html! {
            form method="post" action="/shows/create" class="form" {
                h3 class="form-heading" { "List a new show" }
                (text_field("artist_id", "Artist ID", &form.artist_id, true, errors))
                (text_field("venue_id", "Venue ID", &form.venue_id, true, errors))
                (text_field("start_time", "Start Time (YYYY-MM-DD HH:MM)", &form.start_time, false, errors))
                button type="submit" class="btn btn-primary" { "Create Show" }
            }
        },
    )
}
