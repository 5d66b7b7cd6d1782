use chrono::{DateTime, Utc};
use maud::{html, Markup};

use crate::forms::{FieldErrors, STATES};

pub fn format_start_time(start_time: &DateTime<Utc>) -> String {
    start_time.format("%a %b %d, %Y %-I:%M%p").to_string()
}

pub fn genre_tags(genres: &[String]) -> Markup {
    html! {
        ul class="genres" {
            @for genre in genres {
                li class="genre" { (genre) }
            }
        }
    }
}

/// Card linking to the counterpart of a show (the artist on a venue page, or
/// the venue on an artist page).
pub fn show_card(
    href: &str,
    name: &str,
    image_link: Option<&str>,
    start_time: &DateTime<Utc>,
) -> Markup {
    html! {
        div class="show-card" {
            @if let Some(image) = image_link {
                img src=(image) alt=(name) class="show-image";
            }
            h5 { a href=(href) { (name) } }
            p class="show-time" { (format_start_time(start_time)) }
        }
    }
}

pub fn search_form(action: &str, term: &str, placeholder: &str) -> Markup {
    html! {
        form method="post" action=(action) class="search-form" {
            input type="search" name="search_term" value=(term) placeholder=(placeholder);
            button type="submit" { "Search" }
        }
    }
}

fn field_error(errors: &FieldErrors, name: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(name) {
            p class="field-error" { (message) }
        }
    }
}

pub fn text_field(
    name: &str,
    label: &str,
    value: &str,
    required: bool,
    errors: &FieldErrors,
) -> Markup {
    html! {
        div class="form-group" {
            label for=(name) { (label) }
            input type="text" id=(name) name=(name) value=(value) required[required];
            (field_error(errors, name))
        }
    }
}

pub fn state_select(value: &str, errors: &FieldErrors) -> Markup {
    html! {
        div class="form-group" {
            label for="state" { "State" }
            select id="state" name="state" required {
                option value="" { "--" }
                @for state in STATES {
                    option value=(state) selected[value.eq_ignore_ascii_case(state)] { (state) }
                }
            }
            (field_error(errors, "state"))
        }
    }
}

pub fn genre_select(choices: &[String], selected: &[String], errors: &FieldErrors) -> Markup {
    html! {
        div class="form-group" {
            label for="genres" { "Genres" }
            select id="genres" name="genres" multiple {
                @for genre in choices {
                    option value=(genre) selected[selected.contains(genre)] { (genre) }
                }
            }
            (field_error(errors, "genres"))
        }
    }
}

pub fn checkbox_field(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        div class="form-group form-check" {
            input type="checkbox" id=(name) name=(name) value="y" checked[checked];
            label for=(name) { (label) }
        }
    }
}

pub fn delete_button(target: &str, label: &str) -> Markup {
    html! {
        button
            class="btn btn-danger"
            hx-delete=(target)
            hx-confirm="This cannot be undone. Continue?" {
            (label)
        }
    }
}
