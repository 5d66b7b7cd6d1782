use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::{cookie::CookieJar, Form};
use chrono::Utc;
use serde_json::json;

use super::{
    flash,
    html::{render, PageResult},
};
use crate::{
    db::{repositories, UnitOfWork},
    error::AppError,
    forms::{FieldErrors, SearchForm, VenueForm},
    services::{mutations, queries, Outcome},
    state::AppState,
    templates::{
        search_results_page, venue_detail_page, venue_form_page, venues_page, FormAction,
    },
};

pub async fn list_venues(
    State(state): State<AppState>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let areas = queries::venues_by_area(&state.db, Utc::now()).await?;
    Ok(render(jar, |notice| venues_page(&areas, notice)))
}

pub async fn search_venues(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(search): Form<SearchForm>,
) -> PageResult<(CookieJar, Html<String>)> {
    let results = queries::search_venues(&state.db, &search.search_term, Utc::now()).await?;
    Ok(render(jar, |notice| {
        search_results_page("/venues", &search.search_term, &results, notice)
    }))
}

pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let detail = queries::venue_detail(&state.db, id, Utc::now()).await?;
    Ok(render(jar, |notice| venue_detail_page(&detail, notice)))
}

pub async fn create_venue_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let choices = repositories::all_genre_names(&state.db).await?;
    Ok(render(jar, |notice| {
        venue_form_page(
            FormAction::Create,
            &VenueForm::default(),
            &FieldErrors::default(),
            &choices,
            notice,
        )
    }))
}

pub async fn create_venue_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> PageResult<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            tracing::warn!("Rejected venue submission: {}", errors);
            let outcome = Outcome::failure(format!(
                "An error occurred. Venue {} could not be listed.",
                form.name
            ));
            return rejected_form(&state, FormAction::Create, &form, errors, &outcome).await;
        }
    };

    let name = input.name.clone();
    let outcome = match UnitOfWork::run(&state.db, |uow| mutations::create_venue(uow, input)).await
    {
        Ok(venue) => Outcome::success(format!("Venue {} was successfully listed!", venue.name)),
        Err(e) => {
            tracing::error!("Failed to create venue {}: {}", name, e);
            Outcome::failure(format!(
                "An error occurred. Venue {} could not be listed.",
                name
            ))
        }
    };

    Ok((flash::set(jar, &outcome), Redirect::to("/")).into_response())
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let (venue, genres) = queries::venue_for_edit(&state.db, id).await?;
    let choices = repositories::all_genre_names(&state.db).await?;
    let form = VenueForm::from_model(&venue, genres);

    Ok(render(jar, |notice| {
        venue_form_page(
            FormAction::Edit(id),
            &form,
            &FieldErrors::default(),
            &choices,
            notice,
        )
    }))
}

pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> PageResult<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            tracing::warn!("Rejected edit of venue {}: {}", id, errors);
            let outcome = Outcome::failure(format!(
                "An error occurred. Venue {} could not be updated.",
                form.name
            ));
            return rejected_form(&state, FormAction::Edit(id), &form, errors, &outcome).await;
        }
    };

    let name = input.name.clone();
    let outcome =
        match UnitOfWork::run(&state.db, |uow| mutations::update_venue(uow, id, input)).await {
            Ok(venue) => {
                Outcome::success(format!("Venue {} was successfully updated!", venue.name))
            }
            Err(e) if e.status_code() == StatusCode::NOT_FOUND => return Err(e.into()),
            Err(e) => {
                tracing::error!("Failed to update venue {}: {}", id, e);
                Outcome::failure(format!(
                    "An error occurred. Venue {} could not be updated.",
                    name
                ))
            }
        };

    Ok((
        flash::set(jar, &outcome),
        Redirect::to(&format!("/venues/{}", id)),
    )
        .into_response())
}

/// Answers the HTMX delete button with `{"success": bool}`.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Response {
    match UnitOfWork::run(&state.db, |uow| mutations::delete_venue(uow, id)).await {
        Ok(venue) => {
            let outcome =
                Outcome::success(format!("Venue {} was successfully deleted.", venue.name));
            (
                flash::set(jar, &outcome),
                [("HX-Redirect", "/")],
                Json(json!({ "success": true })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to delete venue {}: {}", id, e);
            let outcome = Outcome::failure(format!(
                "An error occurred. Venue {} could not be deleted.",
                id
            ));
            (
                e.status_code(),
                flash::set(jar, &outcome),
                Json(json!({ "success": false })),
            )
                .into_response()
        }
    }
}

async fn rejected_form(
    state: &AppState,
    action: FormAction,
    form: &VenueForm,
    errors: FieldErrors,
    outcome: &Outcome,
) -> PageResult<Response> {
    let choices = repositories::all_genre_names(&state.db).await?;
    let page = venue_form_page(action, form, &errors, &choices, Some(outcome));
    let status = AppError::from(errors).status_code();

    Ok((status, Html(page.into_string())).into_response())
}
