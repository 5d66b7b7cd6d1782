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
    forms::{ArtistForm, FieldErrors, SearchForm},
    services::{mutations, queries, Outcome},
    state::AppState,
    templates::{
        artist_detail_page, artist_form_page, artists_page, search_results_page, FormAction,
    },
};

pub async fn list_artists(
    State(state): State<AppState>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let artists = queries::list_artists(&state.db).await?;
    Ok(render(jar, |notice| artists_page(&artists, notice)))
}

pub async fn search_artists(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(search): Form<SearchForm>,
) -> PageResult<(CookieJar, Html<String>)> {
    let results = queries::search_artists(&state.db, &search.search_term).await?;
    Ok(render(jar, |notice| {
        search_results_page("/artists", &search.search_term, &results, notice)
    }))
}

pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let detail = queries::artist_detail(&state.db, id, Utc::now()).await?;
    Ok(render(jar, |notice| artist_detail_page(&detail, notice)))
}

pub async fn create_artist_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let choices = repositories::all_genre_names(&state.db).await?;
    Ok(render(jar, |notice| {
        artist_form_page(
            FormAction::Create,
            &ArtistForm::default(),
            &FieldErrors::default(),
            &choices,
            notice,
        )
    }))
}

pub async fn create_artist_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> PageResult<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            tracing::warn!("Rejected artist submission: {}", errors);
            let outcome = Outcome::failure(format!(
                "An error occurred. Artist {} could not be listed.",
                form.name
            ));
            return rejected_form(&state, FormAction::Create, &form, errors, &outcome).await;
        }
    };

    let name = input.name.clone();
    let outcome = match UnitOfWork::run(&state.db, |uow| mutations::create_artist(uow, input)).await
    {
        Ok(artist) => Outcome::success(format!("Artist {} was successfully listed!", artist.name)),
        Err(e) => {
            tracing::error!("Failed to create artist {}: {}", name, e);
            Outcome::failure(format!(
                "An error occurred. Artist {} could not be listed.",
                name
            ))
        }
    };

    Ok((flash::set(jar, &outcome), Redirect::to("/")).into_response())
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let (artist, genres) = queries::artist_for_edit(&state.db, id).await?;
    let choices = repositories::all_genre_names(&state.db).await?;
    let form = ArtistForm::from_model(&artist, genres);

    Ok(render(jar, |notice| {
        artist_form_page(
            FormAction::Edit(id),
            &form,
            &FieldErrors::default(),
            &choices,
            notice,
        )
    }))
}

pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> PageResult<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            tracing::warn!("Rejected edit of artist {}: {}", id, errors);
            let outcome = Outcome::failure(format!(
                "An error occurred. Artist {} could not be updated.",
                form.name
            ));
            return rejected_form(&state, FormAction::Edit(id), &form, errors, &outcome).await;
        }
    };

    let name = input.name.clone();
    let outcome =
        match UnitOfWork::run(&state.db, |uow| mutations::update_artist(uow, id, input)).await {
            Ok(artist) => {
                Outcome::success(format!("Artist {} was successfully updated!", artist.name))
            }
            Err(e) if e.status_code() == StatusCode::NOT_FOUND => return Err(e.into()),
            Err(e) => {
                tracing::error!("Failed to update artist {}: {}", id, e);
                Outcome::failure(format!(
                    "An error occurred. Artist {} could not be updated.",
                    name
                ))
            }
        };

    Ok((
        flash::set(jar, &outcome),
        Redirect::to(&format!("/artists/{}", id)),
    )
        .into_response())
}

/// Answers the HTMX delete button. Artists with shows are refused with 409.
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> Response {
    match UnitOfWork::run(&state.db, |uow| mutations::delete_artist(uow, id)).await {
        Ok(artist) => {
            let outcome =
                Outcome::success(format!("Artist {} was successfully deleted.", artist.name));
            (
                flash::set(jar, &outcome),
                [("HX-Redirect", "/")],
                Json(json!({ "success": true })),
            )
                .into_response()
        }
        Err(e) => {
            let status = e.status_code();
            let outcome = if status == StatusCode::CONFLICT {
                tracing::warn!("Refused to delete artist {}: {}", id, e);
                Outcome::failure(format!(
                    "Artist {} still has shows listed and could not be deleted.",
                    id
                ))
            } else {
                tracing::error!("Failed to delete artist {}: {}", id, e);
                Outcome::failure(format!(
                    "An error occurred. Artist {} could not be deleted.",
                    id
                ))
            };
            (
                status,
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
    form: &ArtistForm,
    errors: FieldErrors,
    outcome: &Outcome,
) -> PageResult<Response> {
    let choices = repositories::all_genre_names(&state.db).await?;
    let page = artist_form_page(action, form, &errors, &choices, Some(outcome));
    let status = AppError::from(errors).status_code();

    Ok((status, Html(page.into_string())).into_response())
}
