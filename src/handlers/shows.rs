use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{cookie::CookieJar, Form};

use super::{
    flash,
    html::{render, PageResult},
};
use crate::{
    db::UnitOfWork,
    error::AppError,
    forms::{FieldErrors, ShowForm},
    services::{mutations, queries, Outcome},
    state::AppState,
    templates::{show_form_page, shows_page},
};

pub async fn list_shows(
    State(state): State<AppState>,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let shows = queries::list_shows(&state.db).await?;
    Ok(render(jar, |notice| shows_page(&shows, notice)))
}

pub async fn create_show_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    render(jar, |notice| {
        show_form_page(&ShowForm::default(), &FieldErrors::default(), notice)
    })
}

pub async fn create_show_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ShowForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            tracing::warn!("Rejected show submission: {}", errors);
            let outcome = Outcome::failure("An error occurred. Show could not be listed.");
            let page = show_form_page(&form, &errors, Some(&outcome));
            let status = AppError::from(errors).status_code();
            return (status, Html(page.into_string())).into_response();
        }
    };

    let outcome = match UnitOfWork::run(&state.db, |uow| mutations::create_show(uow, input)).await
    {
        Ok(_) => Outcome::success("Show was successfully listed!"),
        Err(e) if e.status_code() == StatusCode::CONFLICT => {
            tracing::warn!("Show rejected: {}", e);
            Outcome::failure(
                "An error occurred. Show could not be listed: unknown artist or venue.",
            )
        }
        Err(e) => {
            tracing::error!("Failed to create show: {}", e);
            Outcome::failure("An error occurred. Show could not be listed.")
        }
    };

    (flash::set(jar, &outcome), Redirect::to("/")).into_response()
}
