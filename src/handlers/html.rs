//! Shared plumbing for the server-rendered pages.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;

use super::flash;
use crate::{
    error::AppError,
    services::Outcome,
    templates::{home_page, not_found_page, server_error_page},
};

/// Error surfaced to a browser: rendered as the 404 or 500 page instead of JSON.
#[derive(Debug)]
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self.0.status_code() {
            StatusCode::NOT_FOUND => {
                tracing::debug!("Page not found: {}", self.0);
                (StatusCode::NOT_FOUND, Html(not_found_page().into_string())).into_response()
            }
            status => {
                tracing::error!("Page failed to render: {}", self.0);
                (status, Html(server_error_page().into_string())).into_response()
            }
        }
    }
}

pub type PageResult<T> = std::result::Result<T, PageError>;

/// Render a page with the pending flash notification, clearing it.
pub fn render<F>(jar: CookieJar, page: F) -> (CookieJar, Html<String>)
where
    F: FnOnce(Option<&Outcome>) -> Markup,
{
    let (jar, outcome) = flash::take(jar);
    (jar, Html(page(outcome.as_ref()).into_string()))
}

pub async fn index(jar: CookieJar) -> (CookieJar, Html<String>) {
    render(jar, home_page)
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(not_found_page().into_string()))
}
