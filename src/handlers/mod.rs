pub mod api;
pub mod artists;
pub mod flash;
pub mod health;
pub mod html;
pub mod shows;
pub mod venues;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Venue endpoints
        .route("/venues", get(api::list_venues))
        .route("/venues/search", get(api::search_venues))
        .route("/venues/:id", get(api::get_venue))

        // Artist endpoints
        .route("/artists", get(api::list_artists))
        .route("/artists/search", get(api::search_artists))
        .route("/artists/:id", get(api::get_artist))

        // Show endpoints
        .route("/shows", get(api::list_shows))
}

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(html::index))

        // Venues
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue_submission),
        )
        .route(
            "/venues/:id",
            get(venues::show_venue).delete(venues::delete_venue),
        )
        .route(
            "/venues/:id/edit",
            get(venues::edit_venue_form).post(venues::edit_venue_submission),
        )

        // Artists
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist_submission),
        )
        .route(
            "/artists/:id",
            get(artists::show_artist).delete(artists::delete_artist),
        )
        .route(
            "/artists/:id/edit",
            get(artists::edit_artist_form).post(artists::edit_artist_submission),
        )

        // Shows
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show_submission),
        )
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))

        // API routes (JSON)
        .nest("/api", api_routes())

        // HTML routes (Maud + HTMX)
        .merge(html_routes())

        // Stylesheet and other assets
        .nest_service("/static", ServeDir::new("static"))

        .fallback(html::not_found)

        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
