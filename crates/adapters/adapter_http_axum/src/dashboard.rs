//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! - `GET  /dashboard`                      places table (newest first) + add form
//! - `POST /dashboard/places`               add a place from the form (PRG)
//! - `GET  /dashboard/places/{id}`          edit form
//! - `POST /dashboard/places/{id}`          save the edit form (PRG)
//! - `POST /dashboard/places/{id}/delete`   delete (PRG)
//!
//! Forms use POST + redirect (PRG pattern) to avoid double-submission.

#[allow(clippy::missing_errors_doc)]
pub mod places;

use askama::Template;
use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use places_app::ports::PlaceStore;

use crate::api::Message;
use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: PlaceStore + Send + Sync + 'static,
{
    Router::new()
        .route("/dashboard", get(places::list::<S>))
        .route("/dashboard/places", post(places::create::<S>))
        .route(
            "/dashboard/places/{id}",
            get(places::edit::<S>).post(places::update::<S>),
        )
        .route("/dashboard/places/{id}/delete", post(places::delete::<S>))
}

fn render(template: &impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render template");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Message::new("internal server error")),
            )
                .into_response()
        }
    }
}
