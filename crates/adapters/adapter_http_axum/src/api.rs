//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod places;
pub mod root;

use axum::Router;
use axum::routing::{get, put};
use serde::Serialize;

use places_app::ports::PlaceStore;

use crate::state::AppState;

/// JSON body `{"message": "..."}` used for confirmations and errors alike.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Build the API router.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: PlaceStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root::index))
        .route(
            "/places",
            get(places::list::<S>).post(places::create::<S>),
        )
        .route(
            "/places/{id}",
            put(places::update::<S>).delete(places::delete::<S>),
        )
}
