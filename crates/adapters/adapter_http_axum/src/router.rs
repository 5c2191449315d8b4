//! Axum router assembly.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use places_app::ports::PlaceStore;

use crate::api::Message;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the JSON API, `/health` and the HTML dashboard under `/dashboard`.
/// Unknown paths and methods get a JSON `message`. Everything is wrapped in a
/// [`TraceLayer`] (requests logged through `tracing`) and a permissive
/// [`CorsLayer`] so that any origin may call the API.
pub fn build<S>(state: AppState<S>) -> Router
where
    S: PlaceStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .merge(crate::dashboard::routes())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<Message> {
    Json(Message::new("OK"))
}

async fn not_found() -> (StatusCode, Json<Message>) {
    (
        StatusCode::NOT_FOUND,
        Json(Message::new("Resource not found!")),
    )
}

async fn method_not_allowed() -> (StatusCode, Json<Message>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(Message::new("Method not allowed!")),
    )
}
