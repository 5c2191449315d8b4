//! JSON REST handlers for places.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use places_app::ports::PlaceStore;
use places_domain::collection::PlaceCollection;
use places_domain::id::PlaceId;
use places_domain::place::{Place, PlacePatch};

use super::Message;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<PlaceCollection>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Added,
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Added => (
                StatusCode::OK,
                Json(Message::new("Place added successfully!")),
            )
                .into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Updated,
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Updated => (
                StatusCode::OK,
                Json(Message::new("Place updated successfully!")),
            )
                .into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => (
                StatusCode::OK,
                Json(Message::new("Place deleted successfully!")),
            )
                .into_response(),
        }
    }
}

/// `GET /places`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError>
where
    S: PlaceStore + Send + Sync + 'static,
{
    let places = state.place_service.list_places().await?;
    Ok(ListResponse::Ok(Json(places)))
}

/// `POST /places`
///
/// The body is read raw so that a missing or wrong `Content-Type` does not
/// turn a valid JSON object into a rejection.
pub async fn create<S>(
    State(state): State<AppState<S>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<CreateResponse, ApiError>
where
    S: PlaceStore + Send + Sync + 'static,
{
    let place = Place::from_json_slice(&body?)?;
    state.place_service.add_place(place).await?;
    Ok(CreateResponse::Added)
}

/// `PUT /places/{id}`
pub async fn update<S>(
    State(state): State<AppState<S>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<UpdateResponse, ApiError>
where
    S: PlaceStore + Send + Sync + 'static,
{
    let Path(id) = path?;
    let patch = PlacePatch::from_json_slice(&body?)?;
    state
        .place_service
        .update_place(PlaceId::from(id), patch)
        .await?;
    Ok(UpdateResponse::Updated)
}

/// `DELETE /places/{id}`
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<DeleteResponse, ApiError>
where
    S: PlaceStore + Send + Sync + 'static,
{
    let Path(id) = path?;
    state.place_service.delete_place(PlaceId::from(id)).await?;
    Ok(DeleteResponse::Deleted)
}
