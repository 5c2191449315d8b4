//! Welcome payload served at `/`.

use axum::Json;

use super::Message;

/// `GET /`
pub async fn index() -> Json<Message> {
    Json(Message::new("Welcome to the Places API!"))
}
