//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{BytesRejection, FormRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use places_domain::error::{BadRequestError, PlacesError};

use crate::api::Message;

/// Maps failures to an HTTP response carrying a JSON `message`.
#[derive(Debug)]
pub enum ApiError {
    /// A domain or storage failure.
    Places(PlacesError),
    /// An extractor refused the request before any handler logic ran.
    Rejected {
        /// Status chosen by the extractor (400, 413, 415, ...).
        status: StatusCode,
        /// Human-readable rejection text.
        message: String,
    },
}

impl From<PlacesError> for ApiError {
    fn from(err: PlacesError) -> Self {
        Self::Places(err)
    }
}

impl From<BadRequestError> for ApiError {
    fn from(err: BadRequestError) -> Self {
        Self::Places(err.into())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Places(PlacesError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Places(PlacesError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Places(PlacesError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Rejected { status, message } => {
                tracing::debug!(%status, %message, "request rejected");
                (status, message)
            }
        };

        (status, Json(Message::new(message))).into_response()
    }
}
