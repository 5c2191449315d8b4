//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`PlacesError`]
//! via `From`. Adapters box their failures into [`PlacesError::Storage`].

/// Top-level error for every place operation.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// The request payload could not be interpreted.
    #[error("bad request")]
    Validation(#[from] BadRequestError),

    /// The targeted record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The backing store could not be read or written.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a request body is rejected.
#[derive(Debug, thiserror::Error)]
pub enum BadRequestError {
    /// No body was sent where one is required.
    #[error("request body is empty")]
    EmptyBody,

    /// The body is not valid JSON.
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The body is valid JSON but not an object.
    #[error("request body must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// A required form field was left blank.
    #[error("{field} must not be blank")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// No record matched the requested identifier.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found!")]
pub struct NotFoundError {
    /// Kind of record that was looked up.
    pub entity: &'static str,
    /// Identifier that was requested.
    pub id: String,
}
