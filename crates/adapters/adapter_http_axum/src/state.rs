//! Shared application state for axum handlers.

use std::sync::Arc;

use places_app::ports::PlaceStore;
use places_app::services::place_service::PlaceService;

/// Application state shared across all axum handlers.
///
/// Generic over the store type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the store itself does not need to be
/// `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<S> {
    /// Place CRUD service.
    pub place_service: Arc<PlaceService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            place_service: Arc::clone(&self.place_service),
        }
    }
}

impl<S> AppState<S>
where
    S: PlaceStore + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(place_service: PlaceService<S>) -> Self {
        Self {
            place_service: Arc::new(place_service),
        }
    }
}
