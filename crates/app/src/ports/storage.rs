//! Storage port: whole-collection persistence.

use std::future::Future;

use places_domain::collection::PlaceCollection;
use places_domain::error::PlacesError;

/// Durable home of the place collection.
///
/// The collection is always read and written as a whole; implementations do
/// not offer per-record access.
pub trait PlaceStore {
    /// Read the full collection.
    ///
    /// A store that has never been written yields an empty collection.
    fn load(&self) -> impl Future<Output = Result<PlaceCollection, PlacesError>> + Send;

    /// Replace the persisted collection with `places`.
    ///
    /// Either the whole collection is written or the previous content is kept.
    fn save(
        &self,
        places: &PlaceCollection,
    ) -> impl Future<Output = Result<(), PlacesError>> + Send;
}
