//! Place service: use-cases for managing the place collection.

use places_domain::collection::PlaceCollection;
use places_domain::error::{NotFoundError, PlacesError};
use places_domain::id::PlaceId;
use places_domain::place::{Place, PlacePatch};
use tokio::sync::Mutex;

use crate::ports::PlaceStore;

/// Application service for place CRUD operations.
///
/// Every mutation runs a full load → mutate → save cycle against the store
/// while holding a single write lock, so two concurrent mutations never start
/// from the same snapshot. Reads skip the lock.
pub struct PlaceService<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: PlaceStore> PlaceService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// List every place in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn list_places(&self) -> Result<PlaceCollection, PlacesError> {
        let places = self.store.load().await?;
        tracing::debug!(count = places.len(), "places loaded");
        Ok(places)
    }

    /// Get the first place identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::NotFound`] when no place carries `id`, or a
    /// storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn get_place(&self, id: PlaceId) -> Result<Place, PlacesError> {
        let places = self.store.load().await?;
        places.find_first(&id).cloned().ok_or_else(|| {
            NotFoundError {
                entity: "Place",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Append a place to the collection.
    ///
    /// Neither the shape nor the uniqueness of `id` is checked.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self, place), fields(place_id = ?place.id()))]
    pub async fn add_place(&self, place: Place) -> Result<(), PlacesError> {
        tracing::debug!(?place, "adding place");
        let _guard = self.write_lock.lock().await;
        let mut places = self.store.load().await?;
        places.push(place);
        self.store.save(&places).await?;
        tracing::info!(count = places.len(), "place added");
        Ok(())
    }

    /// Merge `patch` into the first place identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::NotFound`] when no place carries `id` (nothing
    /// is written in that case), or a storage error from the store.
    #[tracing::instrument(skip(self, patch), fields(patch_len = patch.len()))]
    pub async fn update_place(&self, id: PlaceId, patch: PlacePatch) -> Result<Place, PlacesError> {
        let _guard = self.write_lock.lock().await;
        let mut places = self.store.load().await?;
        let Some(updated) = places.update_first(&id, patch).cloned() else {
            return Err(NotFoundError {
                entity: "Place",
                id: id.to_string(),
            }
            .into());
        };
        self.store.save(&places).await?;
        tracing::info!("place updated");
        Ok(updated)
    }

    /// Remove every place identified by `id`, returning how many were removed.
    ///
    /// The collection is saved even when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn delete_place(&self, id: PlaceId) -> Result<usize, PlacesError> {
        let _guard = self.write_lock.lock().await;
        let mut places = self.store.load().await?;
        let removed = places.remove_by_id(&id);
        self.store.save(&places).await?;
        tracing::info!(removed, "place deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct InMemoryPlaceStore {
        places: std::sync::Mutex<PlaceCollection>,
        saves: AtomicUsize,
    }

    impl InMemoryPlaceStore {
        fn with(value: Value) -> Self {
            Self {
                places: std::sync::Mutex::new(serde_json::from_value(value).unwrap()),
                saves: AtomicUsize::new(0),
            }
        }
    }

    impl PlaceStore for InMemoryPlaceStore {
        fn load(&self) -> impl Future<Output = Result<PlaceCollection, PlacesError>> + Send {
            let places = self.places.lock().unwrap().clone();
            async move {
                // give concurrent callers a chance to interleave
                tokio::task::yield_now().await;
                Ok(places)
            }
        }

        fn save(
            &self,
            places: &PlaceCollection,
        ) -> impl Future<Output = Result<(), PlacesError>> + Send {
            *self.places.lock().unwrap() = places.clone();
            self.saves.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        }
    }

    impl PlaceStore for Arc<InMemoryPlaceStore> {
        fn load(&self) -> impl Future<Output = Result<PlaceCollection, PlacesError>> + Send {
            self.as_ref().load()
        }

        fn save(
            &self,
            places: &PlaceCollection,
        ) -> impl Future<Output = Result<(), PlacesError>> + Send {
            self.as_ref().save(places)
        }
    }

    struct BrokenStore;

    impl PlaceStore for BrokenStore {
        async fn load(&self) -> Result<PlaceCollection, PlacesError> {
            Err(PlacesError::Storage(Box::new(std::io::Error::other(
                "unreadable",
            ))))
        }

        async fn save(&self, _places: &PlaceCollection) -> Result<(), PlacesError> {
            Err(PlacesError::Storage(Box::new(std::io::Error::other(
                "unwritable",
            ))))
        }
    }

    fn place(value: Value) -> Place {
        Place::try_from(value).unwrap()
    }

    fn patch(value: Value) -> PlacePatch {
        serde_json::from_value(value).unwrap()
    }

    fn collection(value: Value) -> PlaceCollection {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn should_list_empty_collection_when_store_is_empty() {
        let svc = PlaceService::new(InMemoryPlaceStore::default());
        let places = svc.list_places().await.unwrap();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn should_append_place_when_added() {
        let store = Arc::new(InMemoryPlaceStore::with(json!([{"id": "1"}])));
        let svc = PlaceService::new(Arc::clone(&store));

        svc.add_place(place(json!({"id": "2", "site_name": "Harbor"})))
            .await
            .unwrap();

        let places = svc.list_places().await.unwrap();
        assert_eq!(
            places,
            collection(json!([{"id": "1"}, {"id": "2", "site_name": "Harbor"}]))
        );
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_keep_duplicates_when_same_id_added_twice() {
        let svc = PlaceService::new(InMemoryPlaceStore::default());
        svc.add_place(place(json!({"id": "1"}))).await.unwrap();
        svc.add_place(place(json!({"id": "1"}))).await.unwrap();

        assert_eq!(svc.list_places().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_merge_fields_when_updating_existing_place() {
        let svc = PlaceService::new(InMemoryPlaceStore::with(json!([
            {"id": "1", "name": "Park", "status": "In Progress"},
            {"id": "2", "name": "Pier"}
        ])));

        let updated = svc
            .update_place(PlaceId::from("1"), patch(json!({"name": "Big Park"})))
            .await
            .unwrap();

        assert_eq!(updated.get("name"), Some(&json!("Big Park")));
        assert_eq!(
            svc.list_places().await.unwrap(),
            collection(json!([
                {"id": "1", "name": "Big Park", "status": "In Progress"},
                {"id": "2", "name": "Pier"}
            ]))
        );
    }

    #[tokio::test]
    async fn should_get_first_place_with_matching_id() {
        let store = Arc::new(InMemoryPlaceStore::with(json!([
            {"id": "1", "n": 1},
            {"id": "1", "n": 2}
        ])));
        let svc = PlaceService::new(Arc::clone(&store));

        let found = svc.get_place(PlaceId::from("1")).await.unwrap();

        assert_eq!(found.get("n"), Some(&json!(1)));
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_return_not_found_when_getting_unknown_place() {
        let svc = PlaceService::new(InMemoryPlaceStore::default());

        let result = svc.get_place(PlaceId::from("nope")).await;

        assert!(matches!(result, Err(PlacesError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_without_saving_when_update_misses() {
        let store = Arc::new(InMemoryPlaceStore::with(json!([{"id": "1"}])));
        let svc = PlaceService::new(Arc::clone(&store));

        let result = svc
            .update_place(PlaceId::from("missing"), patch(json!({"name": "x"})))
            .await;

        assert!(matches!(result, Err(PlacesError::NotFound(_))));
        assert_eq!(store.saves.load(Ordering::SeqCst), 0);
        assert_eq!(
            svc.list_places().await.unwrap(),
            collection(json!([{"id": "1"}]))
        );
    }

    #[tokio::test]
    async fn should_delete_all_matching_places() {
        let svc = PlaceService::new(InMemoryPlaceStore::with(json!([
            {"id": "1"},
            {"name": "no id"},
            {"id": "1", "copy": true}
        ])));

        let removed = svc.delete_place(PlaceId::from("1")).await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(
            svc.list_places().await.unwrap(),
            collection(json!([{"name": "no id"}]))
        );
    }

    #[tokio::test]
    async fn should_still_save_when_delete_matches_nothing() {
        let store = Arc::new(InMemoryPlaceStore::with(json!([{"id": "1"}])));
        let svc = PlaceService::new(Arc::clone(&store));

        let removed = svc.delete_place(PlaceId::from("9")).await.unwrap();

        assert_eq!(removed, 0);
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_propagate_storage_errors() {
        let svc = PlaceService::new(BrokenStore);

        assert!(matches!(
            svc.list_places().await,
            Err(PlacesError::Storage(_))
        ));
        assert!(matches!(
            svc.add_place(place(json!({"id": "1"}))).await,
            Err(PlacesError::Storage(_))
        ));
        assert!(matches!(
            svc.delete_place(PlaceId::from("1")).await,
            Err(PlacesError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn should_not_lose_updates_when_adding_concurrently() {
        let svc = Arc::new(PlaceService::new(InMemoryPlaceStore::default()));
        let mut tasks = tokio::task::JoinSet::new();

        for n in 0..20 {
            let svc = Arc::clone(&svc);
            tasks.spawn(async move {
                svc.add_place(place(json!({"id": n.to_string()}))).await
            });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        assert_eq!(svc.list_places().await.unwrap().len(), 20);
    }
}
