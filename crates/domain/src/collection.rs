//! Collection: the ordered set of places persisted as one document.

use serde::{Deserialize, Serialize};

use crate::id::PlaceId;
use crate::place::{Place, PlacePatch};

/// Every known place, in insertion order.
///
/// Identifiers are not required to be unique: repeated inserts with the same
/// `id` produce duplicates. [`update_first`](Self::update_first) targets the
/// first match only, [`remove_by_id`](Self::remove_by_id) removes all matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceCollection(Vec<Place>);

impl PlaceCollection {
    /// An empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a place at the end.
    pub fn push(&mut self, place: Place) {
        self.0.push(place);
    }

    /// Drop every place identified by `id`, returning how many were removed.
    ///
    /// Places without a string `id` are always kept.
    pub fn remove_by_id(&mut self, id: &PlaceId) -> usize {
        let before = self.0.len();
        self.0.retain(|place| !place.has_id(id));
        before - self.0.len()
    }

    /// The first place identified by `id`.
    #[must_use]
    pub fn find_first(&self, id: &PlaceId) -> Option<&Place> {
        self.0.iter().find(|place| place.has_id(id))
    }

    /// Merge `patch` into the first place identified by `id`.
    ///
    /// Returns the merged place, or `None` when nothing matched (the
    /// collection is then left untouched).
    pub fn update_first(&mut self, id: &PlaceId, patch: PlacePatch) -> Option<&Place> {
        let place = self.0.iter_mut().find(|place| place.has_id(id))?;
        place.merge(patch);
        Some(place)
    }

    /// Number of places.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection holds no place.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the places in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.0.iter()
    }
}

impl FromIterator<Place> for PlaceCollection {
    fn from_iter<I: IntoIterator<Item = Place>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PlaceCollection {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
