//! Place: an open-ended JSON record identified by its `id` field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::BadRequestError;
use crate::id::PlaceId;

/// Name of the field holding a place's identifier.
pub const ID_FIELD: &str = "id";

/// A point of interest.
///
/// Apart from `id`, fields are not constrained: any JSON object is a valid
/// place and unknown attributes are kept verbatim, in their original order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Place(Map<String, Value>);

impl Place {
    /// Parse a request body into a place.
    ///
    /// # Errors
    ///
    /// Returns [`BadRequestError`] when the body is empty, is not JSON, or is
    /// JSON of a type other than object.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, BadRequestError> {
        parse_object(body).map(Self)
    }

    /// The `id` field, when present and a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_str(ID_FIELD)
    }

    /// Whether this place is identified by `id`.
    ///
    /// A place without a string `id` never matches.
    #[must_use]
    pub fn has_id(&self, id: &PlaceId) -> bool {
        self.id() == Some(id.as_str())
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Shallow-merge `patch` into this place.
    ///
    /// New keys are appended, existing keys are overwritten in place. The
    /// `id` field is treated like any other and may be replaced.
    pub fn merge(&mut self, patch: PlacePatch) {
        for (key, value) in patch.0 {
            self.0.insert(key, value);
        }
    }

    /// A string field, or `None` when absent or not a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Place {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Place {
    type Error = BadRequestError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        into_object(value).map(Self)
    }
}

impl From<Place> for Value {
    fn from(place: Place) -> Self {
        Value::Object(place.0)
    }
}

/// Fields to merge into an existing [`Place`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacePatch(Map<String, Value>);

impl PlacePatch {
    /// Parse a request body into a patch.
    ///
    /// # Errors
    ///
    /// Returns [`BadRequestError`] when the body is empty, is not JSON, or is
    /// JSON of a type other than object.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, BadRequestError> {
        parse_object(body).map(Self)
    }

    /// Number of fields carried by the patch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the patch carries no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for PlacePatch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, BadRequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(BadRequestError::EmptyBody);
    }
    let value: Value = serde_json::from_slice(body).map_err(BadRequestError::InvalidJson)?;
    into_object(value)
}

fn into_object(value: Value) -> Result<Map<String, Value>, BadRequestError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(BadRequestError::NotAnObject {
            found: json_type_name(&other),
        }),
    }
}

/// Human-readable name of a JSON value's type.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
