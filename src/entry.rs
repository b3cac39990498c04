use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::InvalidEntry;

/// One item placed on a shelf.
///
/// The `id` is the only field the store interprets — it is the dedup and
/// lookup key. Everything else (title, image, year, rating, ...) rides along
/// as an opaque bag of attributes and is flattened into the same JSON object
/// on disk, so a persisted entry is `{"id": "...", "title": "...", ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShelfEntry {
    id: String,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl ShelfEntry {
    /// Create an entry with no extra attributes.
    ///
    /// Fails with `InvalidEntry` when the id is empty or whitespace-only —
    /// there is no fallback key generation.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidEntry> {
        Self::with_payload(id, Map::new())
    }

    /// Create an entry carrying arbitrary attributes.
    pub fn with_payload(
        id: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Result<Self, InvalidEntry> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(InvalidEntry {
                message: "id is empty".into(),
            });
        }
        Ok(ShelfEntry { id, payload })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Get a payload attribute by key.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Set a payload attribute, returning the previous value if any.
    pub fn set_attr(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.payload.insert(key.into(), value)
    }

    /// True when the deserialized id is usable as a dedup key.
    ///
    /// Entries read back from storage bypass the constructor, so the store
    /// filters on this when loading.
    pub(crate) fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}
