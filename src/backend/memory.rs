use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::StorageBackend;
use crate::error::StorageError;

/// Stored value plus a write counter used as the change fingerprint.
struct Slot {
    value: String,
    writes: u64,
}

/// In-memory backend backed by a `HashMap`. Clone-friendly via `Arc`:
/// clones share storage, which is how tests (and same-process "contexts")
/// model a shared storage origin.
#[derive(Clone)]
pub struct MemoryBackend {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            slots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a raw value under a key, bypassing the store. Intended for tests
    /// that need pre-existing (possibly corrupt) storage.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.slots.write() {
            let writes = slots.get(key).map(|s| s.writes + 1).unwrap_or(1);
            slots.insert(
                key.to_string(),
                Slot {
                    value: value.to_string(),
                    writes,
                },
            );
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(slots.get(key).map(|slot| slot.value.clone()))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        let writes = slots.get(key).map(|s| s.writes + 1).unwrap_or(1);
        slots.insert(
            key.to_string(),
            Slot {
                value: value.to_string(),
                writes,
            },
        );
        Ok(())
    }

    fn fingerprint(&self, key: &str) -> Result<Option<u64>, StorageError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| StorageError::LockPoisoned("fingerprint"))?;
        Ok(slots.get(key).map(|slot| slot.writes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load("nope").unwrap(), None);
        assert_eq!(backend.fingerprint("nope").unwrap(), None);
    }

    #[test]
    fn store_and_load() {
        let backend = MemoryBackend::new();
        backend.store("k", "[1,2,3]").unwrap();
        assert_eq!(backend.load("k").unwrap().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn fingerprint_changes_on_every_write() {
        let backend = MemoryBackend::new();
        backend.store("k", "a").unwrap();
        let first = backend.fingerprint("k").unwrap();

        backend.store("k", "b").unwrap();
        let second = backend.fingerprint("k").unwrap();

        assert!(first.is_some());
        assert_ne!(first, second);
    }

    #[test]
    fn clone_shares_storage() {
        let backend = MemoryBackend::new();
        let other = backend.clone();

        backend.store("k", "shared").unwrap();
        assert_eq!(other.load("k").unwrap().as_deref(), Some("shared"));
    }
}
