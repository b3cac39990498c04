use std::sync::Arc;

use crate::backend::StorageBackend;
use crate::entry::ShelfEntry;
use crate::hub::{ChangeHub, Subscription};
use crate::shelf::{Shelf, ShelfKeys};

/// Persisted, de-duplicated shelf membership with change broadcasts.
///
/// Each shelf is stored as a JSON array of entry objects under its configured
/// key. All operations are synchronous and fail open: missing or corrupt
/// storage reads as an empty shelf, and write failures are logged and
/// swallowed — callers never see an error.
///
/// Clones share the same backend handle and subscriber list, so a toggle
/// through one clone is immediately visible to reads through another and
/// notifies every subscriber. Convergence with *other* contexts (separate
/// processes over a `FileBackend` directory) is driven by the `ShelfWatcher`.
#[derive(Clone)]
pub struct ShelfStore {
    backend: Arc<dyn StorageBackend>,
    keys: ShelfKeys,
    hub: Arc<ChangeHub>,
}

impl ShelfStore {
    /// Create a store with the default shelf keys (`my-list` / `favorites`).
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self::with_keys(backend, ShelfKeys::default())
    }

    /// Create a store with custom shelf keys.
    pub fn with_keys(backend: impl StorageBackend + 'static, keys: ShelfKeys) -> Self {
        ShelfStore {
            backend: Arc::new(backend),
            keys,
            hub: Arc::new(ChangeHub::new()),
        }
    }

    pub fn keys(&self) -> &ShelfKeys {
        &self.keys
    }

    pub(crate) fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Is `id` currently on `shelf`? `false` on missing or corrupt storage.
    pub fn is_member(&self, shelf: Shelf, id: &str) -> bool {
        self.read_shelf(self.keys.key(shelf))
            .iter()
            .any(|entry| entry.id() == id)
    }

    /// Flip membership of `entry` on `shelf`, returning the new state.
    ///
    /// If the id is present it is removed (`false`); if absent the entry is
    /// inserted at the front (`true`). The read-modify-write completes
    /// synchronously within this call; subscribers are notified after the
    /// write lands. A failed write leaves the shelf as it was and returns
    /// the unchanged membership state.
    pub fn toggle(&self, shelf: Shelf, entry: &ShelfEntry) -> bool {
        let key = self.keys.key(shelf);
        let mut entries = self.read_shelf(key);

        let was_member = entries.iter().any(|e| e.id() == entry.id());
        if was_member {
            entries.retain(|e| e.id() != entry.id());
        } else {
            entries.insert(0, entry.clone());
        }

        if self.write_shelf(key, &entries) {
            !was_member
        } else {
            was_member
        }
    }

    /// All entries currently on `shelf`, front-most first. Empty on missing
    /// or corrupt storage.
    pub fn entries(&self, shelf: Shelf) -> Vec<ShelfEntry> {
        self.read_shelf(self.keys.key(shelf))
    }

    /// Register a listener invoked with the shelf key on every mutation —
    /// local toggles and watcher-detected external changes alike. Delivery
    /// is at-least-once and may include redundant self-notifications.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.hub.subscribe(listener)
    }

    /// Republish a change notification for `shelf`. Used by the watcher when
    /// it detects a write from another context; no payload is trusted beyond
    /// "this shelf changed — re-read".
    pub fn notify_changed(&self, shelf: Shelf) {
        self.hub.publish(self.keys.key(shelf));
    }

    fn read_shelf(&self, key: &str) -> Vec<ShelfEntry> {
        let raw = match self.backend.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("shelf read failed for {}: {}", key, err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ShelfEntry>>(&raw) {
            Ok(entries) => entries
                .into_iter()
                .filter(|entry| entry.has_valid_id())
                .collect(),
            Err(err) => {
                log::warn!("corrupt shelf under {}, treating as empty: {}", key, err);
                Vec::new()
            }
        }
    }

    fn write_shelf(&self, key: &str, entries: &[ShelfEntry]) -> bool {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("shelf serialization failed for {}: {}", key, err);
                return false;
            }
        };

        match self.backend.store(key, &raw) {
            Ok(()) => {
                self.hub.publish(key);
                true
            }
            Err(err) => {
                log::warn!("shelf write failed for {}: {}", key, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    fn entry(id: &str) -> ShelfEntry {
        ShelfEntry::new(id).unwrap()
    }

    #[test]
    fn toggle_inserts_then_removes() {
        let store = ShelfStore::new(MemoryBackend::new());
        let e = entry("a");

        assert!(store.toggle(Shelf::List, &e));
        assert!(store.is_member(Shelf::List, "a"));

        assert!(!store.toggle(Shelf::List, &e));
        assert!(!store.is_member(Shelf::List, "a"));
        assert!(store.entries(Shelf::List).is_empty());
    }

    #[test]
    fn new_entries_go_to_the_front() {
        let store = ShelfStore::new(MemoryBackend::new());
        store.toggle(Shelf::List, &entry("first"));
        store.toggle(Shelf::List, &entry("second"));

        let ids: Vec<_> = store
            .entries(Shelf::List)
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[test]
    fn shelves_are_independent() {
        let store = ShelfStore::new(MemoryBackend::new());
        store.toggle(Shelf::List, &entry("a"));

        assert!(store.is_member(Shelf::List, "a"));
        assert!(!store.is_member(Shelf::Favorites, "a"));
    }

    #[test]
    fn never_two_entries_with_same_id() {
        let store = ShelfStore::new(MemoryBackend::new());
        let e = entry("a");

        for _ in 0..5 {
            store.toggle(Shelf::Favorites, &e);
            let count = store
                .entries(Shelf::Favorites)
                .iter()
                .filter(|x| x.id() == "a")
                .count();
            assert!(count <= 1);
        }
    }

    #[test]
    fn most_recent_insert_wins_on_payload() {
        let store = ShelfStore::new(MemoryBackend::new());

        let mut first = entry("a");
        first.set_attr("title", serde_json::json!("old"));
        store.toggle(Shelf::List, &first);
        store.toggle(Shelf::List, &first); // remove

        let mut second = entry("a");
        second.set_attr("title", serde_json::json!("new"));
        store.toggle(Shelf::List, &second);

        let entries = store.entries(Shelf::List);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].attr("title"), Some(&serde_json::json!("new")));
    }

    #[test]
    fn corrupt_storage_reads_as_empty() {
        let backend = MemoryBackend::new();
        backend.seed("my-list", "{not json");
        let store = ShelfStore::new(backend);

        assert!(!store.is_member(Shelf::List, "a"));
        assert!(store.entries(Shelf::List).is_empty());
    }

    #[test]
    fn wrong_shape_reads_as_empty() {
        let backend = MemoryBackend::new();
        backend.seed("my-list", r#"{"id":"not-an-array"}"#);
        let store = ShelfStore::new(backend);

        assert!(store.entries(Shelf::List).is_empty());
    }

    #[test]
    fn toggle_recovers_a_corrupt_shelf() {
        let backend = MemoryBackend::new();
        backend.seed("favorites", "%%%%");
        let store = ShelfStore::new(backend);

        assert!(store.toggle(Shelf::Favorites, &entry("a")));
        assert!(store.is_member(Shelf::Favorites, "a"));
    }

    #[test]
    fn blank_id_entries_dropped_on_read() {
        let backend = MemoryBackend::new();
        backend.seed("my-list", r#"[{"id":""},{"id":"keep"}]"#);
        let store = ShelfStore::new(backend);

        let ids: Vec<_> = store
            .entries(Shelf::List)
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(ids, vec!["keep"]);
    }

    #[test]
    fn missing_id_field_fails_open_to_empty() {
        let backend = MemoryBackend::new();
        backend.seed("my-list", r#"[{"id":"a"},{"title":"no id"}]"#);
        let store = ShelfStore::new(backend);

        assert!(store.entries(Shelf::List).is_empty());
    }

    #[test]
    fn read_your_writes() {
        let store = ShelfStore::new(MemoryBackend::new());
        let e = entry("a");

        assert!(store.toggle(Shelf::List, &e));
        assert!(store.is_member(Shelf::List, "a"));
        assert!(!store.toggle(Shelf::List, &e));
        assert!(!store.is_member(Shelf::List, "a"));
    }

    #[test]
    fn toggle_notifies_subscribers_with_shelf_key() {
        let store = ShelfStore::new(MemoryBackend::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);

        let _sub = store.subscribe(move |key: String| {
            assert_eq!(key, "my-list");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.toggle(Shelf::List, &entry("a"));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_storage_and_subscribers() {
        let store = ShelfStore::new(MemoryBackend::new());
        let other = store.clone();

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let _sub = other.subscribe(move |_key: String| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.toggle(Shelf::Favorites, &entry("a"));
        assert!(other.is_member(Shelf::Favorites, "a"));

        thread::sleep(Duration::from_millis(50));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn custom_keys_route_storage() {
        let backend = MemoryBackend::new();
        let store = ShelfStore::with_keys(backend.clone(), ShelfKeys::new("pf_mylist", "pf_favorites"));

        store.toggle(Shelf::List, &entry("a"));
        assert!(backend.load("pf_mylist").unwrap().is_some());
        assert!(backend.load("my-list").unwrap().is_none());
    }
}
