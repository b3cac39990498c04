use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::entry::ShelfEntry;
use crate::hub::Subscription;
use crate::shelf::Shelf;
use crate::store::ShelfStore;

/// Per-item membership view: "is this on the watchlist" / "is this a
/// favorite", kept current across local toggles and change notifications.
///
/// Toggling flips the cached flag immediately for instant feedback instead
/// of waiting for the notification round-trip; the subscription then
/// re-derives both flags from storage whenever any shelf changes, including
/// changes made by other consumers or other contexts. Dropping the view
/// unsubscribes.
pub struct ShelfItemView {
    store: ShelfStore,
    entry: ShelfEntry,
    on_list: Arc<AtomicBool>,
    is_favorite: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl ShelfItemView {
    pub fn new(store: ShelfStore, entry: ShelfEntry) -> Self {
        let on_list = Arc::new(AtomicBool::new(
            store.is_member(Shelf::List, entry.id()),
        ));
        let is_favorite = Arc::new(AtomicBool::new(
            store.is_member(Shelf::Favorites, entry.id()),
        ));

        let subscription = {
            let reader = store.clone();
            let id = entry.id().to_string();
            let on_list = Arc::clone(&on_list);
            let is_favorite = Arc::clone(&is_favorite);
            store.subscribe(move |_key: String| {
                on_list.store(reader.is_member(Shelf::List, &id), Ordering::SeqCst);
                is_favorite.store(reader.is_member(Shelf::Favorites, &id), Ordering::SeqCst);
            })
        };

        ShelfItemView {
            store,
            entry,
            on_list,
            is_favorite,
            _subscription: subscription,
        }
    }

    pub fn entry(&self) -> &ShelfEntry {
        &self.entry
    }

    pub fn on_list(&self) -> bool {
        self.on_list.load(Ordering::SeqCst)
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite.load(Ordering::SeqCst)
    }

    /// Toggle watchlist membership, returning the new state.
    pub fn toggle_list(&self) -> bool {
        let now = self.store.toggle(Shelf::List, &self.entry);
        self.on_list.store(now, Ordering::SeqCst);
        now
    }

    /// Toggle favorite membership, returning the new state.
    pub fn toggle_favorite(&self) -> bool {
        let now = self.store.toggle(Shelf::Favorites, &self.entry);
        self.is_favorite.store(now, Ordering::SeqCst);
        now
    }

    /// Re-derive both flags from storage now.
    pub fn refresh(&self) {
        self.on_list.store(
            self.store.is_member(Shelf::List, self.entry.id()),
            Ordering::SeqCst,
        );
        self.is_favorite.store(
            self.store.is_member(Shelf::Favorites, self.entry.id()),
            Ordering::SeqCst,
        );
    }
}
