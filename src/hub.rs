use std::sync::{Arc, Mutex, PoisonError};

use event_emitter_rs::EventEmitter;

/// Event name used for every shelf mutation. The payload is the storage key
/// of the shelf that changed.
const SHELF_CHANGED: &str = "shelf-changed";

/// In-process broadcast channel for shelf-change notifications.
///
/// Wraps an `EventEmitter` behind a mutex so a store and all of its clones
/// share one subscriber list. Delivery is at-least-once and asynchronous —
/// the emitter invokes listeners on their own threads, so subscribers must
/// treat notifications as push messages arriving at an arbitrary later time.
pub struct ChangeHub {
    emitter: Mutex<EventEmitter>,
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeHub {
    pub fn new() -> Self {
        ChangeHub {
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Register a listener invoked with the shelf key on every mutation.
    ///
    /// The returned `Subscription` removes the listener when dropped or
    /// explicitly unsubscribed.
    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> Subscription
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let id = self
            .emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on(SHELF_CHANGED, listener);
        Subscription {
            hub: Arc::clone(self),
            id: Some(id),
        }
    }

    /// Notify all listeners that the shelf under `key` changed.
    pub fn publish(&self, key: &str) {
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .emit(SHELF_CHANGED, key.to_string());
    }

    fn remove(&self, id: &str) {
        self.emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_listener(id);
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
pub struct Subscription {
    hub: Arc<ChangeHub>,
    id: Option<String>,
}

impl Subscription {
    /// Remove the listener now instead of waiting for drop.
    pub fn unsubscribe(mut self) {
        if let Some(id) = self.id.take() {
            self.hub.remove(&id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.hub.remove(&id);
        }
    }
}
