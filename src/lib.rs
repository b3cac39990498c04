mod backend;
mod entry;
mod error;
mod hub;
mod item;
mod lock;
mod shelf;
mod store;
#[cfg(feature = "watcher")]
mod watch;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use entry::ShelfEntry;
pub use error::{InvalidEntry, StorageError};
pub use hub::{ChangeHub, Subscription};
pub use item::ShelfItemView;
pub use lock::{ScrollLock, ScrollLockGuard, ScrollSurface, SurfaceStyle};
pub use shelf::{Shelf, ShelfKeys};
pub use store::ShelfStore;
#[cfg(feature = "watcher")]
pub use watch::{ShelfWatcher, WatcherStats};

// Re-export the EventEmitter from the event_emitter_rs crate
pub use event_emitter_rs::EventEmitter;
