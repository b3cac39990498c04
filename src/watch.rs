//! Background watcher for cross-context shelf changes.
//!
//! The browser delivers a `storage` event when another tab writes; outside a
//! browser there is no such push channel, so this module polls the backend's
//! change fingerprints and republishes on the store's hub when another
//! context has written a shelf.

use std::sync::mpsc::{channel, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::shelf::Shelf;
use crate::store::ShelfStore;

const SHELVES: [Shelf; 2] = [Shelf::List, Shelf::Favorites];

/// Statistics from the watcher thread.
#[derive(Debug, Default, Clone)]
pub struct WatcherStats {
    pub polls: usize,
    pub changes_seen: usize,
}

/// A background thread that polls storage fingerprints for both shelves and
/// calls `ShelfStore::notify_changed` when one of them changes.
///
/// Local toggles also move the fingerprint, so subscribers may receive a
/// redundant self-notification — delivery is at-least-once by design.
///
/// ## Example
///
/// ```ignore
/// use shelfkit::{FileBackend, ShelfStore, ShelfWatcher};
/// use std::time::Duration;
///
/// let store = ShelfStore::new(FileBackend::new("/tmp/shelves")?);
/// let watcher = ShelfWatcher::spawn(store.clone(), Duration::from_millis(200));
///
/// // ... subscribers now hear about writes from other processes ...
///
/// let stats = watcher.stop();
/// println!("saw {} external changes", stats.changes_seen);
/// ```
pub struct ShelfWatcher {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<WatcherStats>>,
}

impl ShelfWatcher {
    /// Spawn the watcher over a clone of the store.
    ///
    /// Fingerprints are primed before the first poll, so shelves that
    /// already have data do not fire a notification at startup.
    pub fn spawn(store: ShelfStore, poll_interval: Duration) -> Self {
        let (stop_tx, stop_rx) = channel();

        let handle = thread::spawn(move || {
            let mut stats = WatcherStats::default();
            let mut last = [None, None];

            for (slot, shelf) in SHELVES.iter().enumerate() {
                let key = store.keys().key(*shelf);
                last[slot] = store.backend().fingerprint(key).unwrap_or(None);
            }

            loop {
                // Check for stop signal
                match stop_rx.try_recv() {
                    Ok(()) | Err(TryRecvError::Disconnected) => break,
                    Err(TryRecvError::Empty) => {}
                }

                stats.polls += 1;

                for (slot, shelf) in SHELVES.iter().enumerate() {
                    let key = store.keys().key(*shelf);
                    match store.backend().fingerprint(key) {
                        Ok(current) => {
                            if current != last[slot] {
                                last[slot] = current;
                                stats.changes_seen += 1;
                                store.notify_changed(*shelf);
                            }
                        }
                        Err(err) => {
                            log::warn!("fingerprint poll failed for {}: {}", key, err);
                        }
                    }
                }

                thread::sleep(poll_interval);
            }

            stats
        });

        ShelfWatcher {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Signal the watcher to stop and wait for it to finish.
    /// Returns the watcher statistics.
    pub fn stop(mut self) -> WatcherStats {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap_or_default()
        } else {
            WatcherStats::default()
        }
    }

    /// Signal the watcher to stop without waiting.
    pub fn signal_stop(&self) {
        let _ = self.stop_tx.send(());
    }
}

impl Drop for ShelfWatcher {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
        // Don't join on drop - let the thread finish naturally
    }
}
