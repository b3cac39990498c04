use std::sync::{Arc, Mutex, PoisonError};

use super::surface::{ScrollSurface, SurfaceStyle};

/// Layout captured at the 0→1 transition, restored at 1→0.
struct SavedLayout {
    style: SurfaceStyle,
    scroll_offset: f64,
}

struct LockState {
    count: u32,
    saved: Option<SavedLayout>,
}

/// Reference-counted scroll freeze for a shared surface.
///
/// Any number of holders (nested or sibling overlays) may acquire
/// concurrently; the surface is only touched on the true edge transitions.
/// On 0→1 the current scroll offset and inline styles are captured, then the
/// surface is frozen in place: compensating right padding for the vanished
/// scrollbar, `position: fixed`, `top: -{offset}px`. On 1→0 the captured
/// styles are restored exactly and the scroll offset is restored on the next
/// render frame.
///
/// One `ScrollLock` guards one surface; share it via `Arc` so independent
/// holders cooperate on the same counter.
pub struct ScrollLock {
    state: Mutex<LockState>,
    surface: Option<Arc<dyn ScrollSurface>>,
}

impl ScrollLock {
    /// Create a lock over a surface. Holders share the lock (and therefore
    /// the counter) via the returned `Arc`.
    pub fn new(surface: Arc<dyn ScrollSurface>) -> Arc<Self> {
        Arc::new(ScrollLock {
            state: Mutex::new(LockState {
                count: 0,
                saved: None,
            }),
            surface: Some(surface),
        })
    }

    /// Create a lock with no surface. Acquire and release only move the
    /// counter — the headless (non-browser) path, where locking is a no-op.
    pub fn detached() -> Arc<Self> {
        Arc::new(ScrollLock {
            state: Mutex::new(LockState {
                count: 0,
                saved: None,
            }),
            surface: None,
        })
    }

    /// Current number of holders.
    pub fn count(&self) -> u32 {
        self.lock_state().count
    }

    pub fn is_locked(&self) -> bool {
        self.count() > 0
    }

    /// Increment the hold count, freezing the surface on the 0→1 edge.
    /// The returned guard releases exactly once when dropped.
    pub fn acquire(self: &Arc<Self>) -> ScrollLockGuard {
        let mut state = self.lock_state();
        state.count += 1;

        if state.count == 1 {
            if let Some(surface) = &self.surface {
                state.saved = Some(freeze(surface.as_ref()));
            }
        }

        ScrollLockGuard {
            lock: Arc::clone(self),
        }
    }

    /// Decrement the hold count, restoring the surface on the 1→0 edge.
    ///
    /// Calling this without a matching acquire clamps at zero and logs —
    /// unbalanced holders are a caller bug, not a reason to panic.
    pub fn release(&self) {
        let mut state = self.lock_state();
        if state.count == 0 {
            log::warn!("scroll lock released without a matching acquire");
            return;
        }

        state.count -= 1;
        if state.count == 0 {
            let saved = state.saved.take();
            if let (Some(surface), Some(saved)) = (&self.surface, saved) {
                restore(surface, saved);
            }
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, LockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn freeze(surface: &dyn ScrollSurface) -> SavedLayout {
    let style = surface.style();
    let scroll_offset = surface.scroll_offset();
    let scrollbar = surface.viewport_width() - surface.content_width();

    let mut frozen = style.clone();
    if scrollbar > 0.0 {
        frozen.padding_right = format!("{}px", scrollbar);
    }
    frozen.position = "fixed".to_string();
    frozen.top = format!("-{}px", scroll_offset);
    frozen.left = "0".to_string();
    frozen.right = "0".to_string();
    surface.set_style(&frozen);

    SavedLayout {
        style,
        scroll_offset,
    }
}

fn restore(surface: &Arc<dyn ScrollSurface>, saved: SavedLayout) {
    surface.set_style(&saved.style);

    // Scroll restoration waits for the next frame so the style restore has
    // painted first.
    let deferred = Arc::clone(surface);
    let offset = saved.scroll_offset;
    surface.defer(Box::new(move || deferred.scroll_to(offset)));
}

/// Releases its hold on the lock when dropped, on every exit path.
pub struct ScrollLockGuard {
    lock: Arc<ScrollLock>,
}

impl ScrollLockGuard {
    /// Release now instead of at end of scope.
    pub fn release(self) {}
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.lock.release();
    }
}
