//! Ref-counted scroll locking for modal overlays.
//!
//! Freezes a scrollable surface while at least one overlay holds the lock,
//! and restores the exact prior layout and scroll position when the last
//! holder releases. The surface itself sits behind the `ScrollSurface` trait
//! so hosts and tests supply their own.

mod scroll_lock;
mod surface;

pub use scroll_lock::{ScrollLock, ScrollLockGuard};
pub use surface::{ScrollSurface, SurfaceStyle};
