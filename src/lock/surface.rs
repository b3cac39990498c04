/// The inline layout styles the scroll lock reads and writes.
///
/// Mirrors the style properties touched on the document body: `position`,
/// `top`, `left`, `right`, and `padding-right`. Values are raw style strings
/// (`""` meaning "unset"), so restoring a snapshot reproduces the prior
/// state exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceStyle {
    pub position: String,
    pub top: String,
    pub left: String,
    pub right: String,
    pub padding_right: String,
}

/// The scrollable surface a `ScrollLock` freezes — the document body seam.
///
/// A real host maps this onto its DOM (or windowing) layer; tests use a
/// recording implementation. Implementations must be shareable across lock
/// holders, hence `Send + Sync`.
pub trait ScrollSurface: Send + Sync {
    /// Current vertical scroll offset, in pixels.
    fn scroll_offset(&self) -> f64;

    /// Width of the viewport including any scrollbar.
    fn viewport_width(&self) -> f64;

    /// Width available to content, excluding the scrollbar.
    fn content_width(&self) -> f64;

    /// Read the current inline styles.
    fn style(&self) -> SurfaceStyle;

    /// Replace the inline styles.
    fn set_style(&self, style: &SurfaceStyle);

    /// Jump to a vertical scroll offset.
    fn scroll_to(&self, offset: f64);

    /// Schedule `callback` for the next render frame. The lock uses this to
    /// restore the scroll offset after styles are back, avoiding a visible
    /// jump mid-paint.
    fn defer(&self, callback: Box<dyn FnOnce() + Send>);
}
