//! The window host seam.
//!
//! The gap engine never talks to a window system directly. Everything it
//! needs (the window list, window snapshots, work areas, and a way to move
//! windows) comes through [`WindowHost`].

use crate::modules::gaps::state::{Rect, Window, WindowId};

/// Access to the windows managed by a host.
///
/// All methods take `&self`. Hosts are expected to use interior mutability,
/// and [`WindowHost::set_frame`] may synchronously report the change back to
/// the applier as a new event; the applier drops such nested requests.
pub trait WindowHost {
    /// Returns the ids of all windows, in stacking order.
    fn windows(&self) -> Vec<WindowId>;

    /// Returns a snapshot of a window, or `None` if it no longer exists.
    fn window(&self, id: WindowId) -> Option<Window>;

    /// Returns the maximize area of the screen and desktop a window is on.
    ///
    /// This is the screen minus panels and docks, before any configured
    /// offsets are applied.
    fn work_area(&self, id: WindowId) -> Option<Rect>;

    /// Moves and resizes a window.
    fn set_frame(&self, id: WindowId, frame: Rect);

    /// Returns true if the window's application is excluded from gapping.
    fn is_excluded(&self, _window: &Window) -> bool { false }
}
