//! An in-memory window host backed by a layout snapshot.
//!
//! A [`LayoutSnapshot`] is a JSON description of screens and windows. The
//! [`SnapshotHost`] serves it through [`WindowHost`] and records every frame
//! written back, so a pass can be run and inspected without a window system.
//!
//! ```json
//! {
//!   "screens": [{ "id": 0, "workArea": { "x": 0, "y": 0, "width": 1920, "height": 1080 } }],
//!   "windows": [
//!     { "id": 1, "class": "term", "frame": { "x": 0, "y": 0, "width": 951, "height": 1080 } }
//!   ]
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::TilegapsError;
use crate::modules::gaps::host::WindowHost;
use crate::modules::gaps::state::{Rect, ScreenId, Window, WindowId};

// ============================================================================
// Snapshot Types
// ============================================================================

/// One screen in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSnapshot {
    /// Screen identifier, referenced by `Window::screen`.
    pub id: ScreenId,
    /// Area available to windows, panels and docks excluded.
    pub work_area: Rect,
}

/// Screens and windows at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSnapshot {
    pub screens: Vec<ScreenSnapshot>,
    pub windows: Vec<Window>,
}

impl LayoutSnapshot {
    /// Parses a snapshot from JSON (comments allowed) and validates it.
    ///
    /// # Errors
    ///
    /// Returns `TilegapsError::SnapshotError` if the input is not a valid
    /// snapshot, if screen or window ids repeat, or if a rectangle is out of
    /// range.
    pub fn from_reader(reader: impl Read) -> Result<Self, TilegapsError> {
        let reader = json_comments::StripComments::new(reader);
        let snapshot: Self = serde_json::from_reader(reader)
            .map_err(|err| TilegapsError::SnapshotError(err.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks that screen and window ids are unique and that every work area
    /// and frame lies within [`MAX_COORDINATE`](crate::modules::gaps::MAX_COORDINATE).
    ///
    /// # Errors
    ///
    /// Returns `TilegapsError::SnapshotError` naming the first repeated id or
    /// out-of-range rectangle.
    pub fn validate(&self) -> Result<(), TilegapsError> {
        let mut screens = HashSet::new();
        if let Some(screen) = self.screens.iter().find(|s| !screens.insert(s.id)) {
            return Err(TilegapsError::SnapshotError(format!(
                "duplicate screen id {}",
                screen.id
            )));
        }

        let mut windows = HashSet::new();
        if let Some(window) = self.windows.iter().find(|w| !windows.insert(w.id)) {
            return Err(TilegapsError::SnapshotError(format!(
                "duplicate window id {}",
                window.id
            )));
        }

        if let Some(screen) = self.screens.iter().find(|s| !s.work_area.is_within_bounds()) {
            return Err(TilegapsError::SnapshotError(format!(
                "screen {} work area {} is out of range",
                screen.id, screen.work_area
            )));
        }

        if let Some(window) = self.windows.iter().find(|w| !w.frame.is_within_bounds()) {
            return Err(TilegapsError::SnapshotError(format!(
                "window {} frame {} is out of range",
                window.id, window.frame
            )));
        }

        Ok(())
    }

    /// Returns the work area of a screen.
    #[must_use]
    pub fn work_area(&self, screen: ScreenId) -> Option<Rect> {
        self.screens.iter().find(|s| s.id == screen).map(|s| s.work_area)
    }
}

/// A frame written back through [`WindowHost::set_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameWrite {
    pub id: WindowId,
    pub before: Rect,
    pub after: Rect,
}

// ============================================================================
// Snapshot Host
// ============================================================================

/// A [`WindowHost`] serving a [`LayoutSnapshot`].
#[derive(Debug, Default)]
pub struct SnapshotHost {
    screens: Vec<ScreenSnapshot>,
    windows: RefCell<Vec<Window>>,
    writes: RefCell<Vec<FrameWrite>>,
}

impl SnapshotHost {
    /// Creates a host serving the given snapshot.
    #[must_use]
    pub fn new(snapshot: LayoutSnapshot) -> Self {
        Self {
            screens: snapshot.screens,
            windows: RefCell::new(snapshot.windows),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Returns every frame written so far, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<FrameWrite> { self.writes.borrow().clone() }

    /// Returns the current frame of a window.
    #[must_use]
    pub fn frame(&self, id: WindowId) -> Option<Rect> {
        self.windows.borrow().iter().find(|w| w.id == id).map(|w| w.frame)
    }

    /// Adds a window, or replaces the window with the same id.
    pub fn insert_window(&self, window: Window) {
        let mut windows = self.windows.borrow_mut();
        match windows.iter_mut().find(|w| w.id == window.id) {
            Some(existing) => *existing = window,
            None => windows.push(window),
        }
    }

    /// Removes a window, as if it was closed.
    pub fn remove_window(&self, id: WindowId) -> Option<Window> {
        let mut windows = self.windows.borrow_mut();
        let index = windows.iter().position(|w| w.id == id)?;
        Some(windows.remove(index))
    }

    /// Returns the snapshot as it is now, with all writes applied.
    #[must_use]
    pub fn into_snapshot(self) -> LayoutSnapshot {
        LayoutSnapshot {
            screens: self.screens,
            windows: self.windows.into_inner(),
        }
    }
}

impl WindowHost for SnapshotHost {
    fn windows(&self) -> Vec<WindowId> { self.windows.borrow().iter().map(|w| w.id).collect() }

    fn window(&self, id: WindowId) -> Option<Window> {
        self.windows.borrow().iter().find(|w| w.id == id).cloned()
    }

    fn work_area(&self, id: WindowId) -> Option<Rect> {
        let screen = self.windows.borrow().iter().find(|w| w.id == id)?.screen;
        self.screens.iter().find(|s| s.id == screen).map(|s| s.work_area)
    }

    fn set_frame(&self, id: WindowId, frame: Rect) {
        let before = {
            let mut windows = self.windows.borrow_mut();
            let Some(window) = windows.iter_mut().find(|w| w.id == id) else {
                return;
            };
            std::mem::replace(&mut window.frame, frame)
        };

        self.writes.borrow_mut().push(FrameWrite { id, before, after: frame });
    }
}

// ============================================================================
// Tests
// ============================================================================
