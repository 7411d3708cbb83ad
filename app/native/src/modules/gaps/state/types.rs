//! Core state types for the gap engine.
//!
//! These are plain value types. Window identity and lifetime belong to the
//! host; the engine only ever sees a [`Window`] snapshot and hands back a new
//! [`Rect`] through the host.

use serde::{Deserialize, Serialize};

use crate::config::{GapsConfig, OffsetsConfig};

/// Host-assigned window identifier.
pub type WindowId = u64;

/// Largest coordinate, size, gap or offset the engine works with.
///
/// Anything inside this bound keeps every edge and anchor computation well
/// clear of `i32` overflow.
pub const MAX_COORDINATE: i32 = 1 << 24;

// ============================================================================
// Geometry Types
// ============================================================================

/// A rectangle in whole pixels.
///
/// Only the position and size are stored. Edges are derived on demand so they
/// can never drift from the canonical fields. `right` and `bottom` are the last
/// pixel covered by the rectangle (inclusive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a zero-sized rectangle at origin.
    #[must_use]
    pub const fn zero() -> Self { Self::new(0, 0, 0, 0) }

    /// Leftmost pixel column.
    #[must_use]
    pub const fn left(&self) -> i32 { self.x }

    /// Topmost pixel row.
    #[must_use]
    pub const fn top(&self) -> i32 { self.y }

    /// Rightmost pixel column (inclusive).
    #[must_use]
    pub const fn right(&self) -> i32 { self.x + self.width - 1 }

    /// Bottommost pixel row (inclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 { self.y + self.height - 1 }

    /// Check if this rectangle has positive dimensions.
    #[must_use]
    pub const fn is_valid(&self) -> bool { self.width > 0 && self.height > 0 }

    /// Check that no field is further than [`MAX_COORDINATE`] from zero.
    #[must_use]
    pub const fn is_within_bounds(&self) -> bool {
        const LIMIT: u32 = MAX_COORDINATE.unsigned_abs();
        self.x.unsigned_abs() <= LIMIT
            && self.y.unsigned_abs() <= LIMIT
            && self.width.unsigned_abs() <= LIMIT
            && self.height.unsigned_abs() <= LIMIT
    }

    /// Moves the left edge by `delta` pixels, keeping the right edge fixed.
    pub const fn shift_left_edge(&mut self, delta: i32) {
        self.x += delta;
        self.width -= delta;
    }

    /// Moves the top edge by `delta` pixels, keeping the bottom edge fixed.
    pub const fn shift_top_edge(&mut self, delta: i32) {
        self.y += delta;
        self.height -= delta;
    }

    /// Returns the `[low, high]` pixel span of this rectangle along `axis`.
    #[must_use]
    pub const fn span(&self, axis: Axis) -> (i32, i32) {
        match axis {
            Axis::Horizontal => (self.left(), self.right()),
            Axis::Vertical => (self.top(), self.bottom()),
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// One of the two screen axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

// ============================================================================
// Gap Types
// ============================================================================

/// Gap sizes in pixels.
///
/// The four outer values separate windows from the edges of the available
/// region; `mid` separates two adjacent windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gaps {
    /// Gap from the top edge of the region.
    pub top: i32,
    /// Gap from the left edge of the region.
    pub left: i32,
    /// Gap from the right edge of the region.
    pub right: i32,
    /// Gap from the bottom edge of the region.
    pub bottom: i32,
    /// Gap between two windows.
    pub mid: i32,
}

impl Gaps {
    /// Create gaps with all values set to zero.
    #[must_use]
    pub const fn zero() -> Self { Self::uniform(0) }

    /// Create gaps with the same value everywhere.
    #[must_use]
    pub const fn uniform(gap: i32) -> Self {
        Self {
            top: gap,
            left: gap,
            right: gap,
            bottom: gap,
            mid: gap,
        }
    }

    /// Resolves gaps from configuration.
    #[must_use]
    pub fn from_config(config: &GapsConfig) -> Self {
        Self {
            top: saturate(config.top),
            left: saturate(config.left),
            right: saturate(config.right),
            bottom: saturate(config.bottom),
            mid: saturate(config.mid),
        }
    }
}

/// Space reserved along each screen edge, e.g. for floating panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Offsets {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Offsets {
    /// Resolves offsets from configuration.
    #[must_use]
    pub fn from_config(config: &OffsetsConfig) -> Self {
        Self {
            top: saturate(config.top),
            left: saturate(config.left),
            right: saturate(config.right),
            bottom: saturate(config.bottom),
        }
    }
}

fn saturate(value: u32) -> i32 {
    i32::try_from(value).map_or(MAX_COORDINATE, |v| v.min(MAX_COORDINATE))
}

/// Computes the region windows are snapped within.
///
/// The offsets are subtracted from the host-reported work area. Offsets larger
/// than the area yield a rectangle with non-positive dimensions; that is passed
/// through as-is.
#[must_use]
pub const fn available_region(work_area: &Rect, offsets: &Offsets) -> Rect {
    Rect::new(
        work_area.x + offsets.left,
        work_area.y + offsets.top,
        work_area.width - offsets.left - offsets.right,
        work_area.height - offsets.top - offsets.bottom,
    )
}

// ============================================================================
// Window Type
// ============================================================================

/// Virtual desktop a window lives on.
pub type DesktopId = u32;

/// Screen a window is shown on.
pub type ScreenId = u32;

/// A read-only snapshot of a host window.
///
/// Missing fields deserialize to a normal, visible window on desktop 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Window {
    /// Host window identifier.
    pub id: WindowId,

    /// Window class / application identifier.
    pub class: String,

    /// Current frame geometry.
    pub frame: Rect,

    /// Virtual desktop the window is on.
    pub desktop: DesktopId,

    /// Screen the window is on.
    pub screen: ScreenId,

    /// Whether this is a regular application window (not a panel, menu, etc.).
    pub is_normal: bool,

    /// Whether the window is a dock / panel.
    pub is_dock: bool,

    /// Whether the window is fullscreen.
    pub is_fullscreen: bool,

    /// Whether the host reports the window as maximized.
    pub is_maximized: bool,

    /// Whether the window is minimized.
    pub is_minimized: bool,

    /// Whether the user is currently dragging or resizing the window.
    pub is_moving_or_resizing: bool,

    /// Whether the window is shown on every desktop.
    pub on_all_desktops: bool,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            id: 0,
            class: String::new(),
            frame: Rect::zero(),
            desktop: 1,
            screen: 0,
            is_normal: true,
            is_dock: false,
            is_fullscreen: false,
            is_maximized: false,
            is_minimized: false,
            is_moving_or_resizing: false,
            on_all_desktops: false,
        }
    }
}

impl Window {
    /// Create a normal window with the given id and frame on desktop 1, screen 0.
    #[must_use]
    pub fn new(id: WindowId, frame: Rect) -> Self {
        Self {
            id,
            frame,
            ..Default::default()
        }
    }

    /// Returns true if both windows are visible on a common desktop.
    #[must_use]
    pub const fn shares_desktop_with(&self, other: &Self) -> bool {
        self.desktop == other.desktop || self.on_all_desktops || other.on_all_desktops
    }
}

// ============================================================================
// Tests
// ============================================================================
