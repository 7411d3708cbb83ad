//! Snap engine.
//!
//! Two independent corrections make up one pass over a window:
//!
//! 1. [`snap_to_grid`] moves each window edge onto the gapped coordinate of
//!    the first grid anchor it is near.
//! 2. [`snap_to_neighbors`] evens out the space between the window and every
//!    adjacent window so exactly one mid gap separates them, moving both sides
//!    by half of the difference.
//!
//! Both are single-shot: there is no iteration to a fixed point. The host
//! re-triggers a pass whenever geometry changes.

use tracing::debug;

use super::grid::{EdgeAnchors, Grid};
use super::proximity::{is_near_anchor, is_near_edge, overlaps_on_axis};
use crate::modules::gaps::state::{Axis, Gaps, Rect, WindowId};

// ============================================================================
// Half Splits
// ============================================================================

/// Half of `value`, rounded toward negative infinity.
#[must_use]
pub const fn half_floor(value: i32) -> i32 { value.div_euclid(2) }

/// Half of `value`, rounded toward positive infinity.
///
/// `half_floor(v) + half_ceil(v) == v` for every `v`.
#[must_use]
pub const fn half_ceil(value: i32) -> i32 { value - half_floor(value) }

// ============================================================================
// Grid Snapping
// ============================================================================

/// Returns the gapped coordinate of the first anchor `edge` is near.
fn first_match(edge: i32, anchors: &EdgeAnchors, gap: i32, side: &str) -> Option<i32> {
    anchors.iter().find(|named| is_near_anchor(edge, &named.anchor, gap)).map(|named| {
        debug!(side, anchor = %named.name, from = edge, to = named.anchor.gapped, "gap to grid edge");
        named.anchor.gapped
    })
}

/// Snaps each edge of `frame` onto the grid.
///
/// Edges are handled independently, in the order left, right, top, bottom.
/// Moving the left (top) edge keeps the right (bottom) edge in place; moving
/// the right (bottom) edge only changes the size. An edge that is not near any
/// anchor is left where it is.
#[must_use]
pub fn snap_to_grid(frame: Rect, grid: &Grid, gaps: &Gaps) -> Rect {
    let mut frame = frame;

    if let Some(target) = first_match(frame.left(), &grid.left, gaps.left, "left") {
        frame.shift_left_edge(target - frame.left());
    }

    if let Some(target) = first_match(frame.right(), &grid.right, gaps.right, "right") {
        frame.width -= frame.right() - target;
    }

    if let Some(target) = first_match(frame.top(), &grid.top, gaps.top, "top") {
        frame.shift_top_edge(target - frame.top());
    }

    if let Some(target) = first_match(frame.bottom(), &grid.bottom, gaps.bottom, "bottom") {
        frame.height -= frame.bottom() - target;
    }

    frame
}

// ============================================================================
// Neighbor Snapping
// ============================================================================

/// Which side of the window a neighbor was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjacency {
    /// The neighbor is to the left.
    Left,
    /// The neighbor is to the right.
    Right,
    /// The neighbor is above.
    Above,
    /// The neighbor is below.
    Below,
}

/// Closes the gap between a window and one neighbor on the given side.
///
/// `window` is on the high side of the shared boundary when `adjacency` is
/// `Left`/`Above`, and on the low side for `Right`/`Below`. The high-side
/// rectangle has its low edge moved; the low-side rectangle has its size
/// adjusted. Returns true if the pair matched and was adjusted.
fn close_gap(window: &mut Rect, neighbor: &mut Rect, adjacency: Adjacency, gap_mid: i32) -> bool {
    let (axis, perpendicular) = match adjacency {
        Adjacency::Left | Adjacency::Right => (Axis::Horizontal, Axis::Vertical),
        Adjacency::Above | Adjacency::Below => (Axis::Vertical, Axis::Horizontal),
    };

    if !overlaps_on_axis(window, neighbor, perpendicular, gap_mid) {
        return false;
    }

    let (low, high) = match adjacency {
        Adjacency::Left | Adjacency::Above => (neighbor, window),
        Adjacency::Right | Adjacency::Below => (window, neighbor),
    };

    let (low_end, high_start) = match axis {
        Axis::Horizontal => (low.right(), high.left()),
        Axis::Vertical => (low.bottom(), high.top()),
    };

    if !is_near_edge(high_start, low_end, gap_mid) {
        return false;
    }

    let diff = high_start - low_end;
    let high_shift = -half_floor(diff) + half_ceil(gap_mid);
    let low_growth = half_ceil(diff) - half_floor(gap_mid);

    match axis {
        Axis::Horizontal => {
            high.shift_left_edge(high_shift);
            low.width += low_growth;
        }
        Axis::Vertical => {
            high.shift_top_edge(high_shift);
            low.height += low_growth;
        }
    }

    true
}

/// Result of snapping a window against its neighbors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborSnap {
    /// The adjusted frame of the window being snapped.
    pub frame: Rect,
    /// Neighbors whose frames changed, with their new frames, in input order.
    pub adjusted: Vec<(WindowId, Rect)>,
}

/// Adjusts `window` and one neighbor so that exactly `gap_mid` separates them
/// on every side where they are near each other.
///
/// The four sides are checked in the order left, right, above, below; each
/// check sees the result of the previous ones. Returns the sides that matched.
pub fn snap_pair(window: &mut Rect, neighbor: &mut Rect, gap_mid: i32) -> Vec<Adjacency> {
    let mut matched = Vec::new();
    for adjacency in [Adjacency::Left, Adjacency::Right, Adjacency::Above, Adjacency::Below] {
        if close_gap(window, neighbor, adjacency, gap_mid) {
            matched.push(adjacency);
        }
    }
    matched
}

/// Snaps `frame` against each neighbor in turn.
///
/// Corrections are pairwise and cumulative: each neighbor sees the window as
/// left by the previous neighbors. There is no global relaxation, so three or
/// more mutually adjacent windows may need another pass to settle.
#[must_use]
pub fn snap_to_neighbors(frame: Rect, neighbors: &[(WindowId, Rect)], gap_mid: i32) -> NeighborSnap {
    let mut frame = frame;
    let mut adjusted = Vec::new();

    for &(id, neighbor_frame) in neighbors {
        let mut neighbor = neighbor_frame;
        let sides = snap_pair(&mut frame, &mut neighbor, gap_mid);
        if !sides.is_empty() {
            debug!(neighbor = id, ?sides, "gap to neighbor window");
        }
        if neighbor != neighbor_frame {
            adjusted.push((id, neighbor));
        }
    }

    NeighborSnap { frame, adjusted }
}

// ============================================================================
// Tests
// ============================================================================
