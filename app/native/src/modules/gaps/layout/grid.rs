//! Snap grid construction.
//!
//! A grid holds, for each of the four window edges, the positions that edge
//! may snap to: the full, quarter, half and three-quarter divisions of the
//! available region. Every anchor carries two coordinates:
//!
//! - `closed`: where the division lies when there are no gaps at all
//! - `gapped`: where the edge must end up so the configured gaps appear
//!
//! # Anchor Order
//!
//! Each edge stores its anchors as an ordered array, outermost first (starting
//! at the screen edge the window edge faces). The snap engine takes the first
//! anchor that matches and stops, so the order is part of the contract.
//!
//! ```text
//! left edge:   full-left   quarter-left   half   quarter-right
//! right edge:  full-right  quarter-right  half   quarter-left
//! ```
//!
//! # Interior Anchors
//!
//! An interior boundary is shared by two tiles, each contributing half of the
//! mid gap, so interior gapped anchors are computed over the span
//! `width + gap_left - gap_right + gap_mid`. The `gap_left - gap_right` term
//! re-centers the divisions when the outer gaps differ.

use serde::Serialize;

use crate::modules::gaps::state::{Gaps, Rect};

/// Number of anchors per edge.
pub const ANCHORS_PER_EDGE: usize = 4;

/// Named position of an anchor within the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorName {
    FullLeft,
    QuarterLeft,
    HalfHorizontal,
    QuarterRight,
    FullRight,
    FullTop,
    QuarterTop,
    HalfVertical,
    QuarterBottom,
    FullBottom,
}

impl AnchorName {
    /// Returns the anchor name as a static kebab-case string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullLeft => "full-left",
            Self::QuarterLeft => "quarter-left",
            Self::HalfHorizontal => "half-horizontal",
            Self::QuarterRight => "quarter-right",
            Self::FullRight => "full-right",
            Self::FullTop => "full-top",
            Self::QuarterTop => "quarter-top",
            Self::HalfVertical => "half-vertical",
            Self::QuarterBottom => "quarter-bottom",
            Self::FullBottom => "full-bottom",
        }
    }
}

impl std::fmt::Display for AnchorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// A snap position on one axis, without and with gaps applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Anchor {
    /// Coordinate of the division with no gaps.
    pub closed: i32,
    /// Coordinate the window edge should snap to.
    pub gapped: i32,
}

/// An anchor together with its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NamedAnchor {
    pub name: AnchorName,
    #[serde(flatten)]
    pub anchor: Anchor,
}

/// Ordered anchors for one window edge, outermost first.
pub type EdgeAnchors = [NamedAnchor; ANCHORS_PER_EDGE];

/// Snap anchors for all four window edges of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub left: EdgeAnchors,
    pub right: EdgeAnchors,
    pub top: EdgeAnchors,
    pub bottom: EdgeAnchors,
}

/// Rounds to the nearest pixel, halves away from zero.
#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i32 { value.round() as i32 }

const fn named(name: AnchorName, closed: i32, gapped: i32) -> NamedAnchor {
    NamedAnchor {
        name,
        anchor: Anchor { closed, gapped },
    }
}

/// Anchor names for one axis, from the low (left/top) side to the high side.
struct AxisNames {
    full_low: AnchorName,
    quarter_low: AnchorName,
    half: AnchorName,
    quarter_high: AnchorName,
    full_high: AnchorName,
}

const HORIZONTAL: AxisNames = AxisNames {
    full_low: AnchorName::FullLeft,
    quarter_low: AnchorName::QuarterLeft,
    half: AnchorName::HalfHorizontal,
    quarter_high: AnchorName::QuarterRight,
    full_high: AnchorName::FullRight,
};

const VERTICAL: AxisNames = AxisNames {
    full_low: AnchorName::FullTop,
    quarter_low: AnchorName::QuarterTop,
    half: AnchorName::HalfVertical,
    quarter_high: AnchorName::QuarterBottom,
    full_high: AnchorName::FullBottom,
};

/// Builds the anchors of one axis.
///
/// `low` and `high` are the first and last pixel of the region on this axis,
/// `size` its extent, and `gap_low` / `gap_high` the outer gaps on either side.
/// Returns `(low_edge_anchors, high_edge_anchors)`.
fn axis_anchors(
    names: &AxisNames,
    low: i32,
    high: i32,
    size: i32,
    gap_low: i32,
    gap_high: i32,
    gap_mid: i32,
) -> (EdgeAnchors, EdgeAnchors) {
    let low_f = f64::from(low);
    let high_f = f64::from(high);
    let size_f = f64::from(size);
    let span = f64::from(size) + f64::from(gap_low) - f64::from(gap_high) + f64::from(gap_mid);

    let low_edge = [
        named(names.full_low, round(low_f), round(low_f + f64::from(gap_low))),
        named(names.quarter_low, round(low_f + size_f / 4.0), round(low_f + span / 4.0)),
        named(names.half, round(low_f + size_f / 2.0), round(low_f + span / 2.0)),
        named(
            names.quarter_high,
            round(low_f + 3.0 * (size_f / 4.0)),
            round(low_f + 3.0 * span / 4.0),
        ),
    ];

    let high_edge = [
        named(names.full_high, round(high_f), round(high_f - f64::from(gap_high))),
        named(names.quarter_high, round(high_f - size_f / 4.0), round(high_f - span / 4.0)),
        named(names.half, round(high_f - size_f / 2.0), round(high_f - span / 2.0)),
        named(
            names.quarter_low,
            round(high_f - 3.0 * (size_f / 4.0)),
            round(high_f - 3.0 * span / 4.0),
        ),
    ];

    (low_edge, high_edge)
}

/// Builds the snap grid for a region.
///
/// # Arguments
///
/// * `region` - The available region (work area minus offsets)
/// * `gaps` - Gap sizes to compensate for
#[must_use]
pub fn build_grid(region: &Rect, gaps: &Gaps) -> Grid {
    let (left, right) = axis_anchors(
        &HORIZONTAL,
        region.left(),
        region.right(),
        region.width,
        gaps.left,
        gaps.right,
        gaps.mid,
    );
    let (top, bottom) = axis_anchors(
        &VERTICAL,
        region.top(),
        region.bottom(),
        region.height,
        gaps.top,
        gaps.bottom,
        gaps.mid,
    );

    Grid { left, right, top, bottom }
}

impl Grid {
    /// Looks up an anchor on the left edge by name.
    #[must_use]
    pub fn left_anchor(&self, name: AnchorName) -> Option<Anchor> { find(&self.left, name) }

    /// Looks up an anchor on the right edge by name.
    #[must_use]
    pub fn right_anchor(&self, name: AnchorName) -> Option<Anchor> { find(&self.right, name) }

    /// Looks up an anchor on the top edge by name.
    #[must_use]
    pub fn top_anchor(&self, name: AnchorName) -> Option<Anchor> { find(&self.top, name) }

    /// Looks up an anchor on the bottom edge by name.
    #[must_use]
    pub fn bottom_anchor(&self, name: AnchorName) -> Option<Anchor> { find(&self.bottom, name) }
}

fn find(edge: &EdgeAnchors, name: AnchorName) -> Option<Anchor> {
    edge.iter().find(|named| named.name == name).map(|named| named.anchor)
}

// ============================================================================
// Tests
// ============================================================================
