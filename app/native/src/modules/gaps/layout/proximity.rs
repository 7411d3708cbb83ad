//! Proximity predicates used to decide whether an edge should snap.
//!
//! Every predicate uses a tolerance of twice the relevant gap. A coordinate
//! that already sits exactly where a snap would put it is *not* near: that is
//! what makes repeated passes over a settled layout leave it alone.

use super::grid::Anchor;
use crate::modules::gaps::state::{Axis, Rect};

/// Tolerance for a given gap size.
#[must_use]
pub const fn tolerance(gap: i32) -> i32 { gap.saturating_mul(2) }

/// Returns true if `actual` is close to either coordinate of `anchor` but not
/// already on its gapped coordinate.
#[must_use]
pub const fn is_near_anchor(actual: i32, anchor: &Anchor, gap: i32) -> bool {
    let tolerance = tolerance(gap);
    ((actual - anchor.closed).abs() <= tolerance || (actual - anchor.gapped).abs() <= tolerance)
        && actual != anchor.gapped
}

/// Returns true if `edge1` is within tolerance of `edge2` and the two are not
/// already exactly `gap` apart.
///
/// `edge1` is the higher coordinate (the left edge of the right window, or the
/// top edge of the lower window).
#[must_use]
pub const fn is_near_edge(edge1: i32, edge2: i32, gap: i32) -> bool {
    (edge1 - edge2).abs() <= tolerance(gap) && edge1 - edge2 != gap
}

/// Returns true if the spans of `a` and `b` on `axis` overlap, allowing for a
/// slack of twice `gap_mid`.
///
/// Either rectangle may come first on the axis. The slack is applied
/// asymmetrically, so callers pass the window being snapped as `a`.
#[must_use]
pub const fn overlaps_on_axis(a: &Rect, b: &Rect, axis: Axis, gap_mid: i32) -> bool {
    let tolerance = tolerance(gap_mid);
    let (a_low, a_high) = a.span(axis);
    let (b_low, b_high) = b.span(axis);

    (a_low <= b_low + tolerance && a_high > b_low + tolerance)
        || (b_low <= a_low + tolerance && b_high + tolerance > a_low)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: Anchor = Anchor { closed: 960, gapped: 966 };

    #[test]
    fn test_near_anchor_within_tolerance_of_closed() {
        assert!(is_near_anchor(960, &ANCHOR, 12));
        assert!(is_near_anchor(936, &ANCHOR, 12));
        assert!(!is_near_anchor(935, &ANCHOR, 12));
    }

    #[test]
    fn test_near_anchor_within_tolerance_of_gapped() {
        assert!(is_near_anchor(990, &ANCHOR, 12));
        assert!(!is_near_anchor(991, &ANCHOR, 12));
    }

    #[test]
    fn test_near_anchor_excludes_exact_gapped() {
        assert!(!is_near_anchor(966, &ANCHOR, 12));
        assert!(is_near_anchor(965, &ANCHOR, 12));
        assert!(is_near_anchor(967, &ANCHOR, 12));
    }

    #[test]
    fn test_near_anchor_zero_gap() {
        let anchor = Anchor { closed: 0, gapped: 0 };
        assert!(!is_near_anchor(0, &anchor, 0));
        assert!(!is_near_anchor(1, &anchor, 0));

        let anchor = Anchor { closed: 480, gapped: 483 };
        assert!(is_near_anchor(480, &anchor, 0));
        assert!(!is_near_anchor(481, &anchor, 0));
    }

    #[test]
    fn test_near_edge() {
        // win2.left = 960, win1.right = 950 -> 10 apart, tolerance 24
        assert!(is_near_edge(960, 950, 12));
        assert!(is_near_edge(950, 960, 12));
        assert!(is_near_edge(974, 950, 12));
        assert!(!is_near_edge(975, 950, 12));
        assert!(!is_near_edge(925, 950, 12));
    }

    #[test]
    fn test_near_edge_excludes_exact_gap() {
        assert!(!is_near_edge(962, 950, 12));
        assert!(is_near_edge(963, 950, 12));
        // Overlapping by the gap is still near
        assert!(is_near_edge(938, 950, 12));
    }

    #[test]
    fn test_overlap_side_by_side_windows() {
        let a = Rect::new(0, 0, 960, 1080);
        let b = Rect::new(960, 0, 960, 1080);
        assert!(overlaps_on_axis(&a, &b, Axis::Vertical, 12));
        assert!(overlaps_on_axis(&b, &a, Axis::Vertical, 12));
    }

    #[test]
    fn test_overlap_partial() {
        let a = Rect::new(0, 0, 500, 500);
        let b = Rect::new(500, 300, 500, 500);
        assert!(overlaps_on_axis(&a, &b, Axis::Vertical, 12));
        assert!(overlaps_on_axis(&b, &a, Axis::Vertical, 12));
    }

    #[test]
    fn test_no_overlap_when_stacked_apart() {
        let a = Rect::new(0, 0, 500, 500);
        let b = Rect::new(500, 600, 500, 500);
        assert!(!overlaps_on_axis(&a, &b, Axis::Vertical, 12));
        assert!(!overlaps_on_axis(&b, &a, Axis::Vertical, 12));
    }

    #[test]
    fn test_corner_touching_windows_do_not_overlap() {
        // b starts just below a; the slack is not enough to count as a shared span.
        let a = Rect::new(0, 0, 500, 500);
        let b = Rect::new(500, 490, 500, 500);
        assert!(!overlaps_on_axis(&a, &b, Axis::Vertical, 12));
    }

    #[test]
    fn test_overlap_horizontal_axis() {
        let top = Rect::new(0, 0, 1920, 540);
        let bottom = Rect::new(960, 540, 960, 540);
        assert!(overlaps_on_axis(&top, &bottom, Axis::Horizontal, 12));
        assert!(overlaps_on_axis(&bottom, &top, Axis::Horizontal, 12));

        let far_right = Rect::new(2000, 540, 100, 100);
        assert!(!overlaps_on_axis(&top, &far_right, Axis::Horizontal, 12));
    }

    #[test]
    fn test_tolerance_saturates() {
        assert_eq!(tolerance(12), 24);
        assert_eq!(tolerance(i32::MAX), i32::MAX);
    }
}
