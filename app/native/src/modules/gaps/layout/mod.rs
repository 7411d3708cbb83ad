//! Geometry for the gap engine.
//!
//! - [`grid`] - Snap anchors for a screen region
//! - [`proximity`] - "Close enough to snap" predicates
//! - [`snap`] - Grid and neighbor snapping
//!
//! Everything here is a pure function of its inputs.

pub mod grid;
pub mod proximity;
pub mod snap;

pub use grid::{ANCHORS_PER_EDGE, Anchor, AnchorName, EdgeAnchors, Grid, NamedAnchor, build_grid};
pub use proximity::{is_near_anchor, is_near_edge, overlaps_on_axis, tolerance};
pub use snap::{
    Adjacency, NeighborSnap, half_ceil, half_floor, snap_pair, snap_to_grid, snap_to_neighbors,
};
