//! Window gaps.
//!
//! Gives windows on a stacking desktop the look of a tiling layout: window
//! edges that land near a screen edge, or near a quarter, half or
//! three-quarter division of the screen, snap into place with a configurable
//! gap, and adjacent windows are pulled apart or together until exactly one
//! gap separates them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Window Host                             │
//! │  (window list, snapshots, work areas, set_frame)            │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │ HostEvent
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Gap Applier                             │
//! │  - One pass at a time (PassLatch)                           │
//! │  - Eligibility rules for the window and its neighbors       │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │ Rect, Gaps
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Layout                                 │
//! │  - build_grid: snap anchors for the available region        │
//! │  - snap_to_grid: edges onto the first nearby anchor         │
//! │  - snap_to_neighbors: exact gaps between adjacent windows   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod applier;
pub mod events;
pub mod host;
pub mod layout;
pub mod rules;
pub mod snapshot;
pub mod state;

pub use applier::{GapApplier, PassGuard, PassLatch, PassOutcome, PassReport, SkipReason};
pub use events::{EventTarget, HostEvent};
pub use host::WindowHost;
pub use layout::{
    Adjacency, Anchor, AnchorName, Grid, NeighborSnap, build_grid, snap_pair, snap_to_grid,
    snap_to_neighbors,
};
pub use rules::{IgnoreReason, ignore_peer, ignore_window};
pub use snapshot::{FrameWrite, LayoutSnapshot, ScreenSnapshot, SnapshotHost};
pub use state::{
    Axis, Gaps, MAX_COORDINATE, Offsets, Rect, Window, WindowId, available_region,
};
