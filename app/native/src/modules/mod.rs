//! Feature modules for tilegaps.
//!
//! - [`gaps`] - Grid and neighbor snapping of window frames

pub mod gaps;
