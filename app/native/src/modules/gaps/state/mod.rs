//! State module for the gap engine.
//!
//! This module contains the value types shared by every other part of the
//! engine: `Rect`, `Gaps`, `Offsets`, and the `Window` snapshot.

mod types;

pub use types::{
    Axis, DesktopId, Gaps, MAX_COORDINATE, Offsets, Rect, ScreenId, Window, WindowId,
    available_region,
};
