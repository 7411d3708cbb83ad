//! tilegaps - even gaps between windows on a stacking desktop.
//!
//! Window edges that land near a screen edge, or near a quarter, half or
//! three-quarter division of the screen, snap into place with a configurable
//! gap. Adjacent windows are then pulled apart or together until exactly one
//! gap separates them.
//!
//! The engine lives in [`modules::gaps`] and talks to the window system only
//! through the [`WindowHost`](modules::gaps::WindowHost) trait. The binary
//! drives it over JSON layout snapshots.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod modules;
pub mod schema;

pub use modules::gaps;
