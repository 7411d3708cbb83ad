//! Eligibility rules.
//!
//! Decides which windows take part in a pass, both as the window being snapped
//! and as a neighbor of it.
//!
//! # Rules
//!
//! A window is ignored when it is:
//!
//! - not a normal application window (panels, menus, docks)
//! - being moved or resized by the user
//! - fullscreen
//! - maximized, unless maximized windows are explicitly included
//!
//! A neighbor is additionally ignored when it is the window itself, lives on
//! another desktop or screen, or is minimized.

use serde::Serialize;

use crate::modules::gaps::state::{Rect, Window};

/// Why a window was left out of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoreReason {
    /// Not a regular application window.
    NotNormal,
    /// An interactive move or resize is in progress.
    MovingOrResizing,
    /// The window is fullscreen.
    Fullscreen,
    /// The window is maximized and maximized windows are not included.
    Maximized,
    /// The host excluded the window's application.
    Excluded,
}

impl IgnoreReason {
    /// Returns the reason as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotNormal => "not-normal",
            Self::MovingOrResizing => "moving-or-resizing",
            Self::Fullscreen => "fullscreen",
            Self::Maximized => "maximized",
            Self::Excluded => "excluded",
        }
    }
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Checks whether a window should be left alone.
///
/// # Arguments
///
/// * `window` - The window snapshot
/// * `work_area` - The host work area for the window, used to detect windows
///   that fill it without carrying the maximized flag
/// * `include_maximized` - Whether maximized windows are gapped too
///
/// # Returns
///
/// The first rule that matched, or `None` if the window is eligible.
#[must_use]
pub fn ignore_window(
    window: &Window,
    work_area: Option<&Rect>,
    include_maximized: bool,
) -> Option<IgnoreReason> {
    if !window.is_normal {
        return Some(IgnoreReason::NotNormal);
    }

    if window.is_moving_or_resizing {
        return Some(IgnoreReason::MovingOrResizing);
    }

    if window.is_fullscreen {
        return Some(IgnoreReason::Fullscreen);
    }

    if !include_maximized
        && (window.is_maximized || work_area.is_some_and(|area| *area == window.frame))
    {
        return Some(IgnoreReason::Maximized);
    }

    None
}

/// Checks whether `other` should be skipped as a neighbor of `window`.
///
/// `other_ignored` is the result of running the window rules on `other`.
#[must_use]
pub fn ignore_peer(window: &Window, other: &Window, other_ignored: Option<IgnoreReason>) -> bool {
    other_ignored.is_some()
        || other.id == window.id
        || !window.shares_desktop_with(other)
        || other.screen != window.screen
        || other.is_minimized
}

// ============================================================================
// Tests
// ============================================================================
