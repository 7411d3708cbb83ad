//! Host events that trigger a gap pass.
//!
//! Per-window events re-run the pass for the window that changed. Global
//! events (desktop, screen and activity changes) re-run it for every window,
//! since any of them can change the work area a window is snapped within.

use crate::modules::gaps::state::WindowId;

// ============================================================================
// Event Types
// ============================================================================

/// An event reported by the window host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    // Per-window events
    /// A window appeared (or was present when the host started).
    WindowAdded(WindowId),
    /// The window geometry changed.
    GeometryChanged(WindowId),
    /// The window frame (decorations included) changed.
    FrameGeometryChanged(WindowId),
    /// The client area (decorations excluded) changed.
    ClientGeometryChanged(WindowId),
    /// The window started or stopped an interactive move or resize.
    MoveResizeChanged(WindowId),
    /// The user finished moving or resizing the window.
    MoveResizeFinished(WindowId),
    /// The window entered or left fullscreen.
    FullscreenChanged(WindowId),
    /// The window was maximized or restored.
    MaximizedChanged(WindowId),
    /// The window was restored from minimized state.
    Unminimized(WindowId),
    /// The window moved to another screen.
    ScreenChanged(WindowId),
    /// The window moved to another desktop.
    DesktopChanged(WindowId),

    // Global events
    /// The active desktop changed.
    CurrentDesktopChanged,
    /// A window was added to or removed from a desktop.
    DesktopPresenceChanged,
    /// Desktops were added or removed.
    DesktopCountChanged,
    /// Screens were connected or disconnected.
    ScreenCountChanged,
    /// A screen changed resolution.
    ScreenResized,
    /// The active activity changed.
    CurrentActivityChanged,
    /// Activities were added or removed.
    ActivitiesChanged,
    /// The combined size of all screens changed.
    VirtualScreenSizeChanged,
    /// The combined geometry of all screens changed.
    VirtualScreenGeometryChanged,
}

/// Which windows an event asks to re-gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// Only the given window.
    Window(WindowId),
    /// Every window the host knows about.
    All,
}

impl HostEvent {
    /// Returns the windows this event applies to.
    #[must_use]
    pub const fn target(self) -> EventTarget {
        match self {
            Self::WindowAdded(id)
            | Self::GeometryChanged(id)
            | Self::FrameGeometryChanged(id)
            | Self::ClientGeometryChanged(id)
            | Self::MoveResizeChanged(id)
            | Self::MoveResizeFinished(id)
            | Self::FullscreenChanged(id)
            | Self::MaximizedChanged(id)
            | Self::Unminimized(id)
            | Self::ScreenChanged(id)
            | Self::DesktopChanged(id) => EventTarget::Window(id),
            Self::CurrentDesktopChanged
            | Self::DesktopPresenceChanged
            | Self::DesktopCountChanged
            | Self::ScreenCountChanged
            | Self::ScreenResized
            | Self::CurrentActivityChanged
            | Self::ActivitiesChanged
            | Self::VirtualScreenSizeChanged
            | Self::VirtualScreenGeometryChanged => EventTarget::All,
        }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WindowAdded(_) => "window-added",
            Self::GeometryChanged(_) => "geometry-changed",
            Self::FrameGeometryChanged(_) => "frame-geometry-changed",
            Self::ClientGeometryChanged(_) => "client-geometry-changed",
            Self::MoveResizeChanged(_) => "move-resize-changed",
            Self::MoveResizeFinished(_) => "move-resize-finished",
            Self::FullscreenChanged(_) => "fullscreen-changed",
            Self::MaximizedChanged(_) => "maximized-changed",
            Self::Unminimized(_) => "unminimized",
            Self::ScreenChanged(_) => "screen-changed",
            Self::DesktopChanged(_) => "desktop-changed",
            Self::CurrentDesktopChanged => "current-desktop-changed",
            Self::DesktopPresenceChanged => "desktop-presence-changed",
            Self::DesktopCountChanged => "desktop-count-changed",
            Self::ScreenCountChanged => "screen-count-changed",
            Self::ScreenResized => "screen-resized",
            Self::CurrentActivityChanged => "current-activity-changed",
            Self::ActivitiesChanged => "activities-changed",
            Self::VirtualScreenSizeChanged => "virtual-screen-size-changed",
            Self::VirtualScreenGeometryChanged => "virtual-screen-geometry-changed",
        }
    }
}

impl std::fmt::Display for HostEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target() {
            EventTarget::Window(id) => write!(f, "{} ({id})", self.name()),
            EventTarget::All => f.write_str(self.name()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_events_target_their_window() {
        let events = [
            HostEvent::WindowAdded(7),
            HostEvent::GeometryChanged(7),
            HostEvent::FrameGeometryChanged(7),
            HostEvent::ClientGeometryChanged(7),
            HostEvent::MoveResizeChanged(7),
            HostEvent::MoveResizeFinished(7),
            HostEvent::FullscreenChanged(7),
            HostEvent::MaximizedChanged(7),
            HostEvent::Unminimized(7),
            HostEvent::ScreenChanged(7),
            HostEvent::DesktopChanged(7),
        ];
        for event in events {
            assert_eq!(event.target(), EventTarget::Window(7), "{event}");
        }
    }

    #[test]
    fn test_global_events_target_all() {
        let events = [
            HostEvent::CurrentDesktopChanged,
            HostEvent::DesktopPresenceChanged,
            HostEvent::DesktopCountChanged,
            HostEvent::ScreenCountChanged,
            HostEvent::ScreenResized,
            HostEvent::CurrentActivityChanged,
            HostEvent::ActivitiesChanged,
            HostEvent::VirtualScreenSizeChanged,
            HostEvent::VirtualScreenGeometryChanged,
        ];
        for event in events {
            assert_eq!(event.target(), EventTarget::All, "{event}");
        }
    }

    #[test]
    fn test_event_display() {
        assert_eq!(HostEvent::MoveResizeFinished(42).to_string(), "move-resize-finished (42)");
        assert_eq!(HostEvent::ScreenResized.to_string(), "screen-resized");
    }
}
