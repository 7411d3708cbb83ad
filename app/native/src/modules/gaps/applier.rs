//! Gap passes.
//!
//! A pass takes one window, snaps it to the grid of its work area, then evens
//! out the space between it and every eligible neighbor. Frames are written
//! back through the [`WindowHost`] once the pass has computed them.
//!
//! # Reentrancy
//!
//! Writing a frame usually makes the host report a geometry change, and hosts
//! may deliver that report synchronously from inside `set_frame`. Such nested
//! requests would snap against half-written state, so while a pass is running
//! every further request is dropped and reported as
//! [`SkipReason::PassInProgress`].

use std::cell::Cell;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ConfigHandle;
use crate::modules::gaps::events::{EventTarget, HostEvent};
use crate::modules::gaps::host::WindowHost;
use crate::modules::gaps::layout::{build_grid, snap_to_grid, snap_to_neighbors};
use crate::modules::gaps::rules::{IgnoreReason, ignore_peer, ignore_window};
use crate::modules::gaps::state::{Gaps, Offsets, Rect, Window, WindowId, available_region};

// ============================================================================
// Pass Latch
// ============================================================================

/// Allows at most one pass at a time.
#[derive(Debug, Default)]
pub struct PassLatch {
    held: Cell<bool>,
}

impl PassLatch {
    /// Creates an open latch.
    #[must_use]
    pub const fn new() -> Self { Self { held: Cell::new(false) } }

    /// Takes the latch, or returns `None` if a pass already holds it.
    ///
    /// The latch is released when the returned guard is dropped.
    #[must_use]
    pub fn try_acquire(&self) -> Option<PassGuard<'_>> {
        if self.held.replace(true) {
            return None;
        }
        Some(PassGuard { latch: self })
    }

    /// Returns true while a guard is alive.
    #[must_use]
    pub fn is_held(&self) -> bool { self.held.get() }
}

/// Proof that the current pass holds the latch.
#[derive(Debug)]
pub struct PassGuard<'a> {
    latch: &'a PassLatch,
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) { self.latch.held.set(false); }
}

// ============================================================================
// Pass Outcome
// ============================================================================

/// Why a pass did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "kebab-case")]
pub enum SkipReason {
    /// Another pass is running.
    PassInProgress,
    /// The window no longer exists.
    WindowGone,
    /// The host has no work area for the window.
    NoWorkArea,
    /// The frame or work area lies beyond the coordinate limit.
    OutOfRange,
    /// The offsets leave no room inside the work area.
    EmptyRegion,
    /// The window is not eligible for gapping.
    Ignored(IgnoreReason),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PassInProgress => f.write_str("pass in progress"),
            Self::WindowGone => f.write_str("window gone"),
            Self::NoWorkArea => f.write_str("no work area"),
            Self::OutOfRange => f.write_str("out of range"),
            Self::EmptyRegion => f.write_str("empty region"),
            Self::Ignored(reason) => write!(f, "ignored ({reason})"),
        }
    }
}

/// What a completed pass did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// The window the pass ran for.
    pub window: WindowId,
    /// Its frame before the pass.
    pub before: Rect,
    /// Its frame after the pass.
    pub after: Rect,
    /// Neighbors whose frames changed, with their new frames.
    pub neighbors: Vec<(WindowId, Rect)>,
}

impl PassReport {
    /// Returns true if the pass wrote any frame.
    #[must_use]
    pub fn changed(&self) -> bool { self.before != self.after || !self.neighbors.is_empty() }
}

/// Result of asking for a pass over one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassOutcome {
    /// The pass ran.
    Applied(PassReport),
    /// The pass was skipped.
    Skipped(SkipReason),
}

impl PassOutcome {
    /// Returns the report if the pass ran.
    #[must_use]
    pub const fn report(&self) -> Option<&PassReport> {
        match self {
            Self::Applied(report) => Some(report),
            Self::Skipped(_) => None,
        }
    }

    /// Returns the skip reason if the pass did not run.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Applied(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }
}

// ============================================================================
// Gap Applier
// ============================================================================

/// Runs gap passes against a host.
///
/// The applier does not own the host; it is handed one per call. That lets a
/// host hold a reference to the applier and forward its own events to it.
#[derive(Debug, Default)]
pub struct GapApplier {
    config: ConfigHandle,
    latch: PassLatch,
}

impl GapApplier {
    /// Creates an applier reading its settings from `config`.
    #[must_use]
    pub const fn new(config: ConfigHandle) -> Self {
        Self { config, latch: PassLatch::new() }
    }

    /// Returns the shared configuration.
    #[must_use]
    pub const fn config(&self) -> &ConfigHandle { &self.config }

    /// Returns true while a pass is running.
    #[must_use]
    pub fn is_busy(&self) -> bool { self.latch.is_held() }

    /// Runs one pass for the window `id`.
    ///
    /// The configuration is read once, at the start of the pass.
    pub fn apply<H: WindowHost + ?Sized>(&self, host: &H, id: WindowId) -> PassOutcome {
        let Some(_guard) = self.latch.try_acquire() else {
            trace!(window = id, "pass in progress, dropping request");
            return PassOutcome::Skipped(SkipReason::PassInProgress);
        };

        match self.run_pass(host, id) {
            Ok(report) => PassOutcome::Applied(report),
            Err(reason) => {
                trace!(window = id, %reason, "pass skipped");
                PassOutcome::Skipped(reason)
            }
        }
    }

    /// Runs one pass for every window the host lists, in order.
    pub fn apply_all<H: WindowHost + ?Sized>(&self, host: &H) -> Vec<(WindowId, PassOutcome)> {
        host.windows().into_iter().map(|id| (id, self.apply(host, id))).collect()
    }

    /// Runs the passes an event asks for.
    ///
    /// Per-window events re-gap that window; global events re-gap every
    /// window. A new dock changes the work area of its screen, so adding one
    /// re-gaps every window as well.
    pub fn handle_event<H: WindowHost + ?Sized>(
        &self,
        host: &H,
        event: HostEvent,
    ) -> Vec<(WindowId, PassOutcome)> {
        debug!(%event, "host event");

        match event.target() {
            EventTarget::Window(id) => {
                let mut outcomes = vec![(id, self.apply(host, id))];
                if matches!(event, HostEvent::WindowAdded(_))
                    && host.window(id).is_some_and(|window| window.is_dock)
                {
                    debug!(window = id, "dock added, re-gapping all windows");
                    outcomes.extend(self.apply_all(host));
                }
                outcomes
            }
            EventTarget::All => self.apply_all(host),
        }
    }

    fn run_pass<H: WindowHost + ?Sized>(&self, host: &H, id: WindowId) -> Result<PassReport, SkipReason> {
        let window = host.window(id).ok_or(SkipReason::WindowGone)?;
        let work_area = host.work_area(id).ok_or(SkipReason::NoWorkArea)?;
        let config = self.config.snapshot();

        if let Some(reason) = classify(host, &window, Some(&work_area), config.include_maximized) {
            return Err(SkipReason::Ignored(reason));
        }

        if !window.frame.is_within_bounds() || !work_area.is_within_bounds() {
            return Err(SkipReason::OutOfRange);
        }

        let gaps = Gaps::from_config(&config.gaps);
        let region = available_region(&work_area, &Offsets::from_config(&config.offsets));
        if !region.is_valid() {
            return Err(SkipReason::EmptyRegion);
        }
        let grid = build_grid(&region, &gaps);

        debug!(window = id, class = %window.class, frame = %window.frame, %region, "gap pass");

        let snapped = snap_to_grid(window.frame, &grid, &gaps);

        let neighbors: Vec<(WindowId, Rect)> = host
            .windows()
            .into_iter()
            .filter_map(|peer_id| host.window(peer_id))
            .filter(|peer| peer.frame.is_within_bounds())
            .filter(|peer| {
                let reason =
                    classify(host, peer, host.work_area(peer.id).as_ref(), config.include_maximized);
                !ignore_peer(&window, peer, reason)
            })
            .map(|peer| (peer.id, peer.frame))
            .collect();

        let result = snap_to_neighbors(snapped, &neighbors, gaps.mid);

        if result.frame != window.frame {
            debug!(window = id, from = %window.frame, to = %result.frame, "set frame");
            host.set_frame(id, result.frame);
        }
        for &(peer_id, frame) in &result.adjusted {
            debug!(window = peer_id, to = %frame, "set neighbor frame");
            host.set_frame(peer_id, frame);
        }

        Ok(PassReport {
            window: id,
            before: window.frame,
            after: result.frame,
            neighbors: result.adjusted,
        })
    }
}

/// Applies the window rules plus the host's own exclusions.
fn classify<H: WindowHost + ?Sized>(
    host: &H,
    window: &Window,
    work_area: Option<&Rect>,
    include_maximized: bool,
) -> Option<IgnoreReason> {
    ignore_window(window, work_area, include_maximized)
        .or_else(|| host.is_excluded(window).then_some(IgnoreReason::Excluded))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::TilegapsConfig;
    use crate::modules::gaps::snapshot::{LayoutSnapshot, ScreenSnapshot, SnapshotHost};

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    fn snapshot(windows: Vec<Window>) -> SnapshotHost {
        SnapshotHost::new(LayoutSnapshot {
            screens: vec![ScreenSnapshot { id: 0, work_area: SCREEN }],
            windows,
        })
    }

    fn applier() -> GapApplier { GapApplier::new(ConfigHandle::default()) }

    /// A host that reports every write straight back to the applier, the way
    /// window systems emit a geometry-changed signal from inside a move.
    struct EchoHost<'a> {
        inner: SnapshotHost,
        applier: &'a GapApplier,
        echoes: RefCell<Vec<PassOutcome>>,
    }

    impl WindowHost for EchoHost<'_> {
        fn windows(&self) -> Vec<WindowId> { self.inner.windows() }

        fn window(&self, id: WindowId) -> Option<Window> { self.inner.window(id) }

        fn work_area(&self, id: WindowId) -> Option<Rect> { self.inner.work_area(id) }

        fn set_frame(&self, id: WindowId, frame: Rect) {
            self.inner.set_frame(id, frame);
            let echo = self.applier.apply(self, id);
            self.echoes.borrow_mut().push(echo);
        }
    }

    /// A host that excludes windows by class.
    struct ExcludingHost {
        inner: SnapshotHost,
        class: &'static str,
    }

    impl WindowHost for ExcludingHost {
        fn windows(&self) -> Vec<WindowId> { self.inner.windows() }

        fn window(&self, id: WindowId) -> Option<Window> { self.inner.window(id) }

        fn work_area(&self, id: WindowId) -> Option<Rect> { self.inner.work_area(id) }

        fn set_frame(&self, id: WindowId, frame: Rect) { self.inner.set_frame(id, frame); }

        fn is_excluded(&self, window: &Window) -> bool { window.class == self.class }
    }

    #[test]
    fn test_latch_is_released_on_drop() {
        let latch = PassLatch::new();
        {
            let _guard = latch.try_acquire().unwrap();
            assert!(latch.is_held());
            assert!(latch.try_acquire().is_none());
        }
        assert!(!latch.is_held());
        assert!(latch.try_acquire().is_some());
    }

    #[test]
    fn test_apply_snaps_window_to_grid() {
        let host = snapshot(vec![Window::new(1, Rect::new(0, 0, 960, 1080))]);
        let outcome = applier().apply(&host, 1);

        let report = outcome.report().unwrap();
        assert_eq!(report.after, Rect::new(12, 12, 942, 1056));
        assert!(report.changed());
        assert_eq!(host.frame(1), Some(Rect::new(12, 12, 942, 1056)));
        assert_eq!(host.writes().len(), 1);
    }

    #[test]
    fn test_apply_settled_window_writes_nothing() {
        let host = snapshot(vec![Window::new(1, Rect::new(12, 12, 942, 1056))]);
        let outcome = applier().apply(&host, 1);

        assert!(!outcome.report().unwrap().changed());
        assert!(host.writes().is_empty());
    }

    #[test]
    fn test_apply_adjusts_neighbor() {
        let host = snapshot(vec![
            Window::new(1, Rect::new(0, 0, 951, 1080)),
            Window::new(2, Rect::new(960, 0, 960, 1080)),
        ]);
        let outcome = applier().apply(&host, 1);
        let report = outcome.report().unwrap();

        let this = host.frame(1).unwrap();
        let other = host.frame(2).unwrap();
        assert_eq!(report.neighbors, vec![(2, other)]);
        assert_eq!(other.left() - this.right(), 12);
        assert_eq!(this.left(), 12);
    }

    #[test]
    fn test_apply_missing_window() {
        let host = snapshot(vec![]);
        assert_eq!(applier().apply(&host, 9).skip_reason(), Some(SkipReason::WindowGone));
    }

    #[test]
    fn test_apply_without_work_area() {
        let mut window = Window::new(1, Rect::new(0, 0, 960, 1080));
        window.screen = 4;
        let host = snapshot(vec![window]);
        assert_eq!(applier().apply(&host, 1).skip_reason(), Some(SkipReason::NoWorkArea));
        assert!(host.writes().is_empty());
    }

    #[test]
    fn test_apply_out_of_range_window() {
        let host = snapshot(vec![Window::new(1, Rect::new(2_147_483_000, 0, 1000, 600))]);
        assert_eq!(applier().apply(&host, 1).skip_reason(), Some(SkipReason::OutOfRange));
        assert!(host.writes().is_empty());
    }

    #[test]
    fn test_out_of_range_neighbor_is_left_alone() {
        let host = snapshot(vec![
            Window::new(1, Rect::new(0, 0, 951, 1080)),
            Window::new(2, Rect::new(i32::MAX - 10, 0, 10, 1080)),
        ]);
        let report = applier().apply(&host, 1).report().cloned().unwrap();
        assert!(report.neighbors.is_empty());
        assert_eq!(host.frame(2), Some(Rect::new(i32::MAX - 10, 0, 10, 1080)));
    }

    #[test]
    fn test_offsets_larger_than_work_area_skip_pass() {
        let mut config = TilegapsConfig::default();
        config.offsets.left = 1500;
        config.offsets.right = 600;
        let applier = GapApplier::new(ConfigHandle::new(config));
        let host = snapshot(vec![Window::new(1, Rect::new(0, 0, 960, 1080))]);

        assert_eq!(applier.apply(&host, 1).skip_reason(), Some(SkipReason::EmptyRegion));
        assert!(host.writes().is_empty());
    }

    #[test]
    fn test_apply_ignored_window() {
        let mut window = Window::new(1, Rect::new(0, 0, 960, 1080));
        window.is_moving_or_resizing = true;
        let host = snapshot(vec![window]);
        assert_eq!(
            applier().apply(&host, 1).skip_reason(),
            Some(SkipReason::Ignored(IgnoreReason::MovingOrResizing))
        );
        assert!(host.writes().is_empty());
    }

    #[test]
    fn test_window_filling_screen_is_left_alone() {
        let host = snapshot(vec![Window::new(1, SCREEN)]);
        assert_eq!(
            applier().apply(&host, 1).skip_reason(),
            Some(SkipReason::Ignored(IgnoreReason::Maximized))
        );
    }

    #[test]
    fn test_include_maximized() {
        let config = TilegapsConfig {
            include_maximized: true,
            ..TilegapsConfig::default()
        };
        let applier = GapApplier::new(ConfigHandle::new(config));
        let host = snapshot(vec![Window::new(1, SCREEN)]);

        let outcome = applier.apply(&host, 1);
        assert_eq!(outcome.report().unwrap().after, Rect::new(12, 12, 1896, 1056));
    }

    #[test]
    fn test_host_exclusion() {
        let mut excluded = Window::new(1, Rect::new(0, 0, 960, 1080));
        excluded.class = "krunner".to_string();
        let host = ExcludingHost {
            inner: snapshot(vec![excluded, Window::new(2, Rect::new(960, 0, 960, 1080))]),
            class: "krunner",
        };
        let applier = applier();

        assert_eq!(
            applier.apply(&host, 1).skip_reason(),
            Some(SkipReason::Ignored(IgnoreReason::Excluded))
        );

        // An excluded window is not a neighbor either.
        let report = applier.apply(&host, 2).report().cloned().unwrap();
        assert!(report.neighbors.is_empty());
        assert_eq!(host.inner.frame(1), Some(Rect::new(0, 0, 960, 1080)));
    }

    #[test]
    fn test_offsets_shrink_region() {
        let mut config = TilegapsConfig::default();
        config.offsets.top = 40;
        let applier = GapApplier::new(ConfigHandle::new(config));
        let host = snapshot(vec![Window::new(1, Rect::new(0, 40, 960, 1040))]);

        let report = applier.apply(&host, 1).report().cloned().unwrap();
        assert_eq!(report.after.top(), 52);
    }

    #[test]
    fn test_neighbor_on_other_desktop_is_untouched() {
        let mut other = Window::new(2, Rect::new(960, 0, 960, 1080));
        other.desktop = 2;
        let host = snapshot(vec![Window::new(1, Rect::new(0, 0, 951, 1080)), other]);

        let report = applier().apply(&host, 1).report().cloned().unwrap();
        assert!(report.neighbors.is_empty());
        assert_eq!(host.frame(2), Some(Rect::new(960, 0, 960, 1080)));
    }

    #[test]
    fn test_neighbor_on_other_screen_is_untouched() {
        let mut other = Window::new(2, Rect::new(960, 0, 960, 1080));
        other.screen = 1;
        let host = SnapshotHost::new(LayoutSnapshot {
            screens: vec![
                ScreenSnapshot { id: 0, work_area: SCREEN },
                ScreenSnapshot { id: 1, work_area: SCREEN },
            ],
            windows: vec![Window::new(1, Rect::new(0, 0, 951, 1080)), other],
        });

        let report = applier().apply(&host, 1).report().cloned().unwrap();
        assert!(report.neighbors.is_empty());
    }

    #[test]
    fn test_minimized_neighbor_is_untouched() {
        let mut other = Window::new(2, Rect::new(960, 0, 960, 1080));
        other.is_minimized = true;
        let host = snapshot(vec![Window::new(1, Rect::new(0, 0, 951, 1080)), other]);

        assert!(applier().apply(&host, 1).report().unwrap().neighbors.is_empty());
    }

    #[test]
    fn test_reentrant_requests_are_dropped() {
        let applier = applier();
        let host = EchoHost {
            inner: snapshot(vec![
                Window::new(1, Rect::new(0, 0, 951, 1080)),
                Window::new(2, Rect::new(960, 0, 960, 1080)),
            ]),
            applier: &applier,
            echoes: RefCell::new(Vec::new()),
        };

        let outcome = applier.apply(&host, 1);
        assert!(outcome.report().is_some());

        // Both writes echoed back and both echoes were dropped.
        let echoes = host.echoes.borrow();
        assert_eq!(echoes.len(), 2);
        for echo in echoes.iter() {
            assert_eq!(echo.skip_reason(), Some(SkipReason::PassInProgress));
        }
        drop(echoes);

        assert!(!applier.is_busy());
        // The latch is free again, so a fresh request runs.
        assert!(applier.apply(&host, 2).report().is_some());
    }

    #[test]
    fn test_latch_released_after_skip() {
        let applier = applier();
        let host = snapshot(vec![]);
        let _ = applier.apply(&host, 1);
        assert!(!applier.is_busy());
    }

    #[test]
    fn test_config_change_applies_to_next_pass() {
        let applier = applier();
        let host = snapshot(vec![Window::new(1, Rect::new(0, 0, 960, 1080))]);

        let mut config = TilegapsConfig::default();
        config.gaps = crate::config::GapsConfig {
            top: 20,
            left: 20,
            right: 20,
            bottom: 20,
            mid: 20,
        };
        applier.config().replace(config);

        let report = applier.apply(&host, 1).report().cloned().unwrap();
        assert_eq!(report.after.left(), 20);
        assert_eq!(report.after.top(), 20);
    }

    #[test]
    fn test_handle_window_event() {
        let host = snapshot(vec![
            Window::new(1, Rect::new(0, 0, 960, 1080)),
            Window::new(2, Rect::new(966, 12, 942, 1056)),
        ]);
        let outcomes = applier().handle_event(&host, HostEvent::MoveResizeFinished(1));
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0, 1);
    }

    #[test]
    fn test_handle_global_event_runs_every_window() {
        let host = snapshot(vec![
            Window::new(1, Rect::new(0, 0, 960, 1080)),
            Window::new(2, Rect::new(960, 0, 960, 1080)),
        ]);
        let outcomes = applier().handle_event(&host, HostEvent::ScreenResized);
        let ids: Vec<_> = outcomes.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_dock_added_runs_every_window() {
        let mut dock = Window::new(3, Rect::new(0, 1040, 1920, 40));
        dock.is_normal = false;
        dock.is_dock = true;
        let host = snapshot(vec![Window::new(1, Rect::new(0, 0, 960, 1080)), dock]);

        let outcomes = applier().handle_event(&host, HostEvent::WindowAdded(3));
        let ids: Vec<_> = outcomes.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![3, 1, 3]);
        assert_eq!(
            outcomes[0].1.skip_reason(),
            Some(SkipReason::Ignored(IgnoreReason::NotNormal))
        );
        assert!(outcomes[1].1.report().is_some());
    }

    #[test]
    fn test_plain_window_added_runs_only_that_window() {
        let host = snapshot(vec![
            Window::new(1, Rect::new(0, 0, 960, 1080)),
            Window::new(2, Rect::new(960, 0, 960, 1080)),
        ]);
        let outcomes = applier().handle_event(&host, HostEvent::WindowAdded(2));
        assert_eq!(outcomes.len(), 1);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::PassInProgress.to_string(), "pass in progress");
        assert_eq!(SkipReason::EmptyRegion.to_string(), "empty region");
        assert_eq!(
            SkipReason::Ignored(IgnoreReason::Fullscreen).to_string(),
            "ignored (fullscreen)"
        );
    }
}
