//! Integration tests for the gap engine.
//!
//! These tests drive `GapApplier` through the public API only, against
//! in-memory hosts built from layout snapshots.
//!
//! ## Running these tests
//! ```bash
//! cargo test -p tilegaps --test gaps_integration
//! ```

use tilegaps_lib::config::{ConfigHandle, load_config_from_path, reload_config};
use tilegaps_lib::gaps::{
    GapApplier, HostEvent, IgnoreReason, LayoutSnapshot, Rect, ScreenSnapshot, SkipReason,
    SnapshotHost, Window, WindowHost, WindowId,
};

// ============================================================================
// Helpers
// ============================================================================

const FULL_HD: Rect = Rect::new(0, 0, 1920, 1080);

fn single_screen(windows: Vec<Window>) -> SnapshotHost {
    SnapshotHost::new(LayoutSnapshot {
        screens: vec![ScreenSnapshot { id: 0, work_area: FULL_HD }],
        windows,
    })
}

fn applier() -> GapApplier { GapApplier::new(ConfigHandle::default()) }

/// A host that leaves windows of one class alone.
struct ClassFilterHost {
    inner: SnapshotHost,
    excluded: &'static str,
}

impl WindowHost for ClassFilterHost {
    fn windows(&self) -> Vec<WindowId> { self.inner.windows() }

    fn window(&self, id: WindowId) -> Option<Window> { self.inner.window(id) }

    fn work_area(&self, id: WindowId) -> Option<Rect> { self.inner.work_area(id) }

    fn set_frame(&self, id: WindowId, frame: Rect) { self.inner.set_frame(id, frame); }

    fn is_excluded(&self, window: &Window) -> bool { window.class == self.excluded }
}

// ============================================================================
// Layout Tests
// ============================================================================

/// Two roughly half-screen windows end up gapped from the screen and from
/// each other.
#[test]
fn test_two_tiles_get_outer_and_mid_gaps() {
    let host = single_screen(vec![
        Window::new(1, Rect::new(0, 0, 951, 1080)),
        Window::new(2, Rect::new(960, 0, 960, 1080)),
    ]);

    let outcomes = applier().apply_all(&host);
    assert!(outcomes.iter().all(|(_, outcome)| outcome.report().is_some()));

    let left = host.frame(1).unwrap();
    let right = host.frame(2).unwrap();

    assert_eq!(left, Rect::new(12, 12, 942, 1056));
    assert_eq!(right, Rect::new(965, 12, 943, 1056));
    assert_eq!(right.left() - left.right(), 12);
    assert_eq!(right.right(), 1907);
}

/// A settled window produces no writes on the next pass.
#[test]
fn test_settled_layout_is_left_alone() {
    let host = single_screen(vec![Window::new(1, Rect::new(0, 0, 960, 1080))]);
    let applier = applier();

    applier.apply_all(&host);
    let writes_after_first = host.writes().len();
    assert_eq!(writes_after_first, 1);

    let outcomes = applier.apply_all(&host);
    assert!(!outcomes[0].1.report().unwrap().changed());
    assert_eq!(host.writes().len(), writes_after_first);
}

/// Windows touching across a screen boundary are not neighbors.
#[test]
fn test_screens_are_independent() {
    let mut second = Window::new(2, Rect::new(1920, 0, 960, 1080));
    second.screen = 1;
    let host = SnapshotHost::new(LayoutSnapshot {
        screens: vec![
            ScreenSnapshot { id: 0, work_area: FULL_HD },
            ScreenSnapshot {
                id: 1,
                work_area: Rect::new(1920, 0, 1920, 1080),
            },
        ],
        windows: vec![Window::new(1, Rect::new(960, 0, 960, 1080)), second],
    });

    let outcomes = applier().apply_all(&host);
    for (_, outcome) in &outcomes {
        assert!(outcome.report().unwrap().neighbors.is_empty());
    }

    assert_eq!(host.frame(1), Some(Rect::new(966, 12, 942, 1056)));
    assert_eq!(host.frame(2), Some(Rect::new(1932, 12, 942, 1056)));
}

/// Ineligible windows are skipped and never moved as neighbors.
#[test]
fn test_snapshot_with_ineligible_windows() {
    let json = r#"{
        // a laptop screen with a panel at the bottom
        "screens": [{ "id": 0, "workArea": { "x": 0, "y": 0, "width": 1920, "height": 1080 } }],
        "windows": [
            { "id": 1, "class": "term", "frame": { "x": 0, "y": 0, "width": 951, "height": 1080 } },
            { "id": 2, "class": "video", "isFullscreen": true,
              "frame": { "x": 960, "y": 0, "width": 960, "height": 1080 } },
            { "id": 3, "class": "panel", "isNormal": false, "isDock": true,
              "frame": { "x": 0, "y": 1040, "width": 1920, "height": 40 } }
        ]
    }"#;
    let snapshot = LayoutSnapshot::from_reader(json.as_bytes()).unwrap();
    let host = SnapshotHost::new(snapshot);

    let outcomes = applier().apply_all(&host);

    assert_eq!(outcomes[0].1.report().unwrap().after, Rect::new(12, 12, 942, 1056));
    assert!(outcomes[0].1.report().unwrap().neighbors.is_empty());
    assert_eq!(
        outcomes[1].1.skip_reason(),
        Some(SkipReason::Ignored(IgnoreReason::Fullscreen))
    );
    assert_eq!(
        outcomes[2].1.skip_reason(),
        Some(SkipReason::Ignored(IgnoreReason::NotNormal))
    );
    assert_eq!(host.frame(2), Some(Rect::new(960, 0, 960, 1080)));
    assert_eq!(host.frame(3), Some(Rect::new(0, 1040, 1920, 40)));
}

/// Windows the host excludes are neither gapped nor moved.
#[test]
fn test_host_exclusion() {
    let mut launcher = Window::new(1, Rect::new(0, 0, 951, 1080));
    launcher.class = "launcher".to_string();
    let host = ClassFilterHost {
        inner: single_screen(vec![launcher, Window::new(2, Rect::new(960, 0, 960, 1080))]),
        excluded: "launcher",
    };

    let outcomes = applier().handle_event(&host, HostEvent::CurrentDesktopChanged);

    assert_eq!(
        outcomes[0].1.skip_reason(),
        Some(SkipReason::Ignored(IgnoreReason::Excluded))
    );
    assert_eq!(host.inner.frame(1), Some(Rect::new(0, 0, 951, 1080)));
    assert_eq!(host.inner.frame(2), Some(Rect::new(966, 12, 942, 1056)));
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// A reloaded configuration takes effect on the next pass.
#[test]
fn test_config_reload_changes_next_pass() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.jsonc");
    std::fs::write(
        &path,
        r#"{
            // wide gaps
            "gaps": { "top": 20, "left": 20, "right": 20, "bottom": 20, "mid": 20 }
        }"#,
    )
    .unwrap();

    let (config, _) = load_config_from_path(&path).unwrap();
    let handle = ConfigHandle::new(config);
    let applier = GapApplier::new(handle.clone());
    let host = single_screen(vec![Window::new(1, Rect::new(0, 0, 960, 1080))]);

    applier.apply(&host, 1);
    assert_eq!(host.frame(1), Some(Rect::new(20, 20, 930, 1040)));

    std::fs::write(&path, "{}").unwrap();
    let reloaded = reload_config(&path, &handle).unwrap();
    assert_eq!(reloaded.gaps.mid, 12);

    applier.apply(&host, 1);
    assert_eq!(host.frame(1), Some(Rect::new(12, 12, 942, 1056)));
}

/// A broken file on reload keeps the previous configuration.
#[test]
fn test_broken_reload_keeps_previous_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.jsonc");
    std::fs::write(&path, r#"{ "gaps": { "mid": 30 } }"#).unwrap();

    let (config, _) = load_config_from_path(&path).unwrap();
    let handle = ConfigHandle::new(config);

    std::fs::write(&path, "{ not json").unwrap();
    assert!(reload_config(&path, &handle).is_none());
    assert_eq!(handle.snapshot().gaps.mid, 30);
}
