//! Snap and watch CLI commands.
//!
//! Both commands run gap passes over a layout snapshot read from a file or
//! stdin. `watch` repeats the run every time the configuration file changes.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Args;
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::{self, ConfigHandle, config_paths};
use crate::error::TilegapsError;
use crate::modules::gaps::{GapApplier, LayoutSnapshot, PassOutcome, Rect, SnapshotHost, WindowId};

/// Arguments for `tilegaps snap`.
#[derive(Args, Debug)]
pub struct SnapArgs {
    /// Layout snapshot to read, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Only run the pass for this window.
    #[arg(long, short, value_name = "ID")]
    pub window: Option<WindowId>,

    /// Output the resulting snapshot as JSON.
    #[arg(long, short)]
    pub json: bool,
}

/// Arguments for `tilegaps watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Layout snapshot to read, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output the resulting snapshot as JSON.
    #[arg(long, short)]
    pub json: bool,
}

/// A snapshot before and after a run, with the outcome of every pass.
#[derive(Debug, Clone)]
pub struct SnapRun {
    pub before: LayoutSnapshot,
    pub after: LayoutSnapshot,
    pub outcomes: Vec<(WindowId, PassOutcome)>,
}

/// Runs gap passes over a snapshot.
///
/// # Arguments
///
/// * `snapshot` - The layout to work on
/// * `config` - Configuration the passes read
/// * `window` - A single window to run the pass for, or `None` for every window
#[must_use]
pub fn run_snapshot(snapshot: LayoutSnapshot, config: &ConfigHandle, window: Option<WindowId>) -> SnapRun {
    let before = snapshot.clone();
    let applier = GapApplier::new(config.clone());
    let host = SnapshotHost::new(snapshot);

    let outcomes = match window {
        Some(id) => vec![(id, applier.apply(&host, id))],
        None => applier.apply_all(&host),
    };

    SnapRun {
        before,
        after: host.into_snapshot(),
        outcomes,
    }
}

/// Execute the snap command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or parsed.
pub fn execute(args: &SnapArgs) -> Result<(), TilegapsError> {
    let snapshot = read_snapshot(&args.input)?;
    let handle = config::init();

    if let Some(id) = args.window
        && !snapshot.windows.iter().any(|w| w.id == id)
    {
        return Err(TilegapsError::InvalidArguments(format!("no window with id {id} in snapshot")));
    }

    print_run(&run_snapshot(snapshot, &handle, args.window), args.json)
}

/// Execute the watch command.
///
/// Runs once, then again after every successful configuration reload. Only
/// returns if the watcher stops.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read, there is no
/// configuration file location to watch, or the watcher cannot be started.
pub fn execute_watch(args: &WatchArgs) -> Result<(), TilegapsError> {
    let snapshot = read_snapshot(&args.input)?;
    let handle = config::init();

    let path = config::get_config_path()
        .cloned()
        .or_else(|| config_paths().into_iter().next())
        .ok_or_else(|| {
            TilegapsError::ConfigError("no configuration file location to watch".to_string())
        })?;

    if !path.parent().is_some_and(Path::is_dir) {
        return Err(TilegapsError::ConfigError(format!(
            "cannot watch {}: directory does not exist\nRun 'tilegaps config init' first.",
            path.display()
        )));
    }

    print_run(&run_snapshot(snapshot.clone(), &handle, None), args.json)?;

    let (tx, rx) = mpsc::channel();
    let _watcher = config::watch_config_file(path.clone(), handle.clone(), move |_| {
        let _ = tx.send(());
    })
    .map_err(|err| watch_error(&path, &err))?;

    eprintln!("{}", format!("Watching {} for changes", path.display()).dimmed());

    for () in rx {
        print_run(&run_snapshot(snapshot.clone(), &handle, None), args.json)?;
    }

    Ok(())
}

fn watch_error(path: &Path, err: &notify::Error) -> TilegapsError {
    TilegapsError::ConfigError(format!("failed to watch {}: {err}", path.display()))
}

/// Reads a snapshot from a file, or from stdin for `-`.
fn read_snapshot(input: &Path) -> Result<LayoutSnapshot, TilegapsError> {
    if input == Path::new("-") {
        return LayoutSnapshot::from_reader(io::stdin().lock());
    }

    let file = File::open(input).map_err(|err| {
        TilegapsError::IoError(format!("failed to open {}: {err}", input.display()))
    })?;
    LayoutSnapshot::from_reader(BufReader::new(file))
}

// ============================================================================
// Output
// ============================================================================

#[derive(Tabled)]
struct WindowRow {
    #[tabled(rename = "ID")]
    id: WindowId,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Before")]
    before: String,
    #[tabled(rename = "After")]
    after: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn print_run(run: &SnapRun, json: bool) -> Result<(), TilegapsError> {
    if json {
        output::print_highlighted_json(&serde_json::to_value(&run.after)?);
        return Ok(());
    }

    let rows = rows(run);
    let changed = run
        .before
        .windows
        .iter()
        .zip(&run.after.windows)
        .filter(|(before, after)| before.frame != after.frame)
        .count();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .to_string();

    println!("{}", format!("Windows ({changed} of {} changed)", run.after.windows.len()).bold());
    println!("{table}");
    Ok(())
}

fn rows(run: &SnapRun) -> Vec<WindowRow> {
    run.before
        .windows
        .iter()
        .zip(&run.after.windows)
        .map(|(before, after)| {
            let outcome = run.outcomes.iter().find(|(id, _)| *id == before.id).map(|(_, o)| o);
            WindowRow {
                id: before.id,
                class: before.class.clone(),
                before: output::format_rect(&before.frame),
                after: output::format_rect_change(&before.frame, &after.frame),
                status: status(&before.frame, &after.frame, outcome),
            }
        })
        .collect()
}

fn status(before: &Rect, after: &Rect, outcome: Option<&PassOutcome>) -> String {
    match outcome {
        Some(PassOutcome::Skipped(reason)) => reason.to_string(),
        _ if before != after => "gapped".to_string(),
        Some(PassOutcome::Applied(_)) => "unchanged".to_string(),
        None => "-".to_string(),
    }
}
