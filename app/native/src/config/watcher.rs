//! Configuration file watcher for hot-reloading.
//!
//! Watches the configuration file and swaps the shared configuration when it
//! changes, so the next gap pass picks up the new values.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use super::{ConfigHandle, TilegapsConfig, load_config_from_path};

/// Debounce duration for config file changes.
/// Some editors trigger multiple events per save (write to temp, rename, etc.).
const CONFIG_DEBOUNCE_MS: u64 = 200;

/// Re-reads the configuration file into `handle`.
///
/// A file that fails to load leaves the current configuration in place.
///
/// # Returns
///
/// The new configuration, or `None` if loading failed.
pub fn reload_config(path: &Path, handle: &ConfigHandle) -> Option<TilegapsConfig> {
    match load_config_from_path(path) {
        Ok((config, _)) => {
            handle.replace(config.clone());
            tracing::info!(path = %path.display(), "configuration reloaded");
            Some(config)
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                path = %path.display(),
                "failed to reload configuration, keeping previous values"
            );
            None
        }
    }
}

/// Starts watching the configuration file for changes.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by writing a temporary file and renaming it are still seen.
/// Bursts of events are collapsed: the file is re-read once no further event
/// has arrived for the debounce duration.
///
/// # Arguments
///
/// * `path` - The configuration file to watch
/// * `handle` - Shared configuration to update
/// * `on_reload` - Called with the new configuration after every successful reload
///
/// # Returns
///
/// The watcher thread. It runs for the rest of the process.
///
/// # Errors
///
/// Returns an error if the watcher cannot be created or the parent directory
/// cannot be watched. No thread is started in that case.
pub fn watch_config_file<F>(
    path: PathBuf,
    handle: ConfigHandle,
    on_reload: F,
) -> notify::Result<JoinHandle<()>>
where
    F: Fn(&TilegapsConfig) + Send + 'static,
{
    let (tx, rx) = std::sync::mpsc::channel();

    let mut watcher: RecommendedWatcher = notify::recommended_watcher(tx)?;
    let watch_path = path.parent().unwrap_or(&path);
    watcher.watch(watch_path, RecursiveMode::NonRecursive)?;

    tracing::debug!(path = %path.display(), "watching configuration file");

    Ok(std::thread::spawn(move || {
        // The watcher stops delivering events once dropped.
        let _watcher = watcher;

        while wait_for_change(&rx, &path) {
            if let Some(config) = reload_config(&path, &handle) {
                on_reload(&config);
            }
        }
    }))
}

/// Blocks until the file at `path` changes and the events have settled.
///
/// Returns false once the watcher is gone.
fn wait_for_change(rx: &Receiver<notify::Result<Event>>, path: &Path) -> bool {
    let debounce = Duration::from_millis(CONFIG_DEBOUNCE_MS);

    loop {
        match rx.recv() {
            Ok(Ok(event)) if affects(&event, path) => break,
            Ok(Ok(_)) => {}
            Ok(Err(err)) => tracing::warn!(error = %err, "config watch error"),
            Err(_) => return false,
        }
    }

    loop {
        match rx.recv_timeout(debounce) {
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => return true,
            Err(RecvTimeoutError::Disconnected) => return false,
        }
    }
}

/// Returns true if `event` touches a file with the same name as `path`.
fn affects(event: &Event, path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    event.paths.iter().any(|p| p.file_name() == Some(name))
}
