//! Log output for the `tilegaps` binary.
//!
//! Logs go to stderr so they never mix with command output on stdout.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "TILEGAPS_LOG";

/// Returns the filter to use when `TILEGAPS_LOG` is not set.
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "tilegaps_lib=debug,warn" } else { "warn" }
}

/// Installs the global `tracing` subscriber.
///
/// `TILEGAPS_LOG` takes precedence over `verbose`. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
