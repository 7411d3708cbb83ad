#![allow(clippy::multiple_crate_versions)]

//! tilegaps - snaps windows onto a gapped grid.
//!
//! Runs the command-line interface; see `tilegaps --help`.

fn main() {
    if let Err(err) = tilegaps_lib::cli::run() {
        eprintln!("tilegaps: {err}");
        std::process::exit(1);
    }
}
