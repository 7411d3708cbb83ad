//! Grid CLI command.

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config;
use crate::error::TilegapsError;
use crate::modules::gaps::layout::{EdgeAnchors, Grid};
use crate::modules::gaps::{Gaps, Offsets, Rect, available_region, build_grid};

/// Arguments for `tilegaps grid`.
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Left edge of the work area.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub x: i32,

    /// Top edge of the work area.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub y: i32,

    /// Width of the work area.
    #[arg(long)]
    pub width: i32,

    /// Height of the work area.
    #[arg(long)]
    pub height: i32,

    /// Output as JSON.
    #[arg(long, short)]
    pub json: bool,
}

/// Grid together with the region and gaps it was built from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GridReport {
    work_area: Rect,
    region: Rect,
    grid: Grid,
}

#[derive(Tabled)]
struct AnchorRow {
    #[tabled(rename = "Edge")]
    edge: &'static str,
    #[tabled(rename = "Anchor")]
    anchor: String,
    #[tabled(rename = "Closed")]
    closed: i32,
    #[tabled(rename = "Gapped")]
    gapped: i32,
}

/// Execute the grid command.
///
/// # Errors
///
/// Returns `TilegapsError::InvalidArguments` for a work area without area.
pub fn execute(args: &GridArgs) -> Result<(), TilegapsError> {
    if args.width <= 0 || args.height <= 0 {
        return Err(TilegapsError::InvalidArguments(format!(
            "work area must have a positive size, got {}x{}",
            args.width, args.height
        )));
    }

    let config = config::init().snapshot();
    let work_area = Rect::new(args.x, args.y, args.width, args.height);
    let region = available_region(&work_area, &Offsets::from_config(&config.offsets));
    let grid = build_grid(&region, &Gaps::from_config(&config.gaps));

    if args.json {
        let report = GridReport { work_area, region, grid };
        output::print_highlighted_json(&serde_json::to_value(&report)?);
        return Ok(());
    }

    let table = Table::new(rows(&grid))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..4)).with(Alignment::right()))
        .to_string();

    println!("{}", format!("Grid for {region}").bold());
    println!("{table}");
    Ok(())
}

fn rows(grid: &Grid) -> Vec<AnchorRow> {
    let edges: [(&'static str, &EdgeAnchors); 4] = [
        ("left", &grid.left),
        ("right", &grid.right),
        ("top", &grid.top),
        ("bottom", &grid.bottom),
    ];

    edges
        .into_iter()
        .flat_map(|(edge, anchors)| {
            anchors.iter().map(move |named| AnchorRow {
                edge,
                anchor: named.name.to_string(),
                closed: named.anchor.closed,
                gapped: named.anchor.gapped,
            })
        })
        .collect()
}
