//! romdump - Map tool for Gen-I Pokémon ROMs
//!
//! Renders a map's tile graphics or its minimal walkability raster, finds
//! shortest routes between quadrants, and dumps compact text grids.
//!
//! ```bash
//! # Full tile render with debug overlays
//! romdump red.gb 40 -o map.png --debug
//!
//! # Minimal walkability map cropped around the player
//! romdump red.gb 40 --minimal --pos 4,6 --crop 9,9
//!
//! # Shortest route, printed as the emulator action string
//! romdump red.gb 40 --start 4,6 --end 10,2
//!
//! # Machine-readable report
//! romdump red.gb 40 --pos 4,6 --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rommap::pathfinding::prelude::*;
use rommap::render::{CropWindow, FullRenderOptions, render_full_map, render_text_grid,
    render_walkability_map};
use rommap::{MapBundle, RomImage};

/// Map tool for Gen-I Pokémon ROMs: render, pathfind, highlight, crop.
#[derive(Parser)]
#[command(name = "romdump", version)]
struct Cli {
    /// Path to the ROM file.
    rom: PathBuf,

    /// Map ID to decode.
    map_id: u8,

    /// Pathfinding start quadrant as `x,y` (defaults to --pos when --end is given).
    #[arg(short, long, value_parser = parse_coord)]
    start: Option<(i32, i32)>,

    /// Pathfinding end quadrant as `x,y`.
    #[arg(short, long, value_parser = parse_coord)]
    end: Option<(i32, i32)>,

    /// Output image file.
    #[arg(short, long, default_value = "map.png")]
    output: PathBuf,

    /// Overlay grid lines, coordinates and blocked-quadrant tint.
    #[arg(short, long)]
    debug: bool,

    /// Quadrant to mark with the position circle, as `x,y`.
    #[arg(long, value_parser = parse_coord)]
    pos: Option<(i32, i32)>,

    /// Crop window `width,height` in quadrants around --pos.
    #[arg(long, value_parser = parse_crop)]
    crop: Option<CropWindow>,

    /// Render the minimal walkability raster instead of tile graphics.
    #[arg(short, long)]
    minimal: bool,

    /// Print the text grid (W/B/O/P rows joined by `;`) instead of an image.
    #[arg(long)]
    text: bool,

    /// Print a JSON report (dimensions, text grid, path) instead of an image.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct MapReport {
    map_id: u8,
    tileset_id: u8,
    width_blocks: u32,
    height_blocks: u32,
    width_quadrants: i32,
    height_quadrants: i32,
    grid: String,
    actions: Option<String>,
    path: Option<Vec<(i32, i32)>>,
}

fn parse_coord(s: &str) -> Result<(i32, i32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in `{s}`"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in `{s}`"))?;
    Ok((x, y))
}

fn parse_crop(s: &str) -> Result<CropWindow, String> {
    let (width, height) = parse_coord(s)?;
    if width < 0 || height < 0 {
        return Err(format!("crop dimensions must be non-negative, got `{s}`"));
    }
    Ok(CropWindow { width, height })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let rom = RomImage::from_file(&cli.rom)
        .with_context(|| format!("reading ROM {}", cli.rom.display()))?;
    let bundle = MapBundle::load(&rom, cli.map_id)
        .with_context(|| format!("loading map {}", cli.map_id))?;
    info!(
        map_id = cli.map_id,
        tileset = bundle.map.tileset_id,
        width = bundle.map.width,
        height = bundle.map.height,
        quad_width = bundle.grid.width(),
        quad_height = bundle.grid.height(),
        "map loaded"
    );

    // --end without --start falls back to --pos, matching touch navigation
    // where the route starts at the player.
    let start = cli.start.or(if cli.end.is_some() { cli.pos } else { None });
    let path = match (start, cli.end) {
        (Some(start), Some(end)) => {
            let found = bfs_find_path(&bundle.grid, start, end);
            match &found {
                Some(path) => println!("{}", path.action_string()),
                None => info!(?start, ?end, "path not found"),
            }
            found
        }
        (None, None) => None,
        _ => {
            warn!("pathfinding needs both --start (or --pos) and --end");
            None
        }
    };

    if cli.json {
        let report = MapReport {
            map_id: cli.map_id,
            tileset_id: bundle.map.tileset_id,
            width_blocks: bundle.map.width,
            height_blocks: bundle.map.height,
            width_quadrants: bundle.grid.width(),
            height_quadrants: bundle.grid.height(),
            grid: render_text_grid(&bundle.grid, &bundle.special, cli.pos, cli.crop)?,
            actions: path.as_ref().map(PathResult::action_string),
            path: path.map(|p| p.coords),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cli.text {
        println!(
            "{}",
            render_text_grid(&bundle.grid, &bundle.special, cli.pos, cli.crop)?
        );
        return Ok(());
    }

    let img = if cli.minimal {
        render_walkability_map(
            &bundle.grid,
            &bundle.special,
            cli.pos,
            cli.debug,
            cli.debug,
            cli.crop,
        )?
    } else {
        let tiles = bundle.load_tiles(&rom)?;
        render_full_map(
            &bundle.map,
            &bundle.blocks,
            &tiles,
            &bundle.grid,
            &bundle.special,
            FullRenderOptions {
                path: path.as_ref(),
                pos: cli.pos,
                debug: cli.debug,
                crop: cli.crop,
            },
        )?
    };

    img.save(&cli.output)
        .with_context(|| format!("saving image to {}", cli.output.display()))?;
    info!(output = %cli.output.display(), "image saved");
    Ok(())
}
