use std::path::PathBuf;

use clap::Parser;

use crate::rules::Pattern;

pub const DEFAULT_GRID_WIDTH: u32 = 256;
pub const DEFAULT_GRID_HEIGHT: u32 = 144;
/// Side of one cell on screen, in logical pixels. 256x144 cells at 5px is 720p.
pub const DEFAULT_CELL_SIZE: u32 = 5;
pub const DEFAULT_SPEED: u32 = 1;

/// Largest grid side. A full 4096x4096 upload is 64 MiB, inside wgpu's
/// default storage binding limit.
pub const MAX_GRID_SIDE: u32 = 4096;
pub const MAX_CELL_SIZE: u32 = 64;

/// Interactive Conway's Game of Life.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Number of cell columns.
    #[arg(long, value_name = "CELLS", default_value_t = DEFAULT_GRID_WIDTH,
          value_parser = clap::value_parser!(u32).range(1..=MAX_GRID_SIDE as i64))]
    pub width: u32,
    /// Number of cell rows.
    #[arg(long, value_name = "CELLS", default_value_t = DEFAULT_GRID_HEIGHT,
          value_parser = clap::value_parser!(u32).range(1..=MAX_GRID_SIDE as i64))]
    pub height: u32,
    /// Pixels drawn along each cell edge.
    #[arg(long = "cell-size", value_name = "PIXELS", default_value_t = DEFAULT_CELL_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=MAX_CELL_SIZE as i64))]
    pub cell_size: u32,
    /// Tick threshold: a generation advances every SPEED + 1 frames. Smaller runs faster.
    #[arg(long, value_name = "FRAMES", default_value_t = DEFAULT_SPEED,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub speed: u32,
    /// State file to load at start-up.
    #[arg(long, value_name = "PATH")]
    pub load: Option<PathBuf>,
    /// Pattern to place in the middle of the grid at start-up.
    #[arg(long, value_enum)]
    pub pattern: Option<Pattern>,
}

impl Config {
    /// Window size in logical pixels. Parsed bounds keep this within `u32`.
    pub fn window_size(&self) -> (u32, u32) {
        (self.width * self.cell_size, self.height * self.cell_size)
    }
}
