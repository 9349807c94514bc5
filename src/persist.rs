//! Raw state files.
//!
//! A state file is exactly `width * height` bytes, one per cell in row-major
//! order. Bit 0 is the alive flag; the other bits are written as zero and
//! ignored on load. There is no header, so a file only fits the grid size it
//! was saved from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SimError;
use crate::grid::Grid;

pub const FILE_EXTENSION: &str = "gol";
pub const DEFAULT_FILE_NAME: &str = "simulation.gol";

const ALIVE_BIT: u8 = 0x1;

/// Which grid a save writes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveSource {
    /// The grid as it was when the simulation was last started.
    Previous,
    /// The live grid.
    Current,
}

pub fn encode(grid: &Grid) -> Vec<u8> {
    grid.cells().iter().map(|&alive| if alive { ALIVE_BIT } else { 0 }).collect()
}

pub fn decode(bytes: &[u8], width: usize, height: usize) -> Result<Grid, SimError> {
    let expected = width * height;
    if bytes.len() != expected {
        return Err(SimError::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let cells = bytes.iter().map(|&b| (b & ALIVE_BIT) != 0).collect();
    Ok(Grid::from_cells(width, height, cells))
}

/// Turn a user-entered path into a file path, adding the `.gol` extension
/// when none was given.
pub fn resolve_path(input: &str) -> PathBuf {
    let mut path = PathBuf::from(input.trim());
    if path.extension().is_none() {
        path.set_extension(FILE_EXTENSION);
    }
    path
}

/// Write `grid` to `path`, replacing any existing file.
pub fn save_grid(path: &Path, grid: &Grid) -> Result<(), SimError> {
    fs::write(path, encode(grid))?;
    log::info!("Saved {}x{} grid to {}", grid.width(), grid.height(), path.display());
    Ok(())
}

/// Read a state file saved from a `width` x `height` grid.
pub fn load_grid(path: &Path, width: usize, height: usize) -> Result<Grid, SimError> {
    let bytes = fs::read(path)?;
    let grid = decode(&bytes, width, height)?;
    log::info!("Loaded {} live cells from {}", grid.live_count(), path.display());
    Ok(grid)
}
