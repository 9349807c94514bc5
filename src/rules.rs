//! Rules module for Conway's Game of Life simulation
//!
//! A generation is computed in two passes. `evaluate` reads one committed
//! grid and returns the pending changes, then `commit` writes them. Nothing
//! pending is ever stored in the grid, so every neighbor count in a pass sees
//! the same generation.
//!
//! Game of Life standard rules (B3/S23):
//! 1. Any live cell with fewer than two live neighbors dies (underpopulation)
//! 2. Any live cell with two or three live neighbors lives (survival)
//! 3. Any live cell with more than three live neighbors dies (overpopulation)
//! 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)

pub mod patterns;

use crate::grid::Grid;

pub use patterns::Pattern;

/// A pending state change for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Revive,
    Die,
}

/// A cell coordinate paired with its pending change.
pub type CellIntent = (usize, usize, Intent);

/// Count live cells in the Moore neighborhood of `(x, y)`.
///
/// Neighbors that would fall outside the grid are skipped, there is no
/// wraparound. A corner cell therefore has at most 3 candidates and an edge
/// cell at most 5.
pub fn count_live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let mut count = 0;

    for dy in -1isize..=1 {
        for dx in -1isize..=1 {
            // Skip the cell itself
            if dx == 0 && dy == 0 {
                continue;
            }

            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if grid.contains(nx, ny) && grid.get(nx, ny) {
                count += 1;
            }
        }
    }

    count
}

/// The transition for a single cell, or `None` when it keeps its state.
pub fn decide(alive: bool, neighbors: u8) -> Option<Intent> {
    match (alive, neighbors) {
        (true, 2 | 3) => None,
        (true, _) => Some(Intent::Die),
        (false, 3) => Some(Intent::Revive),
        (false, _) => None,
    }
}

/// Compute the intents for every cell of `grid` without touching it.
pub fn evaluate(grid: &Grid) -> Vec<CellIntent> {
    let mut intents = Vec::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let neighbors = count_live_neighbors(grid, x, y);
            if let Some(intent) = decide(grid.get(x, y), neighbors) {
                intents.push((x, y, intent));
            }
        }
    }

    intents
}

/// Apply intents produced by `evaluate`. Order does not matter.
pub fn commit(grid: &mut Grid, intents: &[CellIntent]) {
    for &(x, y, intent) in intents {
        grid.set(x, y, intent == Intent::Revive);
    }
}

/// Advance `grid` by one generation. Returns how many cells changed.
pub fn step(grid: &mut Grid) -> usize {
    let intents = evaluate(grid);
    commit(grid, &intents);
    intents.len()
}
