use clap::ValueEnum;

use crate::grid::Grid;

/// Predefined patterns for seeding the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pattern {
    /// A small oscillator
    Blinker,
    /// A small oscillator
    Toad,
    /// A small stationary pattern
    Block,
    /// A diagonal spaceship
    Glider,
    /// A horizontal spaceship
    LightweightSpaceship,
    /// A pattern that emits a glider every 30 generations
    GosperGliderGun,
}

impl Pattern {
    /// Live cells relative to the pattern's top-left corner.
    pub fn offsets(&self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Blinker => &[(0, 0), (1, 0), (2, 0)],
            Pattern::Toad => &[
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ],
            Pattern::Block => &[
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
            Pattern::Glider => &[
                (0, 1),
                (1, 2),
                (2, 0), (2, 1), (2, 2),
            ],
            Pattern::LightweightSpaceship => &[
                (0, 1), (0, 3),
                (1, 0),
                (2, 0),
                (3, 0), (3, 3),
                (4, 0), (4, 1), (4, 2),
            ],
            Pattern::GosperGliderGun => &[
                // Left block
                (0, 4), (0, 5),
                (1, 4), (1, 5),

                // Left ship
                (10, 4), (10, 5), (10, 6),
                (11, 3), (11, 7),
                (12, 2), (12, 8),
                (13, 2), (13, 8),
                (14, 5),
                (15, 3), (15, 7),
                (16, 4), (16, 5), (16, 6),
                (17, 5),

                // Right ship
                (20, 2), (20, 3), (20, 4),
                (21, 2), (21, 3), (21, 4),
                (22, 1), (22, 5),
                (24, 0), (24, 1), (24, 5), (24, 6),

                // Right block
                (34, 2), (34, 3),
                (35, 2), (35, 3),
            ],
        }
    }

    /// Bounding box as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        self.offsets()
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }

    /// Set the pattern's cells alive with its top-left corner at `(x, y)`.
    /// Cells that land outside the grid are dropped. Returns how many were placed.
    pub fn stamp(&self, grid: &mut Grid, x: usize, y: usize) -> usize {
        let mut placed = 0;
        for &(dx, dy) in self.offsets() {
            let (cx, cy) = (x + dx, y + dy);
            if grid.contains(cx, cy) {
                grid.set(cx, cy, true);
                placed += 1;
            }
        }
        placed
    }

    /// Stamp the pattern in the middle of the grid.
    pub fn stamp_centered(&self, grid: &mut Grid) -> usize {
        let (w, h) = self.size();
        let x = grid.width().saturating_sub(w) / 2;
        let y = grid.height().saturating_sub(h) / 2;
        self.stamp(grid, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::step;

    fn stamped(pattern: Pattern, width: usize, height: usize, x: usize, y: usize) -> Grid {
        let mut grid = Grid::new(width, height);
        pattern.stamp(&mut grid, x, y);
        grid
    }

    #[test]
    fn sizes() {
        assert_eq!(Pattern::Blinker.size(), (3, 1));
        assert_eq!(Pattern::Glider.size(), (3, 3));
        assert_eq!(Pattern::LightweightSpaceship.size(), (5, 4));
        assert_eq!(Pattern::GosperGliderGun.size(), (36, 9));
    }

    #[test]
    fn gosper_gun_has_36_cells() {
        let mut grid = Grid::new(64, 32);
        assert_eq!(Pattern::GosperGliderGun.stamp_centered(&mut grid), 36);
        assert_eq!(grid.live_count(), 36);
    }

    #[test]
    fn stamp_drops_cells_outside_the_grid() {
        let mut grid = Grid::new(4, 4);
        // Only the first two cells of the blinker fit.
        assert_eq!(Pattern::Blinker.stamp(&mut grid, 2, 3), 2);
        assert!(grid.get(2, 3));
        assert!(grid.get(3, 3));
    }

    #[test]
    fn block_is_still_life() {
        let mut grid = stamped(Pattern::Block, 6, 6, 2, 2);
        let before = grid.clone();
        assert_eq!(step(&mut grid), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn toad_has_period_two() {
        let mut grid = stamped(Pattern::Toad, 8, 8, 2, 3);
        let start = grid.clone();
        step(&mut grid);
        assert_ne!(grid, start);
        step(&mut grid);
        assert_eq!(grid, start);
    }

    #[test]
    fn glider_moves_diagonally() {
        let mut grid = stamped(Pattern::Glider, 20, 20, 5, 5);
        for _ in 0..4 {
            step(&mut grid);
        }
        assert_eq!(grid, stamped(Pattern::Glider, 20, 20, 6, 6));
    }

    #[test]
    fn centered_in_default_grid() {
        let mut grid = Grid::new(256, 144);
        Pattern::Blinker.stamp_centered(&mut grid);
        assert!(grid.get(126, 71));
        assert!(grid.get(127, 71));
        assert!(grid.get(128, 71));
    }
}
