use std::path::Path;

use crate::clock::SimClock;
use crate::error::SimError;
use crate::grid::Grid;
use crate::persist::{self, SaveSource};
use crate::rules::{self, Pattern};

/// Everything the simulation owns: the live grid, the grid as it was when the
/// simulation last started, and the clock that gates generations.
///
/// Edits are only accepted while paused. Generations only advance while
/// running. The running flag is the single switch between the two.
pub struct Simulation {
    grid: Grid,
    previous: Grid,
    clock: SimClock,
    generation: u64,
}

impl Simulation {
    pub fn new(width: usize, height: usize, threshold: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            previous: Grid::new(width, height),
            clock: SimClock::new(threshold),
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Grid captured by the last `start`. All dead until the first start.
    pub fn previous(&self) -> &Grid {
        &self.previous
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Generations advanced since start-up or the last clear / load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Snapshot the grid and start advancing.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.previous = self.grid.snapshot();
        self.clock.start();
        log::info!(
            "Simulation started at generation {} with {} live cells",
            self.generation,
            self.grid.live_count()
        );
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.clock.stop();
        log::info!("Simulation paused at generation {}", self.generation);
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    fn ensure_paused(&self) -> Result<(), SimError> {
        if self.is_running() {
            return Err(SimError::SimulationRunning);
        }
        Ok(())
    }

    pub fn paint(&mut self, x: usize, y: usize) -> Result<(), SimError> {
        self.ensure_paused()?;
        self.grid.set(x, y, true);
        Ok(())
    }

    pub fn erase(&mut self, x: usize, y: usize) -> Result<(), SimError> {
        self.ensure_paused()?;
        self.grid.set(x, y, false);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), SimError> {
        self.ensure_paused()?;
        self.grid.clear();
        self.generation = 0;
        log::info!("Grid cleared");
        Ok(())
    }

    /// Stamp `pattern` in the middle of the grid.
    pub fn seed(&mut self, pattern: Pattern) -> Result<usize, SimError> {
        self.ensure_paused()?;
        let placed = pattern.stamp_centered(&mut self.grid);
        log::info!("Seeded {:?} ({} cells)", pattern, placed);
        Ok(placed)
    }

    /// Adjust the speed. Allowed while running.
    pub fn set_speed(&mut self, delta: i32) {
        self.clock.set_speed(delta);
        log::debug!("Generation every {} frames", self.clock.threshold() + 1);
    }

    /// Advance one generation unconditionally. Returns how many cells changed.
    pub fn advance(&mut self) -> usize {
        let changed = rules::step(&mut self.grid);
        self.generation += 1;
        log::debug!("Generation {}: {} cells changed", self.generation, changed);
        changed
    }

    /// One iteration of the render loop. Returns true when a generation advanced.
    pub fn frame(&mut self) -> bool {
        if self.clock.on_frame() {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn save(&self, path: &Path, source: SaveSource) -> Result<(), SimError> {
        let grid = match source {
            SaveSource::Current => &self.grid,
            SaveSource::Previous => &self.previous,
        };
        persist::save_grid(path, grid)
    }

    /// Replace the grid with the contents of a state file.
    pub fn load(&mut self, path: &Path) -> Result<(), SimError> {
        self.ensure_paused()?;
        let loaded = persist::load_grid(path, self.grid.width(), self.grid.height())?;
        self.grid.restore(loaded);
        self.generation = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker_sim() -> Simulation {
        let mut sim = Simulation::new(5, 5, 1);
        for x in 1..=3 {
            sim.paint(x, 2).unwrap();
        }
        sim
    }

    #[test]
    fn starts_paused_and_empty() {
        let sim = Simulation::new(256, 144, 1);
        assert!(!sim.is_running());
        assert_eq!(sim.clock().threshold(), 1);
        assert_eq!(sim.grid().live_count(), 0);
        assert_eq!(sim.previous().live_count(), 0);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn paint_and_erase_while_paused() {
        let mut sim = Simulation::new(4, 4, 1);
        sim.paint(1, 1).unwrap();
        assert!(sim.grid().get(1, 1));
        sim.erase(1, 1).unwrap();
        assert!(!sim.grid().get(1, 1));
    }

    #[test]
    fn edits_rejected_while_running() {
        let mut sim = blinker_sim();
        sim.start();
        let before = sim.grid().clone();

        assert!(matches!(sim.paint(0, 0), Err(SimError::SimulationRunning)));
        assert!(matches!(sim.erase(2, 2), Err(SimError::SimulationRunning)));
        assert!(matches!(sim.clear(), Err(SimError::SimulationRunning)));
        assert!(matches!(sim.seed(Pattern::Block), Err(SimError::SimulationRunning)));
        assert_eq!(sim.grid(), &before);
    }

    #[test]
    fn paused_simulation_does_not_advance() {
        let mut sim = blinker_sim();
        let before = sim.grid().clone();
        for _ in 0..10 {
            assert!(!sim.frame());
        }
        assert_eq!(sim.grid(), &before);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn running_advances_on_clock_boundaries() {
        let mut sim = blinker_sim();
        let horizontal = sim.grid().clone();
        sim.start();

        assert!(!sim.frame());
        assert!(sim.frame());
        assert_eq!(sim.generation(), 1);
        assert!(sim.grid().get(2, 1) && sim.grid().get(2, 3));

        assert!(!sim.frame());
        assert!(sim.frame());
        assert_eq!(sim.grid(), &horizontal);
    }

    #[test]
    fn start_snapshot_survives_stepping() {
        let mut sim = Simulation::new(16, 16, 1);
        sim.seed(Pattern::Glider).unwrap();
        let before_start = sim.grid().clone();

        sim.start();
        for _ in 0..20 {
            sim.frame();
        }
        assert_eq!(sim.generation(), 10);
        assert_ne!(sim.grid(), &before_start);
        assert_eq!(sim.previous(), &before_start);
    }

    #[test]
    fn stop_keeps_grid_and_snapshot() {
        let mut sim = blinker_sim();
        sim.start();
        sim.advance();
        let current = sim.grid().clone();
        let previous = sim.previous().clone();

        sim.stop();
        assert!(!sim.is_running());
        assert_eq!(sim.grid(), &current);
        assert_eq!(sim.previous(), &previous);
    }

    #[test]
    fn restarting_takes_a_new_snapshot() {
        let mut sim = blinker_sim();
        sim.start();
        sim.advance();
        sim.stop();
        let paused_grid = sim.grid().clone();

        sim.toggle();
        assert!(sim.is_running());
        assert_eq!(sim.previous(), &paused_grid);
    }

    #[test]
    fn speed_changes_while_running() {
        let mut sim = Simulation::new(4, 4, 1);
        sim.start();
        sim.set_speed(-4);
        assert_eq!(sim.clock().threshold(), 5);
        sim.set_speed(10);
        assert_eq!(sim.clock().threshold(), 1);
    }

    #[test]
    fn clear_resets_generation() {
        let mut sim = blinker_sim();
        sim.advance();
        sim.advance();
        sim.clear().unwrap();
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.grid().live_count(), 0);
    }

    #[test]
    fn save_previous_and_current() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = blinker_sim();
        let horizontal = sim.grid().clone();
        sim.start();
        sim.advance();
        sim.stop();

        let prev_path = dir.path().join("prev.gol");
        let cur_path = dir.path().join("cur.gol");
        sim.save(&prev_path, SaveSource::Previous).unwrap();
        sim.save(&cur_path, SaveSource::Current).unwrap();

        assert_eq!(persist::load_grid(&prev_path, 5, 5).unwrap(), horizontal);
        assert_eq!(persist::load_grid(&cur_path, 5, 5).unwrap(), *sim.grid());
    }

    #[test]
    fn load_replaces_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blinker.gol");
        blinker_sim().save(&path, SaveSource::Current).unwrap();

        let mut sim = Simulation::new(5, 5, 1);
        sim.paint(0, 0).unwrap();
        sim.load(&path).unwrap();
        assert_eq!(sim.grid(), blinker_sim().grid());
    }

    #[test]
    fn failed_load_keeps_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrong.gol");
        std::fs::write(&path, [1u8; 7]).unwrap();

        let mut sim = blinker_sim();
        let before = sim.grid().clone();
        assert!(matches!(sim.load(&path), Err(SimError::SizeMismatch { expected: 25, actual: 7 })));
        assert!(matches!(sim.load(&dir.path().join("absent.gol")), Err(SimError::Io(_))));
        assert_eq!(sim.grid(), &before);
    }

    #[test]
    fn load_rejected_while_running() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blinker.gol");
        blinker_sim().save(&path, SaveSource::Current).unwrap();

        let mut sim = Simulation::new(5, 5, 1);
        sim.start();
        assert!(matches!(sim.load(&path), Err(SimError::SimulationRunning)));
        assert_eq!(sim.grid().live_count(), 0);
    }
}
