//! Simulation error types.

use thiserror::Error;

/// Errors returned by grid edits and state file operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// Edits are only accepted while the simulation is paused.
    #[error("cannot edit the grid while the simulation is running")]
    SimulationRunning,

    /// The state file could not be opened, read or written.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The state file does not hold exactly one byte per cell.
    #[error("state file is {actual} bytes, expected {expected} for this grid")]
    SizeMismatch { expected: usize, actual: usize },
}
