//! Maze geometry and calibration constants.
//!
//! Timings and duties were tuned on the bench for the 4×4 test maze; adjust
//! [`DriveConfig`] rather than the executor when the drivetrain changes.

use crate::grid::Position;

/// Side length of the square maze, in cells.
pub const MAZE_SIZE: u8 = 4;

/// Number of cells in the maze.
pub const CELL_COUNT: usize = MAZE_SIZE as usize * MAZE_SIZE as usize;

/// Sentinel weight for cells that are unreachable or outside the maze.
pub const WEIGHT_MAX: u8 = 255;

/// Goal cell. The planner's tie-break order assumes this corner.
pub const GOAL: Position = Position::new(1, 1);

/// Cell the robot is placed in at power-up.
pub const START: Position = Position::new(4, 4);

/// Upper bound on full-grid flood-fill sweeps per recomputation.
pub const MAX_FLOOD_SWEEPS: u8 = 20;

/// PWM compare scale used by every duty value in this crate.
pub const PWM_PERIOD: u16 = 1000;

/// Debounce window for buttons and digital wall/line inputs.
pub const DEBOUNCE_MS: u32 = 50;

/// Drivetrain calibration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveConfig {
    /// Duty for straight-line travel (0..=PWM_PERIOD).
    pub forward_duty: u16,
    /// Duty for both wheels while pivoting.
    pub turn_duty: u16,
    /// Duration of a 90° pivot.
    pub turn_90_ms: u32,
    /// Duration of a 180° pivot.
    pub turn_180_ms: u32,
    /// Duty removed from the inner wheel during a lateral correction.
    pub steer_delta: u16,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            forward_duty: 700,
            turn_duty: 1000,
            turn_90_ms: 500,
            turn_180_ms: 1000,
            steer_delta: 200,
        }
    }
}

/// Side sensor sampling and thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Interleaved (right, left) pairs in one half of the sample buffer.
    pub pairs_per_half: usize,
    /// Readings below `near + near_margin` count as "too close to the wall".
    pub near_margin: u16,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            pairs_per_half: 10,
            near_margin: 200,
        }
    }
}
