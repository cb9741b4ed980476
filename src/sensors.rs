//! Side proximity sensors: sample averaging, calibration and lateral
//! correction.
//!
//! Two analog channels are sampled alternately into a half buffer, right
//! channel first:
//!
//! ```text
//! [R0, L0, R1, L1, ..., R9, L9]
//! ```
//!
//! Each filled half is averaged and published through [`SharedSensors`].
//! Lower readings mean a closer wall.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::config::SensorConfig;

/// Capacity of one sample half. Only the first
/// [`pairs_per_half`](SensorConfig::pairs_per_half) pairs are filled.
pub const HALF_BUFFER_LEN: usize = 100;

/// Averaged reading of both side sensors (12-bit ADC counts).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorAverages {
    pub left: u16,
    pub right: u16,
}

/// Average the first `pairs` interleaved (right, left) samples of `half`.
///
/// Pairs missing from a short buffer are ignored; an empty buffer averages
/// to zero.
pub fn average_interleaved(half: &[u16], pairs: usize) -> SensorAverages {
    let mut right_sum: u32 = 0;
    let mut left_sum: u32 = 0;
    let mut count: u32 = 0;

    for pair in half.chunks_exact(2).take(pairs) {
        right_sum += pair[0] as u32;
        left_sum += pair[1] as u32;
        count += 1;
    }

    if count == 0 {
        return SensorAverages::default();
    }

    SensorAverages {
        left: (left_sum / count) as u16,
        right: (right_sum / count) as u16,
    }
}

/// Latest averages, written from the sampling context and read from the
/// control loop.
///
/// Left and right are stored independently: a reader can see a new left
/// value next to the previous right one.
pub struct SharedSensors {
    left: AtomicU16,
    right: AtomicU16,
}

impl Default for SharedSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedSensors {
    pub const fn new() -> Self {
        Self {
            left: AtomicU16::new(0),
            right: AtomicU16::new(0),
        }
    }

    pub fn store(&self, averages: SensorAverages) {
        self.left.store(averages.left, Ordering::Relaxed);
        self.right.store(averages.right, Ordering::Relaxed);
    }

    pub fn load(&self) -> SensorAverages {
        SensorAverages {
            left: self.left.load(Ordering::Relaxed),
            right: self.right.load(Ordering::Relaxed),
        }
    }
}

/// Per-side thresholds learned during calibration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub left_near: u16,
    pub left_far: u16,
    pub left_centered: u16,
    pub right_near: u16,
    pub right_far: u16,
    pub right_centered: u16,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            left_near: 400,
            left_far: 4000,
            left_centered: 2200,
            right_near: 400,
            right_far: 4000,
            right_centered: 2200,
        }
    }
}

/// Calibration positions, in the order the operator is asked to hold them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationStep {
    /// Robot pressed against the right wall.
    NearRight,
    /// Robot pressed against the left wall.
    NearLeft,
    /// Robot centered in the corridor.
    Centered,
}

impl CalibrationStep {
    pub const ALL: [CalibrationStep; 3] = [
        CalibrationStep::NearRight,
        CalibrationStep::NearLeft,
        CalibrationStep::Centered,
    ];
}

/// Collects one reading per [`CalibrationStep`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Calibrator {
    near_right: Option<u16>,
    near_left: Option<u16>,
    centered: Option<SensorAverages>,
}

impl Calibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the reading taken while holding `step`. Only the side facing
    /// the wall is kept for the near steps.
    pub fn record(&mut self, step: CalibrationStep, reading: SensorAverages) {
        match step {
            CalibrationStep::NearRight => self.near_right = Some(reading.right),
            CalibrationStep::NearLeft => self.near_left = Some(reading.left),
            CalibrationStep::Centered => self.centered = Some(reading),
        }
    }

    /// Thresholds once all three steps are recorded. Centered thresholds are
    /// the midpoint between near and far.
    pub fn finish(&self) -> Option<Calibration> {
        let right_near = self.near_right?;
        let left_near = self.near_left?;
        let far = self.centered?;

        Some(Calibration {
            left_near,
            left_far: far.left,
            left_centered: midpoint(left_near, far.left),
            right_near,
            right_far: far.right,
            right_centered: midpoint(right_near, far.right),
        })
    }
}

fn midpoint(a: u16, b: u16) -> u16 {
    ((a as u32 + b as u32) / 2) as u16
}

/// Steering decision while driving along a corridor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Correction {
    Forward,
    /// Too close to the right wall.
    SteerLeft,
    /// Too close to the left wall.
    SteerRight,
}

/// Pick a correction for `reading`. Left proximity wins when both sides are
/// close. Without a calibration there is nothing to compare against and the
/// robot keeps going straight.
pub fn correction(
    cal: Option<&Calibration>,
    config: &SensorConfig,
    reading: SensorAverages,
) -> Correction {
    let Some(cal) = cal else {
        return Correction::Forward;
    };

    let near_left = reading.left < cal.left_near.saturating_add(config.near_margin);
    let near_right = reading.right < cal.right_near.saturating_add(config.near_margin);

    if near_left {
        Correction::SteerRight
    } else if near_right {
        Correction::SteerLeft
    } else {
        Correction::Forward
    }
}
