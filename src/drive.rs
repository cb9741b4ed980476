//! Motor command tables for a two-wheel differential drive.
//!
//! Each wheel is driven by one PWM channel plus two direction pins (IN0,
//! IN1) on an H-bridge:
//!
//! | Direction | IN0 | IN1 | Duty |
//! | --------- | --- | --- | ---- |
//! | Forward   | 1   | 0   | as requested |
//! | Reverse   | 0   | 1   | as requested |
//! | Stop      | 0   | 0   | forced to 0 |
//!
//! Duties are on a `0..=PWM_PERIOD` scale; the firmware rescales them to the
//! timer's real max duty.

use crate::config::PWM_PERIOD;

/// Motor identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    Left,
    Right,
}

/// Motor direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Reverse,
    /// Both bridge inputs low, no drive.
    Stop,
}

/// One wheel's bridge state and duty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    pub direction: Direction,
    pub duty: u16,
}

impl MotorCommand {
    /// Duty is clamped to `PWM_PERIOD` and forced to 0 for [`Direction::Stop`].
    pub const fn new(direction: Direction, duty: u16) -> Self {
        let duty = match direction {
            Direction::Stop => 0,
            _ if duty > PWM_PERIOD => PWM_PERIOD,
            _ => duty,
        };
        Self { direction, duty }
    }

    pub const fn stop() -> Self {
        Self::new(Direction::Stop, 0)
    }

    /// Levels for the (IN0, IN1) direction pins.
    pub const fn pins(self) -> (bool, bool) {
        match self.direction {
            Direction::Forward => (true, false),
            Direction::Reverse => (false, true),
            Direction::Stop => (false, false),
        }
    }
}

/// Commands for both wheels, applied together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    pub left: MotorCommand,
    pub right: MotorCommand,
}

impl DriveCommand {
    pub const fn forward(duty: u16) -> Self {
        Self::arc(duty, duty)
    }

    /// Both wheels forward at different duties.
    pub const fn arc(left_duty: u16, right_duty: u16) -> Self {
        Self {
            left: MotorCommand::new(Direction::Forward, left_duty),
            right: MotorCommand::new(Direction::Forward, right_duty),
        }
    }

    /// Spin clockwise in place.
    pub const fn pivot_right(duty: u16) -> Self {
        Self {
            left: MotorCommand::new(Direction::Forward, duty),
            right: MotorCommand::new(Direction::Reverse, duty),
        }
    }

    /// Spin counter-clockwise in place.
    pub const fn pivot_left(duty: u16) -> Self {
        Self {
            left: MotorCommand::new(Direction::Reverse, duty),
            right: MotorCommand::new(Direction::Forward, duty),
        }
    }

    pub const fn brake() -> Self {
        Self {
            left: MotorCommand::stop(),
            right: MotorCommand::stop(),
        }
    }

    pub const fn motor(self, motor: Motor) -> MotorCommand {
        match motor {
            Motor::Left => self.left,
            Motor::Right => self.right,
        }
    }
}

/// Physical actuation, supplied by the firmware (or a test double).
#[allow(async_fn_in_trait)]
pub trait Drive {
    /// Apply both wheel commands immediately.
    fn apply(&mut self, command: DriveCommand);

    /// Keep the current command running for `duration_ms`. Returns only once
    /// the full duration has elapsed.
    async fn hold(&mut self, duration_ms: u32);
}
