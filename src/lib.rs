//! Maze model and navigation logic for a 4×4 micromouse.
//!
//! Everything in this crate is pure logic so it can be exercised by host-side
//! unit tests. The STM32 firmware in `firmware/` owns the peripherals and
//! plugs them in through the [`drive::Drive`] trait and the shared sensor
//! readings in [`sensors::SharedSensors`].
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`grid`] | Cell weights, walls, flood fill |
//! | [`planner`] | Picks the next heading from the current cell |
//! | [`executor`] | Turns a desired heading into a timed maneuver |
//! | [`navigator`] | Position + heading bookkeeping for the control loop |
//! | [`drive`] | Motor command tables and the `Drive` collaborator |
//! | [`sensors`] | Sample averaging, wall calibration, lateral correction |
//! | [`debounce`] | Button debounce state machine |
//! | [`debug`] | CRLF debug lines for the UART |

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod debounce;
pub mod debug;
pub mod drive;
pub mod executor;
pub mod grid;
pub mod heading;
pub mod navigator;
pub mod planner;
pub mod sensors;

pub use executor::TurnExecutor;
pub use grid::{FloodReport, Grid, Position};
pub use heading::{Heading, Turn};
pub use navigator::{Navigator, Step};
