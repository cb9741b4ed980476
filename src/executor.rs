//! Heading changes as timed pivots.
//!
//! The executor does not look at any sensor while a pivot is running: once
//! started, a turn always takes its full calibrated duration. If the wheels
//! slip, the returned heading is wrong until the next learned wall forces a
//! replan.

use crate::config::DriveConfig;
use crate::drive::{Drive, DriveCommand};
use crate::heading::{Heading, Turn};

pub struct TurnExecutor<D> {
    drive: D,
    config: DriveConfig,
}

impl<D: Drive> TurnExecutor<D> {
    pub fn new(drive: D, config: DriveConfig) -> Self {
        Self { drive, config }
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    pub fn drive(&self) -> &D {
        &self.drive
    }

    pub fn drive_mut(&mut self) -> &mut D {
        &mut self.drive
    }

    pub fn into_inner(self) -> D {
        self.drive
    }

    /// Rotate from `current` to `desired` and return the heading the robot
    /// now has. Forward motion resumes afterwards.
    pub async fn execute_move(&mut self, current: Heading, desired: Heading) -> Heading {
        if current == desired {
            self.forward();
            return current;
        }

        let turn = Turn::between(current, desired);
        self.maneuver(turn).await;
        self.forward();
        turn.apply(current)
    }

    /// Run the timed pivot for `turn`. [`Turn::Straight`] does nothing.
    pub async fn maneuver(&mut self, turn: Turn) {
        let duty = self.config.turn_duty;
        let (command, duration_ms) = match turn {
            Turn::Straight => return,
            Turn::Right => (DriveCommand::pivot_right(duty), self.config.turn_90_ms),
            Turn::Left => (DriveCommand::pivot_left(duty), self.config.turn_90_ms),
            // Half turn spins the same way as a right turn, just longer.
            Turn::Around => (DriveCommand::pivot_right(duty), self.config.turn_180_ms),
        };

        self.drive.apply(command);
        self.drive.hold(duration_ms).await;
    }

    pub fn forward(&mut self) {
        self.drive.apply(DriveCommand::forward(self.config.forward_duty));
    }

    pub fn stop(&mut self) {
        self.drive.apply(DriveCommand::brake());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use embassy_futures::block_on;
    use std::vec::Vec;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) enum Event {
        Apply(DriveCommand),
        Hold(u32),
    }

    /// Records every call instead of moving anything.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub events: Vec<Event>,
    }

    impl Drive for Recorder {
        fn apply(&mut self, command: DriveCommand) {
            self.events.push(Event::Apply(command));
        }

        async fn hold(&mut self, duration_ms: u32) {
            self.events.push(Event::Hold(duration_ms));
        }
    }

    fn executor() -> TurnExecutor<Recorder> {
        TurnExecutor::new(Recorder::default(), DriveConfig::default())
    }

    #[test]
    fn same_heading_only_drives_forward() {
        for h in Heading::ALL {
            let mut exec = executor();
            assert_eq!(block_on(exec.execute_move(h, h)), h);
            assert_eq!(
                exec.drive().events,
                [Event::Apply(DriveCommand::forward(700))]
            );
        }
    }

    #[test]
    fn north_to_east_is_one_right_pivot() {
        let mut exec = executor();
        let heading = block_on(exec.execute_move(Heading::North, Heading::East));
        assert_eq!(heading, Heading::East);
        assert_eq!(
            exec.drive().events,
            [
                Event::Apply(DriveCommand::pivot_right(1000)),
                Event::Hold(500),
                Event::Apply(DriveCommand::forward(700)),
            ]
        );
    }

    #[test]
    fn north_to_south_is_one_half_turn() {
        let mut exec = executor();
        let heading = block_on(exec.execute_move(Heading::North, Heading::South));
        assert_eq!(heading, Heading::South);
        let holds: Vec<_> = exec
            .drive()
            .events
            .iter()
            .filter(|e| matches!(e, Event::Hold(_)))
            .collect();
        assert_eq!(holds, [&Event::Hold(1000)]);
    }

    #[test]
    fn north_to_west_is_one_left_pivot() {
        let mut exec = executor();
        let heading = block_on(exec.execute_move(Heading::North, Heading::West));
        assert_eq!(heading, Heading::West);
        assert_eq!(exec.drive().events[0], Event::Apply(DriveCommand::pivot_left(1000)));
        assert_eq!(exec.drive().events[1], Event::Hold(500));
    }

    #[test]
    fn right_then_left_returns_to_start() {
        for start in Heading::ALL {
            let mut exec = executor();
            let turned = block_on(exec.execute_move(start, start.rotate_cw()));
            assert_eq!(turned, start.rotate_cw());
            let back = block_on(exec.execute_move(turned, turned.rotate_ccw()));
            assert_eq!(back, start);
        }
    }

    #[test]
    fn every_pair_lands_on_desired() {
        for current in Heading::ALL {
            for desired in Heading::ALL {
                let mut exec = executor();
                assert_eq!(block_on(exec.execute_move(current, desired)), desired);
            }
        }
    }

    #[test]
    fn custom_timings_are_used() {
        let config = DriveConfig {
            turn_90_ms: 320,
            turn_duty: 900,
            ..DriveConfig::default()
        };
        let mut exec = TurnExecutor::new(Recorder::default(), config);
        block_on(exec.execute_move(Heading::East, Heading::North));
        assert_eq!(
            exec.into_inner().events[..2],
            [Event::Apply(DriveCommand::pivot_left(900)), Event::Hold(320)]
        );
    }

    #[test]
    fn stop_brakes() {
        let mut exec = executor();
        exec.stop();
        assert_eq!(exec.drive().events, [Event::Apply(DriveCommand::brake())]);
    }
}
