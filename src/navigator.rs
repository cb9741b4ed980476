//! Control-loop state: where the robot is, which way it faces, and what it
//! knows about the maze.
//!
//! The heading stored here is only ever replaced by the value
//! [`TurnExecutor::execute_move`] returns.

use crate::config::START;
use crate::drive::Drive;
use crate::executor::TurnExecutor;
use crate::grid::{FloodReport, Grid, Position};
use crate::heading::Heading;
use crate::planner;

/// Result of one [`Navigator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Turned (if needed) toward `to` and driving forward.
    Moved {
        from: Position,
        to: Position,
        heading: Heading,
    },
    /// Already on the goal; motors braked.
    Arrived,
    /// No open side to leave through; motors braked.
    Stuck,
}

pub struct Navigator {
    grid: Grid,
    position: Position,
    heading: Heading,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(START, Heading::North)
    }
}

impl Navigator {
    pub fn new(position: Position, heading: Heading) -> Self {
        Self::with_grid(Grid::new(), position, heading)
    }

    /// Start from an already explored grid, e.g. for a run after the maze
    /// has been mapped.
    pub fn with_grid(grid: Grid, position: Position, heading: Heading) -> Self {
        Self {
            grid,
            position,
            heading,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn is_at_goal(&self) -> bool {
        self.position == self.grid.goal()
    }

    /// Weight of the current cell.
    pub fn weight(&self) -> u8 {
        self.grid.weight(self.position)
    }

    /// Record a wall on the `dir` side of the current cell.
    pub fn record_wall(&mut self, dir: Heading) -> Option<FloodReport> {
        self.grid.set_wall(self.position, dir)
    }

    /// Record a wall directly in front of the robot.
    pub fn wall_ahead(&mut self) -> Option<FloodReport> {
        self.record_wall(self.heading)
    }

    /// Heading the next [`step`](Self::step) would take, `None` when boxed in.
    pub fn next_direction(&self) -> Option<Heading> {
        planner::plan(&self.grid, self.position)
    }

    /// Pick the best open side and turn to face it. The position stays on
    /// the current cell until [`advance`](Self::advance) confirms the robot
    /// actually got across.
    pub async fn face_next<D: Drive>(&mut self, executor: &mut TurnExecutor<D>) -> Step {
        if self.is_at_goal() {
            executor.stop();
            return Step::Arrived;
        }

        let Some(desired) = self.next_direction() else {
            executor.stop();
            return Step::Stuck;
        };

        self.heading = executor.execute_move(self.heading, desired).await;

        Step::Moved {
            from: self.position,
            to: self.position.neighbor(self.heading),
            heading: self.heading,
        }
    }

    /// Commit one cell along the current heading.
    pub fn advance(&mut self) -> Position {
        self.position = self.position.neighbor(self.heading);
        self.position
    }

    /// [`face_next`](Self::face_next) followed by [`advance`](Self::advance)
    /// when a move was made. Driving across the cell is left to the caller.
    pub async fn step<D: Drive>(&mut self, executor: &mut TurnExecutor<D>) -> Step {
        let step = self.face_next(executor).await;
        if let Step::Moved { .. } = step {
            self.advance();
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriveConfig;
    use crate::drive::DriveCommand;
    use crate::executor::tests::{Event, Recorder};
    use embassy_futures::block_on;

    fn executor() -> TurnExecutor<Recorder> {
        TurnExecutor::new(Recorder::default(), DriveConfig::default())
    }

    #[test]
    fn open_maze_runs_straight_home() {
        let mut nav = Navigator::default();
        let mut exec = executor();
        let mut moves = 0;
        loop {
            match block_on(nav.step(&mut exec)) {
                Step::Moved { to, .. } => {
                    moves += 1;
                    assert!(to.is_valid());
                }
                Step::Arrived => break,
                Step::Stuck => panic!("stuck at {:?}", nav.position()),
            }
        }
        // Manhattan distance from (4,4) is 6 and the walk is greedy.
        assert_eq!(moves, 6);
        assert!(nav.is_at_goal());
        assert_eq!(nav.weight(), 0);
    }

    #[test]
    fn first_step_turns_west() {
        let mut nav = Navigator::default();
        let mut exec = executor();
        let step = block_on(nav.step(&mut exec));
        assert_eq!(
            step,
            Step::Moved {
                from: Position::new(4, 4),
                to: Position::new(4, 3),
                heading: Heading::West,
            }
        );
        assert_eq!(nav.heading(), Heading::West);
        assert_eq!(
            exec.drive().events[0],
            Event::Apply(DriveCommand::pivot_left(1000))
        );
    }

    #[test]
    fn wall_ahead_is_recorded_on_both_sides() {
        let mut nav = Navigator::new(Position::new(2, 2), Heading::West);
        let report = nav.wall_ahead().expect("inside the maze");
        assert!(report.converged);
        assert!(nav.grid().has_wall(Position::new(2, 2), Heading::West));
        assert!(nav.grid().has_wall(Position::new(2, 1), Heading::East));
        assert_eq!(nav.next_direction(), Some(Heading::North));
    }

    #[test]
    fn wall_seen_while_crossing_stays_on_the_start_cell() {
        let mut nav = Navigator::default();
        let mut exec = executor();
        let step = block_on(nav.face_next(&mut exec));
        assert_eq!(
            step,
            Step::Moved {
                from: Position::new(4, 4),
                to: Position::new(4, 3),
                heading: Heading::West,
            }
        );
        // Not across yet.
        assert_eq!(nav.position(), Position::new(4, 4));

        nav.wall_ahead();
        assert!(nav.grid().has_wall(Position::new(4, 4), Heading::West));
        assert!(nav.grid().has_wall(Position::new(4, 3), Heading::East));
        assert!(!nav.grid().has_wall(Position::new(4, 3), Heading::West));
        assert_eq!(nav.next_direction(), Some(Heading::North));
    }

    #[test]
    fn advance_commits_the_crossing() {
        let mut nav = Navigator::default();
        let mut exec = executor();
        block_on(nav.face_next(&mut exec));
        assert_eq!(nav.advance(), Position::new(4, 3));
        assert_eq!(nav.position(), Position::new(4, 3));
        assert_eq!(nav.weight(), 5);
    }

    #[test]
    fn boxed_in_reports_stuck_and_brakes() {
        let mut nav = Navigator::new(Position::new(4, 4), Heading::North);
        nav.record_wall(Heading::North);
        nav.record_wall(Heading::West);
        let mut exec = executor();
        assert_eq!(block_on(nav.step(&mut exec)), Step::Stuck);
        assert_eq!(exec.drive().events, [Event::Apply(DriveCommand::brake())]);
        assert_eq!(nav.position(), Position::new(4, 4));
    }

    #[test]
    fn on_goal_reports_arrived() {
        let mut nav = Navigator::new(Position::new(1, 1), Heading::South);
        let mut exec = executor();
        assert_eq!(block_on(nav.step(&mut exec)), Step::Arrived);
        assert_eq!(nav.heading(), Heading::South);
    }
}
