//! Drive the navigator through mazes it has to discover wall by wall.

use embassy_futures::block_on;
use micromouse::config::{DriveConfig, GOAL, START};
use micromouse::drive::{Drive, DriveCommand};
use micromouse::{Grid, Heading, Navigator, Position, Step, TurnExecutor};

/// Counts pivots and accumulated turn time.
#[derive(Default)]
struct Odometer {
    pivots: u32,
    held_ms: u32,
    last: Option<DriveCommand>,
}

impl Drive for Odometer {
    fn apply(&mut self, command: DriveCommand) {
        if command.left.direction != command.right.direction {
            self.pivots += 1;
        }
        self.last = Some(command);
    }

    async fn hold(&mut self, duration_ms: u32) {
        self.held_ms += duration_ms;
    }
}

/// Run until the goal, learning a wall whenever the planned side is blocked
/// in `maze`. Returns the number of cells moved.
fn explore(maze: &Grid, nav: &mut Navigator, exec: &mut TurnExecutor<Odometer>) -> u32 {
    let mut moves = 0;
    for _ in 0..200 {
        while let Some(dir) = nav.next_direction() {
            if !maze.has_wall(nav.position(), dir) {
                break;
            }
            nav.record_wall(dir);
        }

        match block_on(nav.step(exec)) {
            Step::Moved { from, to, heading } => {
                assert!(!maze.has_wall(from, heading), "drove through a wall at {:?}", from);
                assert!(to.is_valid());
                moves += 1;
            }
            Step::Arrived => return moves,
            Step::Stuck => panic!("stuck at {:?}", nav.position()),
        }
    }
    panic!("did not reach the goal");
}

fn serpentine() -> Grid {
    let mut maze = Grid::new();
    for col in 1..=3 {
        maze.set_wall(Position::new(1, col), Heading::South);
        maze.set_wall(Position::new(3, col), Heading::South);
    }
    for col in 2..=4 {
        maze.set_wall(Position::new(2, col), Heading::South);
    }
    maze
}

#[test]
fn open_maze_takes_the_manhattan_route() {
    let maze = Grid::new();
    let mut nav = Navigator::default();
    let mut exec = TurnExecutor::new(Odometer::default(), DriveConfig::default());

    let moves = explore(&maze, &mut nav, &mut exec);
    assert_eq!(moves, 6);
    assert_eq!(nav.position(), GOAL);
    // Brakes on arrival.
    assert_eq!(exec.drive().last, Some(DriveCommand::brake()));
}

#[test]
fn serpentine_maze_is_discovered_and_solved() {
    let maze = serpentine();
    let mut nav = Navigator::new(START, Heading::North);
    let mut exec = TurnExecutor::new(Odometer::default(), DriveConfig::default());

    let moves = explore(&maze, &mut nav, &mut exec);
    assert!(nav.is_at_goal());
    // Cannot beat the true shortest path.
    assert!(moves >= maze.weight(START) as u32);
    assert!(nav.grid().wall_count() > 0);
    assert!(exec.drive().pivots > 0);
    assert!(exec.drive().held_ms >= 500);

    // With the full map known up front, the run is exactly the shortest path.
    let mut speed_run = Navigator::with_grid(maze.clone(), START, Heading::North);
    let mut exec = TurnExecutor::new(Odometer::default(), DriveConfig::default());
    assert_eq!(explore(&maze, &mut speed_run, &mut exec), 12);
}

#[test]
fn corridor_around_the_goal() {
    // Only way into (1,1) is from (2,1); (1,2) is sealed off.
    let mut maze = Grid::new();
    maze.set_wall(Position::new(1, 1), Heading::East);
    maze.set_wall(Position::new(1, 2), Heading::East);
    maze.set_wall(Position::new(1, 2), Heading::South);

    let mut nav = Navigator::new(Position::new(1, 4), Heading::West);
    let mut exec = TurnExecutor::new(Odometer::default(), DriveConfig::default());
    explore(&maze, &mut nav, &mut exec);
    assert!(nav.is_at_goal());
    assert!(nav.grid().has_wall(Position::new(1, 3), Heading::West));
}

#[test]
fn walls_met_while_crossing_land_on_the_start_cell() {
    let maze = serpentine();
    let mut nav = Navigator::default();
    let mut exec = TurnExecutor::new(Odometer::default(), DriveConfig::default());

    // Turn first, then find out whether the cell ahead can be reached.
    for _ in 0..200 {
        match block_on(nav.face_next(&mut exec)) {
            Step::Moved { from, heading, .. } => {
                if maze.has_wall(from, heading) {
                    nav.wall_ahead();
                    assert_eq!(nav.position(), from);
                } else {
                    nav.advance();
                }
            }
            Step::Arrived => break,
            Step::Stuck => panic!("stuck at {:?}", nav.position()),
        }
    }
    assert!(nav.is_at_goal());

    // Every learned wall exists in the real maze.
    for pos in Grid::positions() {
        for side in Heading::ALL {
            if nav.grid().has_wall(pos, side) {
                assert!(maze.has_wall(pos, side), "phantom wall at {:?} {:?}", pos, side);
            }
        }
    }
}
