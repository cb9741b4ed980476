//! Next-heading selection from the current cell.

use crate::grid::{Grid, Position};
use crate::heading::Heading;

/// Scan order for candidate headings. Ties resolve to the earliest entry,
/// which favours the goal corner at (1,1). A different goal needs a
/// different order.
pub const PREFERENCE: [Heading; 4] = [Heading::West, Heading::North, Heading::South, Heading::East];

/// Open heading towards the lowest-weight neighbor of `pos`, or `None` when
/// every side is walled or leads out of the maze.
pub fn plan(grid: &Grid, pos: Position) -> Option<Heading> {
    let mut best: Option<(Heading, u8)> = None;

    for dir in PREFERENCE {
        if grid.has_wall(pos, dir) {
            continue;
        }
        let next = pos.neighbor(dir);
        if !next.is_valid() {
            continue;
        }
        let weight = grid.weight(next);
        match best {
            Some((_, lowest)) if weight >= lowest => {}
            _ => best = Some((dir, weight)),
        }
    }

    let (dir, _) = best?;
    if pos.neighbor(dir).is_valid() {
        return Some(dir);
    }

    // Only reachable if the grid accessors disagree with each other.
    PREFERENCE.into_iter().find(|&d| grid.is_open(pos, d))
}

/// [`plan`] with the stuck case folded into [`Heading::North`].
///
/// Callers that need to tell "go north" from "boxed in" should use [`plan`].
pub fn best_direction(grid: &Grid, pos: Position) -> Heading {
    plan(grid, pos).unwrap_or(Heading::North)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_prefers_west_on_ties() {
        let grid = Grid::new();
        // (3,4) and (4,3) both weigh 5.
        assert_eq!(best_direction(&grid, Position::new(4, 4)), Heading::West);
        assert_eq!(best_direction(&grid, Position::new(1, 4)), Heading::West);
        assert_eq!(best_direction(&grid, Position::new(4, 1)), Heading::North);
    }

    #[test]
    fn wall_pushes_to_next_preference() {
        let mut grid = Grid::new();
        grid.set_wall(Position::new(4, 4), Heading::West);
        assert_eq!(plan(&grid, Position::new(4, 4)), Some(Heading::North));
    }

    #[test]
    fn lower_weight_beats_preference() {
        let mut grid = Grid::new();
        // Close (1,2)->(1,1): from (2,2) west now leads to weight 1 while
        // north leads to weight 3.
        grid.set_wall(Position::new(1, 1), Heading::East);
        assert_eq!(plan(&grid, Position::new(2, 2)), Some(Heading::West));
        // From (1,2) south is now cheaper than east.
        assert_eq!(plan(&grid, Position::new(1, 2)), Some(Heading::South));
    }

    #[test]
    fn corner_with_two_walls_is_stuck() {
        let mut grid = Grid::new();
        // East and south of (4,4) are off the board.
        grid.set_wall(Position::new(4, 4), Heading::West);
        grid.set_wall(Position::new(4, 4), Heading::North);
        assert_eq!(plan(&grid, Position::new(4, 4)), None);
        assert_eq!(best_direction(&grid, Position::new(4, 4)), Heading::North);
    }

    #[test]
    fn goal_neighbors_point_home() {
        let grid = Grid::new();
        assert_eq!(plan(&grid, Position::new(1, 2)), Some(Heading::West));
        assert_eq!(plan(&grid, Position::new(2, 1)), Some(Heading::North));
    }

    #[test]
    fn outside_the_maze_is_stuck() {
        let grid = Grid::new();
        assert_eq!(plan(&grid, Position::new(0, 0)), None);
        assert_eq!(best_direction(&grid, Position::new(9, 9)), Heading::North);
    }
}
