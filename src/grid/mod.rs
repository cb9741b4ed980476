//! Maze grid: one weight and four wall flags per cell.
//!
//! Cells live in a flat row-major array and every read or write goes through
//! [`Grid::index`], so the "outside the maze" policy is decided in one place:
//! out-of-range cells weigh [`WEIGHT_MAX`] and are walled on every side.

mod flood_fill;

pub use flood_fill::FloodReport;

use crate::config::{CELL_COUNT, GOAL, MAZE_SIZE, WEIGHT_MAX};
use crate::heading::Heading;

/// 1-indexed (row, column) cell address.
///
/// Row 1 is the northern edge, column 1 the western edge. Positions are not
/// validated on construction; [`Position::neighbor`] wraps, so stepping off
/// row 1 or column 1 lands on 0 or 255, both outside the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True when both coordinates are in `1..=MAZE_SIZE`.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.row >= 1 && self.row <= MAZE_SIZE && self.col >= 1 && self.col <= MAZE_SIZE
    }

    /// Adjacent address in `dir`. May be out of range.
    pub const fn neighbor(self, dir: Heading) -> Self {
        match dir {
            Heading::North => Self::new(self.row.wrapping_sub(1), self.col),
            Heading::East => Self::new(self.row, self.col.wrapping_add(1)),
            Heading::South => Self::new(self.row.wrapping_add(1), self.col),
            Heading::West => Self::new(self.row, self.col.wrapping_sub(1)),
        }
    }

    pub const fn manhattan(self, other: Position) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Wall flags of one cell, one bit per [`Heading`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Walls(u8);

impl Walls {
    pub const NONE: Walls = Walls(0);

    #[inline]
    pub const fn contains(self, dir: Heading) -> bool {
        self.0 & (1 << dir as u8) != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: Heading) {
        self.0 |= 1 << dir as u8;
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    /// Estimated distance to the goal, [`WEIGHT_MAX`] when unreachable.
    pub weight: u8,
    pub walls: Walls,
}

/// The maze as the robot currently knows it.
///
/// Created open (no walls, Manhattan weights). Walls are only ever added,
/// through [`Grid::set_wall`], which also re-runs the flood fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        let mut grid = Self {
            cells: [Cell {
                weight: WEIGHT_MAX,
                walls: Walls::NONE,
            }; CELL_COUNT],
        };
        grid.reset();
        grid
    }

    /// Forget every wall and restore Manhattan weights.
    pub fn reset(&mut self) {
        for pos in Self::positions() {
            if let Some(i) = Self::index(pos) {
                self.cells[i] = Cell {
                    weight: pos.manhattan(GOAL),
                    walls: Walls::NONE,
                };
            }
        }
        if let Some(i) = Self::index(GOAL) {
            self.cells[i].weight = 0;
        }
    }

    #[inline]
    pub const fn goal(&self) -> Position {
        GOAL
    }

    /// Arena slot for `pos`, `None` outside the maze.
    #[inline]
    pub const fn index(pos: Position) -> Option<usize> {
        if pos.is_valid() {
            Some((pos.row as usize - 1) * MAZE_SIZE as usize + (pos.col as usize - 1))
        } else {
            None
        }
    }

    /// Every valid position in row-major order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (1..=MAZE_SIZE).flat_map(|row| (1..=MAZE_SIZE).map(move |col| Position::new(row, col)))
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        Self::index(pos).map(|i| &self.cells[i])
    }

    /// Weight of `pos`, [`WEIGHT_MAX`] outside the maze.
    pub fn weight(&self, pos: Position) -> u8 {
        self.cell(pos).map_or(WEIGHT_MAX, |c| c.weight)
    }

    /// Whether a wall blocks leaving `pos` towards `dir`. Always true outside
    /// the maze.
    pub fn has_wall(&self, pos: Position, dir: Heading) -> bool {
        self.cell(pos).is_none_or(|c| c.walls.contains(dir))
    }

    /// Whether the robot can move from `pos` to its neighbor in `dir`.
    pub fn is_open(&self, pos: Position, dir: Heading) -> bool {
        !self.has_wall(pos, dir) && pos.neighbor(dir).is_valid()
    }

    /// Record a wall on the `dir` side of `pos` and on the facing side of the
    /// neighbor, then recompute weights.
    ///
    /// Returns `None` without touching anything when `pos` is outside the
    /// maze.
    pub fn set_wall(&mut self, pos: Position, dir: Heading) -> Option<FloodReport> {
        let i = Self::index(pos)?;
        self.cells[i].walls.insert(dir);

        if let Some(j) = Self::index(pos.neighbor(dir)) {
            self.cells[j].walls.insert(dir.opposite());
        }

        Some(self.recompute_weights())
    }

    /// Total number of wall flags set across all cells.
    pub fn wall_count(&self) -> u32 {
        self.cells.iter().map(|c| c.walls.count()).sum()
    }
}
