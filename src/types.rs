// Core value types shared by the planner, the simulator and the service layer
// Rows grow downward and columns grow to the right, matching the on-screen board.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Calculates Manhattan distance between two positions
    pub fn manhattan(&self, other: &Position) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Represents the four possible movement directions for the snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions in the fixed exploration order used by every search
    pub fn all() -> [Direction; 4] {
        [Direction::Down, Direction::Right, Direction::Up, Direction::Left]
    }

    /// Converts direction to string representation for API responses and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses the lowercase or mixed-case name of a direction
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Unit (row, col) delta of this direction
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Inverse of `delta`; used to rebuild move sequences from parent pointers
    pub const fn from_delta(d_row: i32, d_col: i32) -> Option<Direction> {
        match (d_row, d_col) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Direction of a single step from `from` to `to`, if they are adjacent
    pub fn between(from: &Position, to: &Position) -> Option<Direction> {
        Direction::from_delta(to.row - from.row, to.col - from.col)
    }

    /// Calculates the next position when moving in this direction
    pub fn apply(&self, pos: &Position) -> Position {
        let (d_row, d_col) = self.delta();
        Position {
            row: pos.row + d_row,
            col: pos.col + d_col,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to the authoritative body of a snake
///
/// The container owning the body lives outside the planner; a planning call only needs
/// the head and an ordered head-to-tail snapshot that stays fixed for the call.
pub trait BodyState {
    /// `None` for an empty body
    fn head(&self) -> Option<Position>;

    fn segments(&self) -> Vec<Position>;
}

impl BodyState for Vec<Position> {
    fn head(&self) -> Option<Position> {
        self.first().copied()
    }

    fn segments(&self) -> Vec<Position> {
        self.clone()
    }
}
