// Static grid geometry

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::types::{Direction, Position};

/// Fixed rectangular board
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    rows: i32,
    cols: i32,
}

impl Board {
    /// Creates a board, rejecting empty dimensions
    pub fn new(rows: i32, cols: i32) -> Result<Self, PlanError> {
        if rows <= 0 || cols <= 0 {
            return Err(PlanError::InvalidBoard { rows, cols });
        }
        Ok(Board { rows, cols })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn total_cells(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Checks if a position lies on the board
    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    /// In-bounds neighbours of a cell, in the fixed exploration order
    pub fn neighbors(&self, pos: &Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        let origin = *pos;
        Direction::all()
            .into_iter()
            .map(move |dir| (dir, dir.apply(&origin)))
            .filter(move |(_, next)| self.in_bounds(next))
    }

    /// Every cell, row-major
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position { row, col }))
    }
}
