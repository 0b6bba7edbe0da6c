//! Precondition errors raised by the planner

use thiserror::Error;

use crate::types::Position;

/// Malformed planning input; these are caller bugs, not search outcomes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("board must have at least one row and one column (got {rows}x{cols})")]
    InvalidBoard { rows: i32, cols: i32 },

    #[error("snake body must contain at least the head")]
    EmptyBody,

    #[error("target {0} lies outside the board")]
    TargetOutOfBounds(Position),

    #[error("body segment {index} at {position} lies outside the board")]
    BodyOutOfBounds { index: usize, position: Position },
}
