// Time-indexed occupancy of the snake's own body
//
// The tail retracts one cell per move, so the set of cells the body still covers
// depends on how many steps into the future a search node is. Everything here is a
// pure function of (body, depth); nothing caches or mutates shared state.

use std::collections::{HashMap, HashSet};

use crate::board::Board;
use crate::types::{Direction, Position};

/// Number of leading body segments still in place `depth` moves from now
///
/// Never drops below one: the head's origin cell stays a hazard because the
/// search frontier is built from it.
pub fn blocked_len(body_len: usize, depth: usize) -> usize {
    if depth + 1 < body_len {
        body_len - depth
    } else {
        1
    }
}

/// Cells still occupied by the body `depth` moves into the future
pub fn blocked_at(body: &[Position], depth: usize) -> HashSet<Position> {
    if body.is_empty() {
        return HashSet::new();
    }
    body[..blocked_len(body.len(), depth)].iter().copied().collect()
}

/// Membership test equivalent to `blocked_at(body, depth).contains(pos)` without building the set
pub fn is_blocked(pos: &Position, body: &[Position], depth: usize) -> bool {
    if body.is_empty() {
        return false;
    }
    body[..blocked_len(body.len(), depth)].contains(pos)
}

/// True if `pos` is one step away from any segment except the head
pub fn is_adjacent_to_body(pos: &Position, body: &[Position]) -> bool {
    body.iter().skip(1).any(|segment| {
        Direction::all()
            .iter()
            .any(|dir| dir.apply(segment) == *pos)
    })
}

/// In bounds, not covered by the body at `depth`, and not yet visited by the running search
pub fn is_valid_move<V>(
    board: &Board,
    pos: &Position,
    body: &[Position],
    depth: usize,
    visited: &HashMap<Position, V>,
) -> bool {
    board.in_bounds(pos) && !is_blocked(pos, body, depth) && !visited.contains_key(pos)
}
