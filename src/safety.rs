// Flood-fill reachability used to reject moves that box the snake in

use std::collections::{HashSet, VecDeque};

use crate::board::Board;
use crate::simple_profiler::ProfileGuard;
use crate::types::Position;

/// Reachable free cells are never required beyond this many when the board is large enough
pub const DEFAULT_MIN_REACHABLE_CELLS: usize = 5;

/// Counts the free cells reachable from the head of `body`
///
/// Body segments are walls. The head cell itself is not counted, which keeps the
/// count within the free cells and the ratio within [0, 1].
pub fn reachable_cells(board: &Board, body: &[Position]) -> usize {
    let _guard = ProfileGuard::new("flood_fill");

    let head = match body.first() {
        Some(head) => *head,
        None => return 0,
    };
    let walls: HashSet<Position> = body.iter().copied().collect();

    let mut visited = HashSet::new();
    visited.insert(head);
    let mut queue = VecDeque::new();
    queue.push_back(head);

    while let Some(current) = queue.pop_front() {
        for (_, next) in board.neighbors(&current) {
            if walls.contains(&next) || visited.contains(&next) {
                continue;
            }
            visited.insert(next);
            queue.push_back(next);
        }
    }

    visited.len() - 1
}

/// Free cells on the board, at least one so ratios never divide by zero
fn free_cells(board: &Board, body: &[Position]) -> usize {
    board.total_cells().saturating_sub(body.len()).max(1)
}

/// Share of `reachable` in the free board left by `body`, in [0, 1]
fn ratio_of(board: &Board, body: &[Position], reachable: usize) -> f64 {
    (reachable as f64 / free_cells(board, body) as f64).clamp(0.0, 1.0)
}

/// Share of the free board reachable from the head, in [0, 1]
pub fn reachable_ratio(board: &Board, body: &[Position]) -> f64 {
    ratio_of(board, body, reachable_cells(board, body))
}

/// Number of reachable cells a body needs to count as safe
///
/// The fractional requirement is raised to `min_cells`, then capped at the free
/// cells actually left so a nearly full board can still pass.
pub fn required_cells(
    board: &Board,
    body: &[Position],
    threshold: f64,
    min_cells: usize,
) -> usize {
    let free = board.total_cells().saturating_sub(body.len());
    let fractional = (free as f64 * threshold).floor() as usize;
    fractional.max(min_cells).min(free)
}

/// One flood fill's worth of safety data for a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceCheck {
    pub reachable: usize,
    pub required: usize,
    pub ratio: f64,
}

impl SpaceCheck {
    pub fn new(board: &Board, body: &[Position], threshold: f64, min_cells: usize) -> Self {
        let reachable = reachable_cells(board, body);
        SpaceCheck {
            reachable,
            required: required_cells(board, body, threshold, min_cells),
            ratio: ratio_of(board, body, reachable),
        }
    }

    pub fn is_safe(&self) -> bool {
        self.reachable >= self.required
    }
}

/// True when enough of the free board stays reachable from the head of `body`
///
/// The head is not part of the reachable count, so a body needs one more open
/// cell than a count that includes the head would ask for.
pub fn has_safe_space(
    board: &Board,
    body: &[Position],
    threshold: f64,
    min_cells: usize,
) -> bool {
    SpaceCheck::new(board, body, threshold, min_cells).is_safe()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_open_board_is_fully_reachable() {
        let board = Board::new(5, 5).unwrap();
        let body = vec![p(2, 2), p(2, 1), p(2, 0)];
        assert_eq!(reachable_cells(&board, &body), 22);
        assert_eq!(reachable_ratio(&board, &body), 1.0);
        assert!(has_safe_space(&board, &body, 0.9, DEFAULT_MIN_REACHABLE_CELLS));
    }

    #[test]
    fn test_sealed_pocket() {
        // Head in the top-left corner, walled off by its own body
        let board = Board::new(4, 4).unwrap();
        let body = vec![p(0, 0), p(0, 1), p(1, 1), p(1, 0)];
        assert_eq!(reachable_cells(&board, &body), 0);
        assert_eq!(reachable_ratio(&board, &body), 0.0);
        assert!(!has_safe_space(&board, &body, 0.1, DEFAULT_MIN_REACHABLE_CELLS));
    }

    #[test]
    fn test_partial_region() {
        // Column 1 is a wall of body, head on the left side with 3 free cells
        let board = Board::new(4, 4).unwrap();
        let body = vec![p(0, 0), p(0, 1), p(1, 1), p(2, 1), p(3, 1)];
        assert_eq!(reachable_cells(&board, &body), 3);
        let ratio = reachable_ratio(&board, &body);
        assert!((ratio - 3.0 / 11.0).abs() < 1e-9);
        assert!(!has_safe_space(&board, &body, 0.5, DEFAULT_MIN_REACHABLE_CELLS));
    }

    #[test]
    fn test_full_board_ratio_is_zero() {
        let board = Board::new(2, 2).unwrap();
        let body = vec![p(0, 0), p(0, 1), p(1, 1), p(1, 0)];
        assert_eq!(reachable_ratio(&board, &body), 0.0);
        // Nothing left to reach, nothing required
        assert_eq!(required_cells(&board, &body, 0.9, 5), 0);
    }

    #[test]
    fn test_minimum_is_capped_by_free_cells() {
        let board = Board::new(2, 3).unwrap();
        let body = vec![p(0, 0), p(0, 1)];
        // Four free cells, all reachable; the 5-cell floor must not reject it
        assert_eq!(required_cells(&board, &body, 0.5, 5), 4);
        assert!(has_safe_space(&board, &body, 0.5, 5));
    }

    #[test]
    fn test_floor_applies_on_large_boards() {
        let board = Board::new(15, 17).unwrap();
        let body = vec![p(7, 4), p(7, 3), p(7, 2), p(7, 1)];
        assert_eq!(required_cells(&board, &body, 0.0, 5), 5);
        assert_eq!(required_cells(&board, &body, 0.5, 5), 125);
    }

    #[test]
    fn test_head_does_not_count_toward_required_cells() {
        // Column 1 walls the head in with three free cells
        let board = Board::new(4, 4).unwrap();
        let body = vec![p(0, 0), p(0, 1), p(1, 1), p(2, 1), p(3, 1)];
        assert!(has_safe_space(&board, &body, 0.0, 3));
        // Counting the head would make four and pass
        assert!(!has_safe_space(&board, &body, 0.0, 4));
    }

    #[test]
    fn test_space_check_matches_separate_calls() {
        let board = Board::new(4, 4).unwrap();
        let body = vec![p(0, 0), p(0, 1), p(1, 1), p(2, 1), p(3, 1)];
        let check = SpaceCheck::new(&board, &body, 0.5, DEFAULT_MIN_REACHABLE_CELLS);
        assert_eq!(check.reachable, reachable_cells(&board, &body));
        assert_eq!(check.required, 5);
        assert_eq!(check.ratio, reachable_ratio(&board, &body));
        assert!(!check.is_safe());
    }
}
