// Forward simulation of a move sequence on a private body snapshot

use std::collections::VecDeque;

use crate::simple_profiler::ProfileGuard;
use crate::types::{Direction, Position};

/// Applies `path` to a copy of `body` and returns the resulting body
///
/// Each move pushes a new head. The tail is dropped on every step except one that
/// lands on `target` while `grows_on_arrival` is set; that step lengthens the body
/// by one, mirroring the game eating an apple.
pub fn simulate(
    body: &[Position],
    path: &[Direction],
    target: Position,
    grows_on_arrival: bool,
) -> Vec<Position> {
    let _guard = ProfileGuard::new("simulate");

    let mut snapshot: VecDeque<Position> = body.iter().copied().collect();

    for dir in path {
        let head = match snapshot.front() {
            Some(head) => *head,
            None => break,
        };
        let new_head = dir.apply(&head);
        snapshot.push_front(new_head);

        if !(grows_on_arrival && new_head == target) {
            snapshot.pop_back();
        }
    }

    snapshot.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_plain_moves_keep_length() {
        let body = vec![p(2, 2), p(2, 1), p(2, 0)];
        let after = simulate(&body, &[Direction::Up, Direction::Right], p(4, 4), true);
        assert_eq!(after, vec![p(1, 3), p(1, 2), p(2, 2)]);
    }

    #[test]
    fn test_landing_on_target_grows() {
        let body = vec![p(2, 2), p(2, 1), p(2, 0)];
        let after = simulate(&body, &[Direction::Right, Direction::Right], p(2, 4), true);
        assert_eq!(after, vec![p(2, 4), p(2, 3), p(2, 2), p(2, 1)]);
    }

    #[test]
    fn test_growth_disabled_keeps_length() {
        let body = vec![p(2, 2), p(2, 1), p(2, 0)];
        let after = simulate(&body, &[Direction::Right, Direction::Right], p(2, 4), false);
        assert_eq!(after.len(), body.len());
        assert_eq!(after[0], p(2, 4));
    }

    #[test]
    fn test_growth_happens_on_arrival_step_only() {
        let body = vec![p(0, 0), p(0, 1)];
        // Passes over the target on the first step, then keeps moving
        let after = simulate(
            &body,
            &[Direction::Down, Direction::Down, Direction::Right],
            p(1, 0),
            true,
        );
        assert_eq!(after, vec![p(2, 1), p(2, 0), p(1, 0)]);
    }

    #[test]
    fn test_empty_path_returns_copy() {
        let body = vec![p(3, 3), p(3, 4)];
        assert_eq!(simulate(&body, &[], p(0, 0), true), body);
    }
}
