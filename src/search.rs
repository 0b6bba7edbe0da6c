// Path search over the time-indexed occupancy model
//
// Four interchangeable strategies share one discipline: explore outward from the head,
// remember the first parent recorded for each cell, and rebuild the move list by
// walking parents back from the target. The depth of the cell being expanded picks
// which body segments are still in the way.

use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use crate::board::Board;
use crate::occupancy::{is_adjacent_to_body, is_valid_move};
use crate::simple_profiler::ProfileGuard;
use crate::types::{Direction, Position};

/// Weight applied to the negated distance in stall mode when none is configured
pub const DEFAULT_STALL_WEIGHT: i64 = 2;

/// The fixed set of search strategies the planner can run
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// FIFO breadth-first search, shortest move count
    BreadthFirst,
    /// Breadth-first search that enqueues body-adjacent cells first
    BodyHugging,
    /// Best-first search on steps + Manhattan distance to the target
    Seek,
    /// Best-first search on steps - Manhattan distance to the target, prefers detours
    Stall,
}

/// Result of a single search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The head already sits on the target; zero moves needed
    AtTarget,
    /// A non-empty move sequence from head to target
    Found(Vec<Direction>),
    /// The frontier ran dry before the target was reached
    Unreachable,
}

impl SearchOutcome {
    pub fn moves(&self) -> &[Direction] {
        match self {
            SearchOutcome::Found(moves) => moves,
            _ => &[],
        }
    }

    /// Number of moves; zero for both `AtTarget` and `Unreachable`
    pub fn len(&self) -> usize {
        self.moves().len()
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

impl SearchStrategy {
    /// Every strategy, in the order the planner runs them
    pub fn all() -> [SearchStrategy; 4] {
        [
            SearchStrategy::BreadthFirst,
            SearchStrategy::BodyHugging,
            SearchStrategy::Seek,
            SearchStrategy::Stall,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::BreadthFirst => "breadth_first",
            SearchStrategy::BodyHugging => "body_hugging",
            SearchStrategy::Seek => "seek",
            SearchStrategy::Stall => "stall",
        }
    }

    /// Tie-break rank when two candidates score the same; lower wins
    pub fn priority(&self) -> u8 {
        match self {
            SearchStrategy::BreadthFirst => 0,
            SearchStrategy::Seek => 1,
            SearchStrategy::BodyHugging => 2,
            SearchStrategy::Stall => 3,
        }
    }

    /// Runs this strategy from the head of `body` to `target`
    ///
    /// Stall mode uses the default heuristic weight; see [`SearchStrategy::find_path_weighted`].
    pub fn find_path(&self, board: &Board, body: &[Position], target: Position) -> SearchOutcome {
        self.find_path_weighted(board, body, target, DEFAULT_STALL_WEIGHT)
    }

    /// Runs this strategy with an explicit stall-mode heuristic weight
    ///
    /// # Arguments
    /// * `board` - Board geometry
    /// * `body` - Snake body, head first; an empty body is never routed
    /// * `target` - Cell to reach
    /// * `stall_weight` - Multiplier on the negated distance, only read by `Stall`
    pub fn find_path_weighted(
        &self,
        board: &Board,
        body: &[Position],
        target: Position,
        stall_weight: i64,
    ) -> SearchOutcome {
        let _guard = ProfileGuard::new(self.as_str());

        let head = match body.first() {
            Some(head) => *head,
            None => return SearchOutcome::Unreachable,
        };
        if head == target {
            return SearchOutcome::AtTarget;
        }

        let outcome = match self {
            SearchStrategy::BreadthFirst => breadth_first(board, body, target, false),
            SearchStrategy::BodyHugging => breadth_first(board, body, target, true),
            SearchStrategy::Seek => seek(board, body, target),
            SearchStrategy::Stall => stall(board, body, target, stall_weight),
        };

        debug!(
            "{} search to {}: {} moves",
            self.as_str(),
            target,
            outcome.len()
        );
        outcome
    }
}

/// Walks parent pointers from `target` back to `head` and returns the moves in travel order
fn reconstruct(
    parents: &HashMap<Position, Position>,
    head: Position,
    target: Position,
) -> Vec<Direction> {
    let mut moves = Vec::new();
    let mut current = target;

    while current != head {
        let parent = match parents.get(&current) {
            Some(parent) => *parent,
            None => break,
        };
        if let Some(dir) = Direction::between(&parent, &current) {
            moves.push(dir);
        }
        current = parent;
    }

    moves.reverse();
    moves
}

/// Plain and body-hugging breadth-first search
fn breadth_first(
    board: &Board,
    body: &[Position],
    target: Position,
    hug_body: bool,
) -> SearchOutcome {
    let head = body[0];
    let mut parents: HashMap<Position, Position> = HashMap::new();
    parents.insert(head, head);

    let mut queue = VecDeque::new();
    queue.push_back((head, 0usize));

    while let Some((current, depth)) = queue.pop_front() {
        if current == target {
            return SearchOutcome::Found(reconstruct(&parents, head, target));
        }

        let mut hugging = Vec::with_capacity(4);
        let mut open = Vec::with_capacity(4);

        for (_, next) in board.neighbors(&current) {
            if !is_valid_move(board, &next, body, depth, &parents) {
                continue;
            }
            if hug_body && is_adjacent_to_body(&next, body) {
                hugging.push(next);
            } else {
                open.push(next);
            }
        }

        for next in hugging.into_iter().chain(open) {
            parents.insert(next, current);
            queue.push_back((next, depth + 1));
        }
    }

    SearchOutcome::Unreachable
}

/// Informed search toward `target`; cells settle when popped so the result is a shortest path
fn seek(board: &Board, body: &[Position], target: Position) -> SearchOutcome {
    let head = body[0];
    let mut best_depth: HashMap<Position, usize> = HashMap::new();
    let mut settled: HashMap<Position, usize> = HashMap::new();
    let mut parents: HashMap<Position, Position> = HashMap::new();
    let mut open = BinaryHeap::new();
    let mut sequence: u64 = 0;

    best_depth.insert(head, 0);
    open.push(Reverse((head.manhattan(&target) as i64, sequence, 0usize, head)));

    while let Some(Reverse((_, _, depth, current))) = open.pop() {
        if settled.contains_key(&current) {
            continue;
        }
        if best_depth.get(&current).map_or(false, |&best| depth > best) {
            continue;
        }
        settled.insert(current, depth);

        if current == target {
            return SearchOutcome::Found(reconstruct(&parents, head, target));
        }

        for (_, next) in board.neighbors(&current) {
            if !is_valid_move(board, &next, body, depth, &settled) {
                continue;
            }
            let next_depth = depth + 1;
            if best_depth.get(&next).map_or(true, |&best| next_depth < best) {
                best_depth.insert(next, next_depth);
                parents.insert(next, current);
                sequence += 1;
                let priority = next_depth as i64 + next.manhattan(&target) as i64;
                open.push(Reverse((priority, sequence, next_depth, next)));
            }
        }
    }

    SearchOutcome::Unreachable
}

/// Informed search with the distance term negated
///
/// A cell keeps the parent that discovered it first. Cells that lead away from the
/// target are expanded first, so the frontier wraps around and claims the cells
/// near the target through a longer route.
fn stall(board: &Board, body: &[Position], target: Position, weight: i64) -> SearchOutcome {
    let head = body[0];
    let mut parents: HashMap<Position, Position> = HashMap::new();
    let mut open = BinaryHeap::new();
    let mut sequence: u64 = 0;

    parents.insert(head, head);
    open.push(Reverse((
        -weight * head.manhattan(&target) as i64,
        sequence,
        0usize,
        head,
    )));

    while let Some(Reverse((_, _, depth, current))) = open.pop() {
        if current == target {
            return SearchOutcome::Found(reconstruct(&parents, head, target));
        }

        for (_, next) in board.neighbors(&current) {
            if !is_valid_move(board, &next, body, depth, &parents) {
                continue;
            }
            parents.insert(next, current);
            sequence += 1;
            let next_depth = depth + 1;
            let priority = next_depth as i64 - weight * next.manhattan(&target) as i64;
            open.push(Reverse((priority, sequence, next_depth, next)));
        }
    }

    SearchOutcome::Unreachable
}
