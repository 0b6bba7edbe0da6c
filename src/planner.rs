// Move planner
//
// One planning call runs every search strategy against the target, replays each
// result on a copy of the body, keeps the results that leave enough of the board
// reachable, and picks the best of those. When nothing qualifies it falls back to
// chasing its own tail, then to any single free neighbour, and finally reports that
// no safe move exists.

use log::{debug, info};
use serde::Serialize;

use crate::board::Board;
use crate::config::Config;
use crate::error::PlanError;
use crate::safety::SpaceCheck;
use crate::search::{SearchOutcome, SearchStrategy};
use crate::simulator::simulate;
use crate::types::{BodyState, Direction, Position};

/// How a plan was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The head already covers the target
    AtTarget,
    /// A search strategy cleared the safety threshold
    Strategy(SearchStrategy),
    /// No safe route to the target; following the tail instead
    TailChase,
    /// Only a single free neighbour was available
    SingleStep,
    /// Every option is exhausted; the caller decides what to do
    NoSafeMove,
}

impl PlanOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanOutcome::AtTarget => "at_target",
            PlanOutcome::Strategy(strategy) => strategy.as_str(),
            PlanOutcome::TailChase => "tail_chase",
            PlanOutcome::SingleStep => "single_step",
            PlanOutcome::NoSafeMove => "no_safe_move",
        }
    }
}

impl Serialize for PlanOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A search result that passed the safety check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub strategy: SearchStrategy,
    pub moves: Vec<Direction>,
    pub safety_ratio: f64,
    pub score: f64,
}

impl Candidate {
    pub fn len(&self) -> usize {
        self.moves.len()
    }
}

/// Output of one planning call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub moves: Vec<Direction>,
    pub outcome: PlanOutcome,
    /// Every candidate that cleared its threshold, scored
    pub candidates: Vec<Candidate>,
}

impl Plan {
    fn fallback(moves: Vec<Direction>, outcome: PlanOutcome) -> Self {
        Plan {
            moves,
            outcome,
            candidates: Vec::new(),
        }
    }

    /// True when the caller has no move to make
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Path planner bound to one board and one configuration
#[derive(Debug, Clone)]
pub struct Planner {
    config: Config,
    board: Board,
}

impl Planner {
    /// Creates a planner for the board described in `config`
    pub fn new(config: Config) -> Result<Self, PlanError> {
        let board = Board::new(config.board.rows, config.board.columns)?;
        Ok(Planner { config, board })
    }

    /// Creates a planner for an explicit board, ignoring the configured dimensions
    pub fn with_board(config: Config, board: Board) -> Self {
        Planner { config, board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Plans moves for the body held by an external body-state provider
    pub fn plan_for<S: BodyState>(&self, target: Position, snake: &S) -> Result<Plan, PlanError> {
        self.plan(target, &snake.segments())
    }

    /// Computes the move sequence toward `target`
    ///
    /// # Arguments
    /// * `target` - Cell to reach, usually the apple
    /// * `body` - Current body, head first
    ///
    /// # Returns
    /// * `Ok(Plan)` - Moves plus how they were chosen; empty moves mean no safe move
    /// * `Err(PlanError)` - Empty body or positions off the board
    pub fn plan(&self, target: Position, body: &[Position]) -> Result<Plan, PlanError> {
        self.check_input(target, body)?;

        let head = body[0];
        if head == target {
            return Ok(Plan::fallback(Vec::new(), PlanOutcome::AtTarget));
        }

        let candidates = self.collect_candidates(target, body);

        let chosen = self.select(&candidates).map(|best| {
            debug!(
                "Planned {} moves to {} via {} (safety {:.2}, {} candidates)",
                best.len(),
                target,
                best.strategy.as_str(),
                best.safety_ratio,
                candidates.len()
            );
            (best.moves.clone(), best.strategy)
        });

        if let Some((moves, strategy)) = chosen {
            return Ok(Plan {
                moves,
                outcome: PlanOutcome::Strategy(strategy),
                candidates,
            });
        }

        Ok(self.fall_back(body))
    }

    /// Rejects malformed input before any search runs
    fn check_input(&self, target: Position, body: &[Position]) -> Result<(), PlanError> {
        if body.is_empty() {
            return Err(PlanError::EmptyBody);
        }
        if !self.board.in_bounds(&target) {
            return Err(PlanError::TargetOutOfBounds(target));
        }
        if let Some((index, position)) = body
            .iter()
            .enumerate()
            .find(|(_, pos)| !self.board.in_bounds(pos))
        {
            return Err(PlanError::BodyOutOfBounds {
                index,
                position: *position,
            });
        }
        Ok(())
    }

    /// Share of the board the body covers
    pub fn fill_ratio(&self, body: &[Position]) -> f64 {
        body.len() as f64 / self.board.total_cells() as f64
    }

    /// Runs every applicable strategy and keeps the results that clear their threshold
    fn collect_candidates(&self, target: Position, body: &[Position]) -> Vec<Candidate> {
        let thresholds = &self.config.thresholds;
        let fill = self.fill_ratio(body);
        let tail = body[body.len() - 1];
        let mut candidates = Vec::new();

        for strategy in SearchStrategy::all() {
            // Stall mode aims at the tail to burn time, and only on a crowded board
            let goal = match strategy {
                SearchStrategy::Stall if fill <= thresholds.stall_fill_ratio => continue,
                SearchStrategy::Stall => tail,
                _ => target,
            };

            let moves = match strategy.find_path_weighted(
                &self.board,
                body,
                goal,
                thresholds.stall_heuristic_weight,
            ) {
                SearchOutcome::Found(moves) => moves,
                _ => continue,
            };

            let after = simulate(body, &moves, target, true);
            let threshold = thresholds.for_strategy(strategy, fill);
            let check = SpaceCheck::new(
                &self.board,
                &after,
                threshold,
                self.config.safety.min_reachable_cells,
            );

            if !check.is_safe() {
                debug!(
                    "Rejected {} ({} moves): {} of {} required cells reachable (threshold {:.2})",
                    strategy.as_str(),
                    moves.len(),
                    check.reachable,
                    check.required,
                    threshold
                );
                continue;
            }

            candidates.push(Candidate {
                strategy,
                moves,
                safety_ratio: check.ratio,
                score: 0.0,
            });
        }

        self.score(&mut candidates);
        candidates
    }

    /// Weighted sum of normalised safety and normalised inverse length
    fn score(&self, candidates: &mut [Candidate]) {
        let best_ratio = candidates
            .iter()
            .map(|c| c.safety_ratio)
            .fold(0.0_f64, f64::max);
        let shortest = candidates.iter().map(|c| c.len()).min().unwrap_or(1).max(1);
        let weights = &self.config.scoring;

        for candidate in candidates.iter_mut() {
            let safety = if best_ratio > 0.0 {
                candidate.safety_ratio / best_ratio
            } else {
                1.0
            };
            let length = shortest as f64 / candidate.len().max(1) as f64;
            candidate.score = weights.safety_weight * safety + weights.length_weight * length;
        }
    }

    /// Highest score wins; near-equal scores go to the strategy with the lower priority rank
    fn select<'a>(&self, candidates: &'a [Candidate]) -> Option<&'a Candidate> {
        let epsilon = self.config.scoring.tie_epsilon;

        let mut best: Option<&'a Candidate> = None;

        for candidate in candidates {
            let wins = match best {
                None => true,
                Some(current) => {
                    let diff = candidate.score - current.score;
                    diff > epsilon
                        || (diff.abs() <= epsilon
                            && candidate.strategy.priority() < current.strategy.priority())
                }
            };
            if wins {
                best = Some(candidate);
            }
        }

        best
    }

    /// Tail chase, then any free neighbour, then nothing
    fn fall_back(&self, body: &[Position]) -> Plan {
        let head = body[0];
        let tail = body[body.len() - 1];

        if let SearchOutcome::Found(moves) =
            SearchStrategy::BreadthFirst.find_path(&self.board, body, tail)
        {
            debug!("No safe route to target, chasing tail ({} moves)", moves.len());
            return Plan::fallback(moves, PlanOutcome::TailChase);
        }

        if let Some((dir, next)) = self
            .board
            .neighbors(&head)
            .find(|(_, next)| !body.contains(next))
        {
            debug!("Tail unreachable, stepping {} to {}", dir.as_str(), next);
            return Plan::fallback(vec![dir], PlanOutcome::SingleStep);
        }

        info!("No safe move from {}", head);
        Plan::fallback(Vec::new(), PlanOutcome::NoSafeMove)
    }
}

/// Plans moves toward `target` on a `board_rows` x `board_cols` board with default tuning
///
/// An empty result means no safe move exists.
pub fn compute_moves(
    target: Position,
    body: &[Position],
    board_rows: i32,
    board_cols: i32,
) -> Result<Vec<Direction>, PlanError> {
    let board = Board::new(board_rows, board_cols)?;
    let planner = Planner::with_board(Config::default_hardcoded(), board);
    Ok(planner.plan(target, body)?.moves)
}
