// Self-play runner
//
// Each game asks the planner for a move sequence toward the current apple, plays it
// until the sequence runs out or the apple is eaten, and asks again. Games are
// independent, so batches run on rayon's pool.

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::PlanError;
use crate::game::{Game, StepOutcome};
use crate::planner::Planner;
use crate::types::BodyState;

/// Why a game stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    /// The planner returned no moves
    NoMoves,
    Collision,
    /// The body covers the whole board
    BoardFilled,
    StepLimit,
}

impl GameEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEnd::NoMoves => "no_moves",
            GameEnd::Collision => "collision",
            GameEnd::BoardFilled => "board_filled",
            GameEnd::StepLimit => "step_limit",
        }
    }
}

/// Result of one game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStats {
    pub seed: u64,
    pub score: u32,
    pub steps: usize,
    /// Seconds the real game would have run
    pub survived_secs: f64,
    pub final_length: usize,
    pub end: GameEnd,
}

/// Averages over a batch of games
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub games: usize,
    pub average_score: f64,
    pub average_steps: f64,
    pub average_time_secs: f64,
    pub best_score: u32,
    pub ends: BTreeMap<GameEnd, usize>,
}

impl SimulationReport {
    fn from_games(stats: &[GameStats]) -> Self {
        let games = stats.len();
        let divisor = games.max(1) as f64;

        let mut ends = BTreeMap::new();
        for game in stats {
            *ends.entry(game.end).or_insert(0) += 1;
        }

        SimulationReport {
            games,
            average_score: stats.iter().map(|g| g.score as f64).sum::<f64>() / divisor,
            average_steps: stats.iter().map(|g| g.steps as f64).sum::<f64>() / divisor,
            average_time_secs: stats.iter().map(|g| g.survived_secs).sum::<f64>() / divisor,
            best_score: stats.iter().map(|g| g.score).max().unwrap_or(0),
            ends,
        }
    }

    pub fn print(&self) {
        println!("\nAfter {} games:", self.games);
        println!("  Average score: {:.2}", self.average_score);
        println!("  Average steps: {:.2}", self.average_steps);
        println!("  Average time: {:.2} s", self.average_time_secs);
        println!("  Best score: {}", self.best_score);
        for (end, count) in &self.ends {
            println!("  {:<13} {}", end.as_str(), count);
        }
    }
}

/// Plays one game from the configured starting body
pub fn simulate_once(planner: &Planner, seed: u64) -> Result<GameStats, PlanError> {
    let sim = &planner.config().simulation;
    let mut game = Game::new(*planner.board(), sim.initial_body.clone(), seed)?;

    let end = loop {
        let apple = match game.apple() {
            Some(apple) => apple,
            None => break GameEnd::BoardFilled,
        };
        if game.steps() >= sim.max_steps {
            break GameEnd::StepLimit;
        }

        let plan = planner.plan_for(apple, game.snake())?;
        if plan.is_empty() {
            break GameEnd::NoMoves;
        }

        // Eating invalidates the rest of the sequence: the body grew and the apple moved
        let mut collided = false;
        for dir in &plan.moves {
            match game.step(*dir) {
                StepOutcome::Moved => {}
                StepOutcome::Ate => break,
                StepOutcome::Collided => {
                    collided = true;
                    break;
                }
            }
        }
        if collided {
            break GameEnd::Collision;
        }
    };

    let stats = GameStats {
        seed,
        score: game.score(),
        steps: game.steps(),
        survived_secs: game.steps() as f64 * sim.move_interval_secs,
        final_length: game.snake().segments().len(),
        end,
    };
    debug!(
        "Game {} ended by {} at score {} after {} steps (head {})",
        seed,
        end.as_str(),
        stats.score,
        stats.steps,
        game.snake().head()
    );
    Ok(stats)
}

/// Plays `games` games in parallel; game `i` uses seed `base_seed + i`
pub fn simulate_n_games(
    planner: &Planner,
    games: usize,
    base_seed: u64,
) -> Result<SimulationReport, PlanError> {
    info!(
        "Simulating {} games on a {}x{} board",
        games,
        planner.board().rows(),
        planner.board().cols()
    );

    let stats = (0..games as u64)
        .into_par_iter()
        .map(|i| simulate_once(planner, base_seed.wrapping_add(i)))
        .collect::<Result<Vec<_>, _>>()?;

    let report = SimulationReport::from_games(&stats);
    info!(
        "Average score {:.2}, best {}",
        report.average_score, report.best_score
    );
    Ok(report)
}
