// Replay module for analyzing logged planning decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs
// 2. Re-plan each logged request with the current configuration
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::board::Board;
use crate::config::Config;
use crate::planner::Planner;
use crate::types::{Direction, Position};

/// Represents a single entry from the decision JSONL file
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogEntry {
    pub turn: u64,
    pub rows: i32,
    pub cols: i32,
    pub target: Position,
    pub body: Vec<Position>,
    pub moves: Vec<Direction>,
    pub outcome: String,
    pub timestamp: String,
}

/// Result of replaying a single entry
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: u64,
    pub original_moves: Vec<Direction>,
    pub replayed_moves: Vec<Direction>,
    pub original_outcome: String,
    pub replayed_outcome: String,
    /// Whole sequences are equal
    pub matches: bool,
    /// First moves are equal, which is all the game acts on before re-planning
    pub first_move_matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub first_move_matches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

fn format_moves(moves: &[Direction]) -> String {
    if moves.is_empty() {
        return "-".to_string();
    }
    moves.iter().map(|d| d.as_str()).collect::<Vec<_>>().join(",")
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Re-plans a single logged request
    /// Returns the moves, the outcome name and the computation time in microseconds
    pub fn replay_turn(&self, entry: &LogEntry) -> Result<(Vec<Direction>, String, u128), String> {
        let board = Board::new(entry.rows, entry.cols).map_err(|e| e.to_string())?;
        let planner = Planner::with_board(self.config.clone(), board);

        let start_time = Instant::now();
        let plan = planner
            .plan(entry.target, &entry.body)
            .map_err(|e| format!("Turn {} cannot be planned: {}", entry.turn, e))?;
        let elapsed = start_time.elapsed().as_micros();

        Ok((plan.moves, plan.outcome.as_str().to_string(), elapsed))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let (replayed_moves, replayed_outcome, computation_time) = self.replay_turn(entry)?;

        let matches = replayed_moves == entry.moves;
        let first_move_matches = replayed_moves.first() == entry.moves.first();

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: MATCH - {} via {} ({}us)",
                    entry.turn,
                    format_moves(&replayed_moves),
                    replayed_outcome,
                    computation_time
                );
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {} via {}, Replayed: {} via {} ({}us)",
                    entry.turn,
                    format_moves(&entry.moves),
                    entry.outcome,
                    format_moves(&replayed_moves),
                    replayed_outcome,
                    computation_time
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_moves: entry.moves.clone(),
            replayed_moves,
            original_outcome: entry.outcome.clone(),
            replayed_outcome,
            matches,
            first_move_matches,
            computation_time_us: computation_time,
        })
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        Ok(results)
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[u64],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let first_move_matches = results.iter().filter(|r| r.first_move_matches).count();
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches: total_turns - matches,
            first_move_matches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:         {}", stats.total_turns);
        println!("Matches:             {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:          {}", stats.mismatches);
        println!("First Move Matches:  {}", stats.first_move_matches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} ({}) → {} ({})",
                    result.turn,
                    format_moves(&result.original_moves),
                    result.original_outcome,
                    format_moves(&result.replayed_moves),
                    result.replayed_outcome
                );
            }
            println!();
        }
    }

    /// Validates that the logged first move of each listed turn is one of the acceptable moves
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(u64, Vec<Direction>)],
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = entry
                .moves
                .first()
                .ok_or_else(|| format!("Turn {}: no move was logged ({})", turn, entry.outcome))?;

            if !acceptable.contains(actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }

            info!(
                "Turn {}: {} is acceptable",
                turn,
                actual_move.as_str()
            );
        }

        Ok(())
    }
}

/// Parses a first-move expectation of the form `<turn>=<dir>[/<dir>...]`
pub fn parse_expectation(s: &str) -> Result<(u64, Vec<Direction>), String> {
    let Some((turn, moves)) = s.split_once('=') else {
        return Err(format!("expected '<turn>=<dir>', got '{}'", s));
    };
    let turn = turn
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid turn '{}': {}", turn.trim(), e))?;
    let moves = moves
        .split('/')
        .map(|m| Direction::parse(m.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((turn, moves))
}
