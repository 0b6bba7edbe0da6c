// Configuration module for reading Pathfinder.toml
// Every tunable constant of the planner, the simulation runner and the service lives here

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::search::SearchStrategy;
use crate::types::Position;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub board: BoardConfig,
    pub thresholds: ThresholdConfig,
    pub safety: SafetyConfig,
    pub scoring: ScoringConfig,
    pub simulation: SimulationConfig,
    pub server: ServerConfig,
}

/// Board dimensions of the game being played
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub rows: i32,
    pub columns: i32,
}

/// Dynamic safety threshold constants
#[derive(Debug, Deserialize, Clone)]
pub struct ThresholdConfig {
    /// Threshold on an empty board
    pub base: f64,
    /// Added on top of `base` as the body fills the board
    pub span: f64,

    // Per-strategy adjustments
    pub breadth_first_offset: f64,
    pub body_hugging_offset: f64,
    pub seek_offset: f64,
    pub stall_offset: f64,

    /// Stall mode only runs once the body covers more than this share of the board
    pub stall_fill_ratio: f64,
    /// Multiplier on the negated distance term of stall mode
    pub stall_heuristic_weight: i64,
}

impl ThresholdConfig {
    /// Linear interpolation of the threshold by board fill ratio
    pub fn dynamic_threshold(&self, fill_ratio: f64) -> f64 {
        self.base + self.span * fill_ratio
    }

    /// Threshold a candidate from `strategy` has to clear
    pub fn for_strategy(&self, strategy: SearchStrategy, fill_ratio: f64) -> f64 {
        let offset = match strategy {
            SearchStrategy::BreadthFirst => self.breadth_first_offset,
            SearchStrategy::BodyHugging => self.body_hugging_offset,
            SearchStrategy::Seek => self.seek_offset,
            SearchStrategy::Stall => self.stall_offset,
        };
        (self.dynamic_threshold(fill_ratio) + offset).clamp(0.0, 1.0)
    }
}

/// Safety oracle constants
#[derive(Debug, Deserialize, Clone)]
pub struct SafetyConfig {
    pub min_reachable_cells: usize,
}

/// Candidate scoring constants
#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    pub safety_weight: f64,
    pub length_weight: f64,
    pub tie_epsilon: f64,
}

/// Self-play simulation constants
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub games: usize,
    pub seed: u64,
    /// Seconds the real game takes to move the snake one cell
    pub move_interval_secs: f64,
    /// Hard cap on steps per game
    pub max_steps: usize,
    /// Starting body, head first
    pub initial_body: Vec<Position>,
}

/// Planning service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub decision_log_enabled: bool,
    pub decision_log_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Pathfinder.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed and validated configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Pathfinder.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Pathfinder.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Pathfinder.toml
    pub fn default_hardcoded() -> Self {
        Config {
            board: BoardConfig {
                rows: 15,
                columns: 17,
            },
            thresholds: ThresholdConfig {
                base: 0.5,
                span: 0.4,
                breadth_first_offset: 0.0,
                body_hugging_offset: -0.05,
                seek_offset: 0.05,
                stall_offset: 0.0,
                stall_fill_ratio: 0.5,
                stall_heuristic_weight: 2,
            },
            safety: SafetyConfig {
                min_reachable_cells: 5,
            },
            scoring: ScoringConfig {
                safety_weight: 0.6,
                length_weight: 0.4,
                tie_epsilon: 1e-9,
            },
            simulation: SimulationConfig {
                games: 1000,
                seed: 42,
                move_interval_secs: 0.135,
                max_steps: 50_000,
                initial_body: vec![
                    Position::new(7, 4),
                    Position::new(7, 3),
                    Position::new(7, 2),
                    Position::new(7, 1),
                ],
            },
            server: ServerConfig {
                decision_log_enabled: false,
                decision_log_path: "pathfinder_decisions.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Pathfinder.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }

    /// Checks value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.board.rows <= 0 || self.board.columns <= 0 {
            return Err(format!(
                "board must be at least 1x1 (got {}x{})",
                self.board.rows, self.board.columns
            ));
        }

        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.base) || !(0.0..=1.0).contains(&(t.base + t.span)) {
            return Err(format!(
                "threshold base ({}) and base + span ({}) must lie in [0, 1]",
                t.base,
                t.base + t.span
            ));
        }
        if !(0.0..=1.0).contains(&t.stall_fill_ratio) {
            return Err(format!(
                "stall_fill_ratio must lie in [0, 1] (got {})",
                t.stall_fill_ratio
            ));
        }
        if t.stall_heuristic_weight < 1 {
            return Err(format!(
                "stall_heuristic_weight must be positive (got {})",
                t.stall_heuristic_weight
            ));
        }

        let s = &self.scoring;
        if s.safety_weight < 0.0
            || s.length_weight < 0.0
            || s.safety_weight + s.length_weight <= 0.0
        {
            return Err("scoring weights must be non-negative and not both zero".to_string());
        }

        if self.simulation.initial_body.is_empty() {
            return Err("simulation.initial_body must contain the head".to_string());
        }
        if self.simulation.move_interval_secs <= 0.0 {
            return Err("simulation.move_interval_secs must be positive".to_string());
        }

        Ok(())
    }
}
