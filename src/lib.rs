// Library exports for the snake path planner
// The service binary, the replay tool and the simulation runner all build on these modules

#[macro_use]
extern crate rocket;

pub mod board;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod game;
pub mod handler;
pub mod occupancy;
pub mod planner;
pub mod replay;
pub mod safety;
pub mod search;
pub mod simple_profiler;
pub mod simulation;
pub mod simulator;
pub mod types;

pub use error::PlanError;
pub use planner::{compute_moves, Plan, PlanOutcome, Planner};
pub use types::{BodyState, Direction, Position};
