// HTTP handler bindings for the planning service
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the planner. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Extracting the service state from Rocket's managed state
// - Delegating to the planner
// - Serializing responses

use log::{info, warn};
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::board::Board;
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::planner::{PlanOutcome, Planner};
use crate::types::{Direction, Position};

/// Body of POST /plan
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlanRequest {
    pub target: Position,
    pub body: Vec<Position>,
    /// Overrides the configured board when both dimensions are given
    pub rows: Option<i32>,
    pub cols: Option<i32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlanResponse {
    pub moves: Vec<Direction>,
    pub outcome: String,
    pub length: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// State shared by every request
pub struct PlanService {
    config: Config,
    logger: DebugLogger,
    requests: AtomicU64,
}

impl PlanService {
    pub fn new(config: Config, logger: DebugLogger) -> Self {
        PlanService {
            config,
            logger,
            requests: AtomicU64::new(0),
        }
    }

    fn info(&self) -> Value {
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "rows": self.config.board.rows,
            "cols": self.config.board.columns,
        })
    }

    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, String> {
        let (rows, cols) = match (request.rows, request.cols) {
            (Some(rows), Some(cols)) => (rows, cols),
            (None, None) => (self.config.board.rows, self.config.board.columns),
            _ => return Err("rows and cols must be given together".to_string()),
        };
        let board = Board::new(rows, cols).map_err(|e| e.to_string())?;
        let planner = Planner::with_board(self.config.clone(), board);

        let plan = planner
            .plan(request.target, &request.body)
            .map_err(|e| e.to_string())?;

        let turn = self.requests.fetch_add(1, Ordering::Relaxed);
        self.logger
            .log_plan(turn, (rows, cols), request.target, request.body.clone(), &plan);

        if plan.outcome == PlanOutcome::NoSafeMove {
            info!("Request {}: no safe move for head {}", turn, request.body[0]);
        }

        Ok(PlanResponse {
            length: plan.moves.len(),
            outcome: plan.outcome.as_str().to_string(),
            moves: plan.moves,
        })
    }
}

/// GET / endpoint
/// Returns service metadata
#[get("/")]
pub fn index(service: &State<PlanService>) -> Json<Value> {
    Json(service.info())
}

/// POST /plan endpoint
/// Computes the move sequence toward the requested target
#[post("/plan", format = "json", data = "<plan_req>")]
pub async fn plan(
    service: &State<PlanService>,
    plan_req: Json<PlanRequest>,
) -> Result<Json<PlanResponse>, (Status, Json<ErrorResponse>)> {
    service.plan(&plan_req).map(Json).map_err(|error| {
        warn!("Rejected plan request: {}", error);
        (Status::UnprocessableEntity, Json(ErrorResponse { error }))
    })
}

/// Builds the service with its routes and middleware
pub fn build(config: Config, logger: DebugLogger) -> Rocket<Build> {
    rocket::build()
        .manage(PlanService::new(config, logger))
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "snake-pathfinder");
            })
        }))
        .mount("/", routes![index, plan])
}
