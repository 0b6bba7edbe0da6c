#[macro_use]
extern crate rocket;

use log::info;
use std::env;

use snake_pathfinder::config::Config;
use snake_pathfinder::debug_logger::DebugLogger;
use snake_pathfinder::handler;

#[launch]
async fn rocket() -> _ {
    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable. However, Rocket looks at the `ROCKET_PORT` environment variable.
    // If we find a value for `PORT`, we set `ROCKET_PORT` to that value.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting pathfinder server...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let logger = DebugLogger::new(
        config.server.decision_log_enabled,
        &config.server.decision_log_path,
    )
    .await;

    info!(
        "Planning on a {}x{} board by default",
        config.board.rows, config.board.columns
    );

    handler::build(config, logger)
}
