// Self-play benchmark for the planner
//
// Usage:
//   cargo run --release --bin simulate -- [options]
//
// Options:
//   --games <n>        Number of games (default: simulation.games)
//   --seed <n>         Seed of the first game (default: simulation.seed)
//   --config <path>    Path to Pathfinder.toml (default: Pathfinder.toml)
//   --json             Print the report as JSON

use std::env;
use std::process;
use std::time::Instant;

use snake_pathfinder::config::Config;
use snake_pathfinder::planner::Planner;
use snake_pathfinder::simple_profiler;
use snake_pathfinder::simulation::simulate_n_games;

fn print_usage() {
    eprintln!("Pathfinder Self-Play Simulation");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  simulate [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --games <N>       Number of games to play");
    eprintln!("  --seed <N>        Seed of the first game; game i uses seed + i");
    eprintln!("  --config <path>   Path to Pathfinder.toml (default: Pathfinder.toml)");
    eprintln!("  --json            Print the report as JSON");
    eprintln!("  --help            Show this help message");
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T
where
    T::Err: std::fmt::Display,
{
    let Some(value) = value else {
        eprintln!("Error: {} requires an argument", flag);
        process::exit(1);
    };
    value.parse::<T>().unwrap_or_else(|e| {
        eprintln!("Error: invalid value '{}' for {}: {}", value, flag, e);
        process::exit(1);
    })
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(0);
    }

    let mut config_path = "Pathfinder.toml".to_string();
    let mut games = None;
    let mut seed = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                games = Some(parse_number::<usize>("--games", args.get(i + 1)));
                i += 1;
            }
            "--seed" => {
                seed = Some(parse_number::<u64>("--seed", args.get(i + 1)));
                i += 1;
            }
            "--config" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                };
                config_path = path.clone();
                i += 1;
            }
            "--json" => {
                json = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    let games = games.unwrap_or(config.simulation.games);
    let seed = seed.unwrap_or(config.simulation.seed);

    let planner = match Planner::new(config) {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let start = Instant::now();
    let report = match simulate_n_games(&planner, games, seed) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error during simulation: {}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
    } else {
        report.print();
        println!("  Wall time: {:.2} s", start.elapsed().as_secs_f64());
    }

    simple_profiler::print_report();
}
