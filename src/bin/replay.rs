// Re-plans requests recorded in a decision log and compares them with what was sent
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --turn <n>              Only re-plan turn n (repeatable; default: every turn)
//   --expect <n>=<dir>      Fail unless turn n logged <dir> first (repeatable)
//   --verbose               Log every re-planned turn
//   --config <path>         Path to Pathfinder.toml (default: Pathfinder.toml)

use std::env;
use std::process;

use snake_pathfinder::config::Config;
use snake_pathfinder::replay::{parse_expectation, ReplayEngine};
use snake_pathfinder::simple_profiler;

fn print_usage() {
    eprintln!("Pathfinder Decision Log Replay");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("Each logged request is planned again with the loaded configuration and the");
    eprintln!("new moves are compared with the logged ones.");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --turn <N>             Only re-plan turn N; repeat for more turns");
    eprintln!("  --expect <N>=<DIR>     Require turn N to have logged DIR as its first move;");
    eprintln!("                         several moves may be allowed as up/left");
    eprintln!("  --verbose              Log every re-planned turn");
    eprintln!("  --config <path>        Path to Pathfinder.toml (default: Pathfinder.toml)");
    eprintln!("  --help                 Show this help message");
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
    let Some(log_file) = args.get(1).filter(|arg| !arg.starts_with("--")) else {
        eprintln!("Error: missing log file");
        print_usage();
        process::exit(1);
    };

    let mut config_path = "Pathfinder.toml".to_string();
    let mut turns = Vec::new();
    let mut expectations = Vec::new();
    let mut verbose = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--turn" => {
                turns.push(parse_number::<u64>("--turn", args.get(i + 1)));
                i += 1;
            }
            "--expect" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: --expect requires an argument");
                    process::exit(1);
                };
                match parse_expectation(value) {
                    Ok(expectation) => expectations.push(expectation),
                    Err(e) => {
                        eprintln!("Error: invalid value for --expect: {}", e);
                        process::exit(1);
                    }
                }
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
            "--verbose" => {
                verbose = true;
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

    let engine = ReplayEngine::new(config, verbose);
    let entries = match engine.load_log_file(log_file) {
        Ok(entries) if entries.is_empty() => {
            eprintln!("Error: {} holds no decisions", log_file);
            process::exit(1);
        }
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading {}: {}", log_file, e);
            process::exit(1);
        }
    };

    let replayed = if turns.is_empty() {
        engine.replay_all(&entries)
    } else {
        engine.replay_turns(&entries, &turns)
    };
    match replayed {
        Ok(results) => engine.print_report(&results),
        Err(e) => {
            eprintln!("Error during replay: {}", e);
            process::exit(1);
        }
    }

    if !expectations.is_empty() {
        if let Err(e) = engine.validate_expected_moves(&entries, &expectations) {
            eprintln!("Expectation failed: {}", e);
            process::exit(1);
        }
        println!("All {} expectation(s) hold", expectations.len());
    }

    simple_profiler::print_report();
}
