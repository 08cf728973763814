//! Tournament CLI
//!
//! Run matches between pawn engines.

use std::env;
use std::path::PathBuf;

use thiserror::Error;
use tournament::{
    EngineParseError, MatchConfig, MatchReport, MatchRunner, ResultsError, Seat, create_engine,
};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Pawn Engine Match Runner");
    println!();
    println!("Usage:");
    println!("  tournament match <engine1> <engine2> [--games N] [--max-plies P] [--out FILE]");
    println!();
    println!("Engines:");
    println!("  minimax:<d>   - Full-width minimax to depth d (1-8), default 3");
    println!("  minimax-early:<d> - Same, root ties go to the first generated move");
    println!("  random        - Uniformly random legal moves");
    println!("  random:<seed> - Random mover with a fixed seed");
    println!();
    println!("Examples:");
    println!("  tournament match minimax:3 minimax:1 --games 20");
    println!("  tournament match minimax:2 random --out results.json");
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Engine(#[from] EngineParseError),

    #[error("failed to save {}: {source}", path.display())]
    Save { path: PathBuf, source: ResultsError },
}

fn run_match(args: &[String]) -> Result<(), CliError> {
    if args.len() < 2 {
        print_usage();
        return Err(CliError::Usage(
            "match requires two engine specifications".to_string(),
        ));
    }

    let engine1_spec = &args[0];
    let engine2_spec = &args[1];

    // Parse optional arguments
    let mut config = MatchConfig::default();
    let mut out: Option<PathBuf> = None;

    let mut i = 2;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--games" | "-g", Some(v)) => {
                config.num_games = v.parse().map_err(|_| CliError::Usage(format!("invalid game count '{}'", v)))?;
                i += 1;
            }
            ("--max-plies" | "-p", Some(v)) => {
                config.max_plies = v.parse().map_err(|_| CliError::Usage(format!("invalid ply cap '{}'", v)))?;
                i += 1;
            }
            ("--out" | "-o", Some(v)) => {
                out = Some(PathBuf::from(v));
                i += 1;
            }
            (flag, _) => {
                return Err(CliError::Usage(format!("unexpected argument '{}'", flag)));
            }
        }
        i += 1;
    }

    let (mut engine1, limits1) = create_engine(engine1_spec)?;
    let (mut engine2, limits2) = create_engine(engine2_spec)?;

    println!("=== Match: {} vs {} ===", engine1_spec, engine2_spec);
    println!("Games: {}, Ply cap: {}", config.num_games, config.max_plies);
    println!();

    let max_plies = config.max_plies;
    let runner = MatchRunner::new(config);
    let result = runner.run_match(
        &mut Seat::new(engine1.as_mut(), limits1),
        &mut Seat::new(engine2.as_mut(), limits2),
    );

    let report = MatchReport {
        engine1: engine1_spec.clone(),
        engine2: engine2_spec.clone(),
        max_plies,
        result,
    };
    println!();
    print!("{}", report.generate_report());

    if let Some(path) = out {
        if let Err(source) = report.save(&path) {
            return Err(CliError::Save { path, source });
        }
        println!("Results written to {}", path.display());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let outcome = match args[1].as_str() {
        "match" => run_match(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            Err(CliError::Usage(format!("unknown command '{}'", other)))
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
