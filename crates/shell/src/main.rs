use std::io;
use std::path::PathBuf;

use pawnchess::{Shell, ShellConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays a clean game transcript.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("Error! --config needs a file path");
                    std::process::exit(2);
                }
            },
            other => {
                eprintln!("Error! Unknown argument '{other}'");
                eprintln!("Usage: pawnchess [--config <file>]");
                std::process::exit(2);
            }
        }
    }

    let config = match ShellConfig::discover(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error! {e}");
            std::process::exit(1);
        }
    };
    info!(?config, "configuration loaded");

    let mut shell = Shell::new(&config, io::stdout());
    if let Err(e) = shell.run(io::BufReader::new(io::stdin())) {
        eprintln!("Error! {e}");
        std::process::exit(1);
    }
}
