//! Line-mode console for playing against the minimax engine.
//!
//! The console only turns text into game operations and game results back
//! into text; all rules live in `pawn_core`.

pub mod commands;
pub mod config;
pub mod shell;

pub use commands::{Command, CommandError, parse_command};
pub use config::{ConfigError, ShellConfig};
pub use shell::{Event, Flow, Shell};
