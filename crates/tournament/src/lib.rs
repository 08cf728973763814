//! Match runner for pawn engines
//!
//! Plays engines against each other to see how the difficulty levels
//! compare, and stores the outcome as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Depth 3 against depth 1, twenty games
//! cargo run -p tournament -- match minimax:3 minimax:1 --games 20
//!
//! # Baseline against the random mover, results kept on disk
//! cargo run -p tournament -- match minimax:2 random --out results.json
//! ```

mod engines;
mod match_runner;
mod results;

pub use engines::{EngineParseError, create_engine};
pub use match_runner::*;
pub use results::*;
