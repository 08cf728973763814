//! Engine factory for the command line: `minimax:3`, `random:42` and so on.

use thiserror::Error;

use minimax_engine::{MinimaxEngine, RootTieBreak};
use pawn_core::{Difficulty, DifficultyError, Engine, SearchLimits};
use random_engine::RandomEngine;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineParseError {
    #[error("unknown engine '{0}'")]
    UnknownEngine(String),

    #[error("invalid depth '{0}'")]
    InvalidDepth(String),

    #[error(transparent)]
    Difficulty(#[from] DifficultyError),

    #[error("invalid seed '{0}'")]
    InvalidSeed(String),
}

/// Builds an engine and the limits it searches with from `kind[:arg]`.
///
/// Minimax engines take a depth argument (default 3); the random engine
/// takes an optional seed.
pub fn create_engine(spec: &str) -> Result<(Box<dyn Engine>, SearchLimits), EngineParseError> {
    let (kind, arg) = match spec.split_once(':') {
        Some((kind, arg)) => (kind, Some(arg)),
        None => (spec, None),
    };

    let difficulty = || -> Result<Difficulty, EngineParseError> {
        match arg {
            None => Ok(Difficulty::default()),
            Some(level) => {
                let level: u8 = level
                    .parse()
                    .map_err(|_| EngineParseError::InvalidDepth(level.to_string()))?;
                Ok(Difficulty::try_from(level)?)
            }
        }
    };

    let engine: Box<dyn Engine> = match kind.to_lowercase().as_str() {
        "minimax" | "mm" => Box::new(MinimaxEngine::new()),
        "minimax-early" => Box::new(MinimaxEngine::with_tie_break(RootTieBreak::EarliestChild)),
        "random" => {
            let engine: Box<dyn Engine> = match arg {
                Some(seed) => {
                    let seed = seed
                        .parse()
                        .map_err(|_| EngineParseError::InvalidSeed(seed.to_string()))?;
                    Box::new(RandomEngine::seeded(seed))
                }
                None => Box::new(RandomEngine::new()),
            };
            return Ok((engine, SearchLimits::default()));
        }
        _ => return Err(EngineParseError::UnknownEngine(spec.to_string())),
    };
    Ok((engine, SearchLimits::depth(difficulty()?)))
}

#[cfg(test)]
#[path = "engines_tests.rs"]
mod engines_tests;
