//! Faults raised by the rule engine and the search.
//!
//! Only two kinds reach the search: an illegal move request and an operation
//! on a finished game. Both leave the position they were raised against
//! untouched. Out-of-range difficulty levels are refused separately.

use thiserror::Error;

use crate::types::{Difficulty, Role, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),

    #[error("Game already over!")]
    GameOver,
}

/// Why a requested move was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("coordinates ({file}, {rank}) are off the board")]
    OffBoard { file: i32, rank: i32 },

    #[error("no pawn of the side to act on {0}")]
    NoPawn(Square),

    #[error("{to} is not reachable from {from}")]
    NotLegal { from: Square, to: Square },

    #[error("it is not the {0:?}'s turn")]
    OutOfTurn(Role),
}

/// A search depth outside the supported range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyError {
    #[error("difficulty {0} out of range {min}..={max}", min = Difficulty::MIN, max = Difficulty::MAX)]
    OutOfRange(u8),
}

pub type EngineResult<T> = Result<T, EngineError>;
