pub mod board;
pub mod diagram;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use diagram::{DiagramError, parse_diagram};
pub use error::*;
pub use game::*;
pub use movegen::*;
pub use perft::perft;
pub use rules::{detect_outcome, opponent_skipped};
pub use types::*;

// =============================================================================
// Engine trait, implemented by every move picker (minimax, random, ...)
// =============================================================================

/// Limits for one search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Number of plies to look ahead
    pub difficulty: Difficulty,
}

impl SearchLimits {
    pub fn depth(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }
}

/// Result of a search operation
#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    /// The chosen move for the side to act
    pub best_move: Move,
    /// Position after `best_move`
    pub position: Position,
    /// Backed-up evaluation of the chosen reply, machine perspective
    pub score: f64,
    /// Depth the tree was built to
    pub depth: u8,
    /// Number of tree nodes visited
    pub nodes: u64,
}

/// Trait that all engines must implement.
///
/// Engines pick a move for the side to act. A finished game, or one where
/// the side to act cannot move, is refused with [`EngineError::GameOver`].
pub trait Engine: Send {
    /// Search the position with the given limits.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> EngineResult<SearchResult>;

    /// Returns the engine's name for reports
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "pawn-chess"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
