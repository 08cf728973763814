//! Random Move Pawn Engine
//!
//! Picks uniformly among the legal moves of the side to act. Serves as the
//! floor when calibrating difficulty levels and as a move-generation smoke
//! test in long match runs.

use pawn_core::{
    Engine, EngineError, EngineResult, Position, SearchLimits, SearchResult, legal_moves_into,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;


#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    nodes: u64,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    /// Reproducible move sequence, for tests and repeatable matches.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> EngineResult<SearchResult> {
        self.nodes = 0;
        if pos.is_terminal() {
            return Err(EngineError::GameOver);
        }

        let mut moves = Vec::with_capacity(24);
        legal_moves_into(pos, &mut moves);
        self.nodes = 1;

        let best_move = *moves.choose(&mut self.rng).ok_or(EngineError::GameOver)?;
        let position = pos.apply_move(best_move)?;

        Ok(SearchResult {
            best_move,
            position,
            score: 0.0,
            depth: 1,
            nodes: self.nodes,
        })
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
