//! Minimax Pawn Engine
//!
//! Walks the complete game tree to the requested depth, scores every node
//! with the positional evaluator and backs values up by minimax. Nothing is
//! pruned, so time grows with the branching factor to the power of the
//! depth. Memory does not: subtrees are folded as soon as they are scored.

pub mod eval;
pub mod tree;

use tracing::debug;

use pawn_core::{
    Difficulty, Engine, EngineError, EngineResult, IllegalMove, Position, Role, SearchLimits,
    SearchResult,
};

pub use eval::evaluate;
pub use tree::{RootTieBreak, SearchNode, SearchTree};

/// Engine that always plays the machine role of the position it searches.
///
/// When the human role is to act, the position is mirrored first so the
/// side to act becomes the machine, and the chosen reply is mirrored back.
/// This lets two minimax engines play each other.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    tie_break: RootTieBreak,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tie_break(tie_break: RootTieBreak) -> Self {
        Self { tie_break, nodes: 0 }
    }

    pub fn tie_break(&self) -> RootTieBreak {
        self.tie_break
    }

    /// Nodes built by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> EngineResult<SearchResult> {
        if pos.role_to_act() == Role::Human {
            let found = self.search(&pos.mirrored(), limits)?;
            return Ok(SearchResult {
                best_move: found.best_move.mirrored(),
                position: found.position.mirrored(),
                ..found
            });
        }

        self.nodes = 0;
        let found = search_machine(pos, limits.difficulty, self.tie_break)?;
        self.nodes = found.nodes;
        Ok(found)
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

/// Chooses the machine's reply to `pos` at the given difficulty.
///
/// Refuses a finished game, a position where the human is to act, and a
/// machine with no move at all.
pub fn best_machine_move(pos: &Position, difficulty: Difficulty) -> EngineResult<Position> {
    if !pos.is_terminal() && pos.role_to_act() != Role::Machine {
        return Err(IllegalMove::OutOfTurn(Role::Machine).into());
    }
    search_machine(pos, difficulty, RootTieBreak::default()).map(|found| found.position)
}

fn search_machine(
    pos: &Position,
    difficulty: Difficulty,
    tie_break: RootTieBreak,
) -> EngineResult<SearchResult> {
    if pos.is_terminal() {
        return Err(EngineError::GameOver);
    }

    let depth = difficulty.depth();
    debug!(depth, ?tie_break, "searching");
    let mut tree = SearchTree::build(pos, depth);
    tree.back_up();

    let best = tree.best_child(tie_break).ok_or(EngineError::GameOver)?;
    let best_move = best.mv.ok_or(EngineError::GameOver)?;
    debug!(
        nodes = tree.nodes,
        score = best.evaluation,
        %best_move,
        "search finished"
    );

    Ok(SearchResult {
        best_move,
        position: best.position,
        score: best.evaluation,
        depth,
        nodes: tree.nodes,
    })
}
