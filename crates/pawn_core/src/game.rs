//! Game session used by front ends.
//!
//! A `Game` owns the current position, the difficulty the machine searches
//! at, and the positions to return to on undo. Searches can run on another
//! thread: a [`MachineRequest`] carries a snapshot plus a generation number,
//! and a reply is only applied while that generation is still current.

use tracing::{debug, info};

use crate::{
    Engine, SearchLimits, SearchResult,
    board::Position,
    error::{EngineError, EngineResult, IllegalMove},
    movegen::{PawnMoves, legal_moves},
    rules::opponent_skipped,
    types::*,
};

/// Settings for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side making the first move
    pub starting: Side,
    /// Side played by the human
    pub human: Side,
    pub difficulty: Difficulty,
    pub rules: RuleSet,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting: Side::White,
            human: Side::White,
            difficulty: Difficulty::default(),
            rules: RuleSet::default(),
        }
    }
}

impl GameConfig {
    /// The human takes the other colour. The starting colour stays, so the
    /// player who opened before now moves second.
    pub fn switched(self) -> Self {
        Self {
            human: self.human.other(),
            ..self
        }
    }

    /// Role of the side making the first move.
    pub fn starting_role(&self) -> Role {
        if self.starting == self.human {
            Role::Human
        } else {
            Role::Machine
        }
    }
}

/// What happened on one applied ply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlyReport {
    pub mv: Move,
    pub mover: Role,
    /// The opponent had no move and the mover acts again
    pub opponent_skipped: bool,
    pub outcome: Outcome,
    /// Machine-perspective score when the ply came from a search
    pub score: Option<f64>,
}

/// A search order detached from the session.
#[derive(Debug, Clone, Copy)]
pub struct MachineRequest {
    pub position: Position,
    pub difficulty: Difficulty,
    generation: u64,
}

impl MachineRequest {
    pub fn run(&self, engine: &mut dyn Engine) -> MachineReply {
        MachineReply {
            generation: self.generation,
            result: engine.search(&self.position, SearchLimits::depth(self.difficulty)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MachineReply {
    generation: u64,
    pub result: EngineResult<SearchResult>,
}

/// Result of handing a reply back to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accepted {
    Applied(PlyReport),
    /// The session moved on (new game, undo, another move) and the reply
    /// was discarded.
    Stale,
}

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    difficulty: Difficulty,
    history: Vec<Position>,
    generation: u64,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let position = Position::new_game(config.starting, config.human).with_rules(config.rules);
        Self {
            position,
            difficulty: config.difficulty,
            history: Vec::new(),
            generation: 0,
        }
    }

    /// Resumes from an arbitrary position, e.g. one parsed from a diagram.
    pub fn from_position(position: Position, difficulty: Difficulty) -> Self {
        Self {
            position,
            difficulty,
            history: Vec::new(),
            generation: 0,
        }
    }

    /// Starts over with a fresh board. Pending machine requests go stale.
    pub fn restart(&mut self, config: GameConfig) {
        let generation = self.generation + 1;
        *self = Game::new(config);
        self.generation = generation;
        info!(human = ?config.human, starting = ?config.starting, "new game");
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect on the next machine move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        debug!(%difficulty, "difficulty changed");
        self.difficulty = difficulty;
    }

    pub fn legal_moves(&self) -> Vec<PawnMoves> {
        legal_moves(&self.position)
    }

    pub fn is_terminal(&self) -> bool {
        self.position.is_terminal()
    }

    pub fn winner(&self) -> Option<Side> {
        self.position.winner()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Applies a move for whichever side is to act.
    ///
    /// A refused move leaves the session untouched.
    pub fn play(&mut self, mv: Move) -> EngineResult<PlyReport> {
        let before = self.position;
        let after = before.apply_move(mv)?;
        let mover = before.role_to_act();
        if mover == Role::Human {
            self.history.push(before);
        }
        self.position = after;
        self.generation += 1;
        Ok(report(&before, &after, mv, None))
    }

    /// Applies a move on behalf of the human player.
    pub fn play_human(&mut self, mv: Move) -> EngineResult<PlyReport> {
        if self.position.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if self.position.role_to_act() != Role::Human {
            return Err(IllegalMove::OutOfTurn(Role::Human).into());
        }
        self.play(mv)
    }

    /// Snapshots the position for a search that may run elsewhere.
    pub fn request_machine_move(&self) -> EngineResult<MachineRequest> {
        if self.position.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if self.position.role_to_act() != Role::Machine {
            return Err(IllegalMove::OutOfTurn(Role::Machine).into());
        }
        Ok(MachineRequest {
            position: self.position,
            difficulty: self.difficulty,
            generation: self.generation,
        })
    }

    /// Applies a finished search if nothing happened since it was requested.
    pub fn accept(&mut self, reply: MachineReply) -> EngineResult<Accepted> {
        if reply.generation != self.generation {
            debug!(
                reply = reply.generation,
                current = self.generation,
                "discarding stale machine reply"
            );
            return Ok(Accepted::Stale);
        }
        let found = reply.result?;
        Ok(Accepted::Applied(self.apply_search(found)))
    }

    /// Runs one machine search synchronously and applies it.
    pub fn machine_move(&mut self, engine: &mut dyn Engine) -> EngineResult<PlyReport> {
        let request = self.request_machine_move()?;
        let found = request.run(engine).result?;
        Ok(self.apply_search(found))
    }

    fn apply_search(&mut self, found: SearchResult) -> PlyReport {
        let before = self.position;
        self.position = found.position;
        self.generation += 1;
        report(&before, &found.position, found.best_move, Some(found.score))
    }

    /// Returns to the position before the last human move.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.position = previous;
                self.generation += 1;
                true
            }
            None => false,
        }
    }
}

fn report(before: &Position, after: &Position, mv: Move, score: Option<f64>) -> PlyReport {
    PlyReport {
        mv,
        mover: before.role_to_act(),
        opponent_skipped: opponent_skipped(before, after),
        outcome: after.outcome(),
        score,
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
