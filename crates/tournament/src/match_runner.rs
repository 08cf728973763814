//! Match runner for playing games between engines

use tracing::{debug, warn};

use pawn_core::{Engine, Outcome, Position, Role, SearchLimits, Side};

use crate::results::{GameRecord, GameResult, MatchResult, Termination};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Plies per game before declaring a draw
    pub max_plies: u32,
    /// Whether engine 1 and engine 2 take turns making the first move
    pub alternate_starts: bool,
    /// Print progress during match
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_plies: 200,
            alternate_starts: true,
            verbose: true,
        }
    }
}

/// An engine together with the limits it searches under.
pub struct Seat<'a> {
    pub engine: &'a mut dyn Engine,
    pub limits: SearchLimits,
}

impl<'a> Seat<'a> {
    pub fn new(engine: &'a mut dyn Engine, limits: SearchLimits) -> Self {
        Self { engine, limits }
    }
}

/// Runs matches between two engines.
///
/// Engine 1 always holds the machine role of the board (home rank 0) and
/// engine 2 the human role. Engines search for whichever side is to act, so
/// neither needs to know which role it was given.
pub struct MatchRunner {
    config: MatchConfig,
}

// Colours are cosmetic; engine 1 always plays Black.
const ENGINE1_SIDE: Side = Side::Black;

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(&self, engine1: &mut Seat<'_>, engine2: &mut Seat<'_>) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let engine1_started = !self.config.alternate_starts || game_num % 2 == 0;
            let game = self.play_game(engine1, engine2, engine1_started);
            result.record(game.clone());

            if self.config.verbose {
                let outcome = match game.result {
                    GameResult::Win => "1-0",
                    GameResult::Loss => "0-1",
                    GameResult::Draw => "1/2",
                };
                let first = if engine1_started { "E1" } else { "E2" };
                println!(
                    "Game {}/{}: {} ({} first, {} plies) - Score: {}-{}-{}",
                    game_num + 1,
                    self.config.num_games,
                    outcome,
                    first,
                    game.plies,
                    result.wins,
                    result.losses,
                    result.draws
                );
            }
        }

        result
    }

    /// Play a single game, returns the record from engine 1's perspective
    fn play_game(
        &self,
        engine1: &mut Seat<'_>,
        engine2: &mut Seat<'_>,
        engine1_started: bool,
    ) -> GameRecord {
        let starting = if engine1_started {
            ENGINE1_SIDE
        } else {
            ENGINE1_SIDE.other()
        };
        let mut pos = Position::new_game(starting, ENGINE1_SIDE.other());
        engine1.engine.new_game();
        engine2.engine.new_game();

        let record = |result, termination, plies| GameRecord {
            engine1_started,
            result,
            termination,
            plies,
        };

        for ply in 0..self.config.max_plies {
            match pos.outcome() {
                Outcome::Ongoing => {}
                outcome => {
                    return record(result_for_engine1(outcome), Termination::Rules, ply);
                }
            }

            let (engine, limits, forfeit): (&mut dyn Engine, _, _) = match pos.role_to_act() {
                Role::Machine => (&mut *engine1.engine, engine1.limits, GameResult::Loss),
                Role::Human => (&mut *engine2.engine, engine2.limits, GameResult::Win),
            };

            let found = match engine.search(&pos, limits) {
                Ok(found) => found,
                Err(e) => {
                    warn!(engine = engine.name(), error = %e, "engine failed to move");
                    return record(forfeit, Termination::Forfeit, ply);
                }
            };
            // Replay the move instead of trusting the returned position
            pos = match pos.apply_move(found.best_move) {
                Ok(next) => next,
                Err(e) => {
                    warn!(
                        engine = engine.name(),
                        mv = %found.best_move,
                        error = %e,
                        "engine played an illegal move"
                    );
                    return record(forfeit, Termination::Forfeit, ply);
                }
            };
            debug!(
                ply,
                engine = engine.name(),
                mv = %found.best_move,
                score = found.score,
                "move played"
            );
        }

        match pos.outcome() {
            Outcome::Ongoing => record(
                GameResult::Draw,
                Termination::PlyLimit,
                self.config.max_plies,
            ),
            outcome => record(
                result_for_engine1(outcome),
                Termination::Rules,
                self.config.max_plies,
            ),
        }
    }
}

fn result_for_engine1(outcome: Outcome) -> GameResult {
    match outcome.winner() {
        Some(side) if side == ENGINE1_SIDE => GameResult::Win,
        Some(_) => GameResult::Loss,
        None => GameResult::Draw,
    }
}

/// Quick utility to run a single match
pub fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    num_games: u32,
    limits: SearchLimits,
) -> MatchResult {
    let config = MatchConfig {
        num_games,
        verbose: false,
        ..Default::default()
    };
    let runner = MatchRunner::new(config);
    runner.run_match(&mut Seat::new(engine1, limits), &mut Seat::new(engine2, limits))
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
