//! Match results storage and reporting

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a single game, from engine 1's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// How a game came to an end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Goal rank reached, all pawns taken, or both sides blocked
    Rules,
    /// Ply cap reached, scored as a draw
    PlyLimit,
    /// An engine failed to produce a legal move and lost the game
    Forfeit,
}

/// One played game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    /// True when engine 1 made the first move
    pub engine1_started: bool,
    pub result: GameResult,
    pub termination: Termination,
    pub plies: u32,
}

/// Tally of a match (multiple games)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, game: GameRecord) {
        match game.result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
        self.games.push(game);
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("failed to access results file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode or decode results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything needed to reproduce and read back a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub engine1: String,
    pub engine2: String,
    pub max_plies: u32,
    pub result: MatchResult,
}

impl MatchReport {
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let r = &self.result;
        let mut report = String::new();
        report.push_str(&format!("=== Match: {} vs {} ===\n", self.engine1, self.engine2));
        report.push_str(&format!(
            "{:<20} {:>5} {:>5} {:>5}\n",
            "Engine", "W", "L", "D"
        ));
        report.push_str(&"-".repeat(38));
        report.push('\n');
        report.push_str(&format!(
            "{:<20} {:>5} {:>5} {:>5}\n",
            self.engine1, r.wins, r.losses, r.draws
        ));
        report.push_str(&format!(
            "{:<20} {:>5} {:>5} {:>5}\n",
            self.engine2, r.losses, r.wins, r.draws
        ));
        let capped = r
            .games
            .iter()
            .filter(|g| g.termination == Termination::PlyLimit)
            .count();
        if capped > 0 {
            report.push_str(&format!("{capped} game(s) hit the {}-ply cap\n", self.max_plies));
        }
        report.push_str(&format!("Score: {:.1}%\n", r.score() * 100.0));
        report
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
