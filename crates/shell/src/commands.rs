//! Parsing of console input lines.
//!
//! Commands are matched on their first letter, case-insensitively, so `n`,
//! `NEW` and `nonsense` all start a new game.

use thiserror::Error;

use pawn_core::{Difficulty, Move, SIZE, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New,
    Level(Difficulty),
    /// Already converted from console coordinates to board squares
    Move(Move),
    Print,
    Switch,
    Undo,
    Help,
    Quit,
}

/// Input the console refuses before it reaches the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command.")]
    Unknown,
    #[error("No level to be set entered!")]
    MissingLevel,
    #[error("Enter a number as difficulty!")]
    LevelNotNumber,
    #[error("AI not tuned yet! Choose a lower difficulty")]
    LevelTooHigh,
    #[error("Difficulty must be at least {}!", Difficulty::MIN)]
    LevelTooLow,
    #[error("Coordinates not given!")]
    MissingCoordinates,
    #[error("Illegal move or coordinates!")]
    BadCoordinates,
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = parts.first().and_then(|word| word.chars().next()) else {
        return Err(CommandError::Empty);
    };

    match first.to_ascii_lowercase() {
        'n' => Ok(Command::New),
        'l' => parse_level(&parts[1..]).map(Command::Level),
        'm' => parse_move(&parts[1..]).map(Command::Move),
        'p' => Ok(Command::Print),
        's' => Ok(Command::Switch),
        'u' => Ok(Command::Undo),
        'h' => Ok(Command::Help),
        'q' => Ok(Command::Quit),
        _ => Err(CommandError::Unknown),
    }
}

fn parse_level(args: &[&str]) -> Result<Difficulty, CommandError> {
    let raw = args.first().ok_or(CommandError::MissingLevel)?;
    let level: i64 = raw.parse().map_err(|_| CommandError::LevelNotNumber)?;
    if level > i64::from(Difficulty::MAX) {
        return Err(CommandError::LevelTooHigh);
    }
    u8::try_from(level)
        .ok()
        .and_then(Difficulty::new)
        .ok_or(CommandError::LevelTooLow)
}

/// `<fromCol> <fromRow> <toCol> <toRow>`, all 1-based. Column 1 is file 0;
/// row 1 is the human's home rank, i.e. rank 7.
fn parse_move(args: &[&str]) -> Result<Move, CommandError> {
    if args.len() < 4 {
        return Err(CommandError::MissingCoordinates);
    }
    let mut coords = [0i32; 4];
    for (slot, raw) in coords.iter_mut().zip(args) {
        *slot = raw.parse().map_err(|_| CommandError::BadCoordinates)?;
    }
    let [from_col, from_row, to_col, to_row] = coords;
    let size = i32::from(SIZE);
    Move::from_coords(from_col - 1, size - from_row, to_col - 1, size - to_row)
        .map_err(|_| CommandError::BadCoordinates)
}

/// Console coordinates of a square, the inverse of the `move` arguments.
pub fn console_coords(sq: Square) -> (i32, i32) {
    let size = i32::from(SIZE);
    (i32::from(sq.file()) + 1, size - i32::from(sq.rank()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: i8, rank: i8) -> Square {
        Square::new(file, rank).unwrap()
    }

    #[test]
    fn first_letter_selects_command() {
        assert_eq!(parse_command("NEW"), Ok(Command::New));
        assert_eq!(parse_command("  p"), Ok(Command::Print));
        assert_eq!(parse_command("Switch"), Ok(Command::Switch));
        assert_eq!(parse_command("quit now"), Ok(Command::Quit));
        assert_eq!(parse_command("xyz"), Err(CommandError::Unknown));
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
    }

    #[test]
    fn level_bounds() {
        assert_eq!(
            parse_command("level 5"),
            Ok(Command::Level(Difficulty::new(5).unwrap()))
        );
        assert_eq!(parse_command("level"), Err(CommandError::MissingLevel));
        assert_eq!(parse_command("level two"), Err(CommandError::LevelNotNumber));
        assert_eq!(parse_command("level 9"), Err(CommandError::LevelTooHigh));
        assert_eq!(parse_command("level 0"), Err(CommandError::LevelTooLow));
        assert_eq!(parse_command("level -3"), Err(CommandError::LevelTooLow));
    }

    #[test]
    fn move_coordinates_are_one_based_from_human_side() {
        assert_eq!(
            parse_command("move 4 1 4 3"),
            Ok(Command::Move(Move::new(sq(3, 7), sq(3, 5))))
        );
        assert_eq!(
            parse_command("m 1 8 2 7"),
            Ok(Command::Move(Move::new(sq(0, 0), sq(1, 1))))
        );
    }

    #[test]
    fn bad_move_input() {
        assert_eq!(parse_command("move 1 2 3"), Err(CommandError::MissingCoordinates));
        assert_eq!(parse_command("move a 2 3 4"), Err(CommandError::BadCoordinates));
        assert_eq!(parse_command("move 0 1 1 2"), Err(CommandError::BadCoordinates));
        assert_eq!(parse_command("move 1 9 1 8"), Err(CommandError::BadCoordinates));
    }

    #[test]
    fn console_coords_round_trip_a_square() {
        assert_eq!(console_coords(sq(3, 7)), (4, 1));
        assert_eq!(console_coords(sq(0, 0)), (1, 8));
    }
}
