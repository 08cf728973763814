use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DifficultyError, IllegalMove};

/// Board edge length. The grid is always `SIZE` x `SIZE`.
pub const SIZE: i8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Side::White => 'W',
            Side::Black => 'B',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

/// Which participant a side belongs to. Home and goal ranks follow the role,
/// not the colour: the machine starts on rank 0, the human on rank 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Machine,
}

impl Role {
    pub fn other(self) -> Role {
        match self {
            Role::Human => Role::Machine,
            Role::Machine => Role::Human,
        }
    }

    pub fn home_rank(self) -> i8 {
        match self {
            Role::Machine => 0,
            Role::Human => SIZE - 1,
        }
    }

    pub fn goal_rank(self) -> i8 {
        self.other().home_rank()
    }

    /// Rank step of one straight advance.
    pub fn forward(self) -> i8 {
        match self {
            Role::Machine => 1,
            Role::Human => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Pawn(Side),
}

impl Cell {
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Pawn(side) => Some(side),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Pawn(side) => side.symbol(),
        }
    }
}

/// A validated board coordinate. `file` and `rank` are both in `0..SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: i8,
    rank: i8,
}

impl Square {
    pub fn new(file: i8, rank: i8) -> Option<Square> {
        if (0..SIZE).contains(&file) && (0..SIZE).contains(&rank) {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Builds a square from caller-supplied coordinates of any width.
    pub fn from_coords(file: i32, rank: i32) -> Option<Square> {
        let file = i8::try_from(file).ok()?;
        let rank = i8::try_from(rank).ok()?;
        Square::new(file, rank)
    }

    pub fn file(self) -> i8 {
        self.file
    }

    pub fn rank(self) -> i8 {
        self.rank
    }

    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::new(self.file + df, self.rank + dr)
    }

    pub fn idx(self) -> usize {
        (self.rank as usize) * (SIZE as usize) + self.file as usize
    }

    /// Same file, rank seen from the opposite end of the board.
    pub fn mirrored(self) -> Square {
        Square {
            file: self.file,
            rank: SIZE - 1 - self.rank,
        }
    }

    /// All squares in generation order: file-major, ranks ascending.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SIZE).flat_map(|file| (0..SIZE).map(move |rank| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Builds a move from raw coordinates, refusing anything off the board.
    pub fn from_coords(
        from_file: i32,
        from_rank: i32,
        to_file: i32,
        to_rank: i32,
    ) -> Result<Move, IllegalMove> {
        let square = |file, rank| {
            Square::from_coords(file, rank).ok_or(IllegalMove::OffBoard { file, rank })
        };
        Ok(Move {
            from: square(from_file, from_rank)?,
            to: square(to_file, to_rank)?,
        })
    }

    pub fn mirrored(self) -> Move {
        Move {
            from: self.from.mirrored(),
            to: self.to.mirrored(),
        }
    }

    pub fn is_diagonal(self) -> bool {
        self.from.file() != self.to.file()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// How a game ended, or that it has not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    #[default]
    Ongoing,
    Won(Side),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Won(side) => Some(side),
            _ => None,
        }
    }
}

/// Toggles for reference-compatible rule quirks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// When false, the home-rank double advance only checks the landing
    /// square and ignores the square it passes over.
    pub double_step_requires_clear_path: bool,
}

/// Search depth in plies chosen by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(level: u8) -> Option<Difficulty> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(Difficulty(level))
    }

    pub fn depth(self) -> u8 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(3)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = DifficultyError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::new(level).ok_or(DifficultyError::OutOfRange(level))
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> u8 {
        d.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
