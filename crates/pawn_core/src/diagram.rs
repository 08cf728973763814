//! Plain-text board diagrams.
//!
//! Eight non-empty lines, one per rank starting at rank 0 (the machine's home
//! rank), each with eight cells written as `W`, `B` or `.`. Whitespace inside
//! a line is ignored so diagrams can be indented or spaced out in tests.

use thiserror::Error;

use crate::{board::Position, types::*};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
    #[error("expected {expected} ranks, found {found}")]
    RankCount { expected: usize, found: usize },

    #[error("rank {rank} has {found} cells, expected {expected}")]
    FileCount {
        rank: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell character {0:?}")]
    InvalidCell(char),
}

pub fn parse_diagram(text: &str, human: Side, to_act: Side) -> Result<Position, DiagramError> {
    let size = SIZE as usize;
    let ranks: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if ranks.len() != size {
        return Err(DiagramError::RankCount {
            expected: size,
            found: ranks.len(),
        });
    }

    let mut cells = [Cell::Empty; 64];
    for (rank, line) in ranks.iter().enumerate() {
        let row: Vec<Cell> = line
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(parse_cell)
            .collect::<Result<_, _>>()?;
        if row.len() != size {
            return Err(DiagramError::FileCount {
                rank,
                expected: size,
                found: row.len(),
            });
        }
        for (file, cell) in row.into_iter().enumerate() {
            // rank and file are both below SIZE here
            if let Some(sq) = Square::new(file as i8, rank as i8) {
                cells[sq.idx()] = cell;
            }
        }
    }
    Ok(Position::from_cells(cells, human, to_act))
}

fn parse_cell(c: char) -> Result<Cell, DiagramError> {
    match c {
        'W' | 'w' => Ok(Cell::Pawn(Side::White)),
        'B' | 'b' => Ok(Cell::Pawn(Side::Black)),
        '.' | '-' | '_' => Ok(Cell::Empty),
        other => Err(DiagramError::InvalidCell(other)),
    }
}
