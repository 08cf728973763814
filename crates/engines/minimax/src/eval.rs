//! Positional evaluation from the machine's point of view.
//!
//! Every differential weighs the human's pawns 1.5 times as heavily as the
//! machine's, so the machine plays slightly defensively.

use pawn_core::{Position, Role, Side, Square};

/// Weight applied to the human side of every differential.
pub const HUMAN_WEIGHT: f64 = 1.5;

/// Terminal bonus for a machine win, divided by the ply it happens at.
pub const MACHINE_WIN: f64 = 5000.0;
/// Terminal penalty for a human win, divided by the ply it happens at.
pub const HUMAN_WIN: f64 = -7500.0;

/// Scores `pos` reached `ply` plies below the search root.
///
/// Higher is better for the machine. The terminal term prefers quick wins
/// and slow losses because it shrinks with depth.
pub fn evaluate(pos: &Position, ply: u8) -> f64 {
    material(pos) + danger(pos) + isolation(pos) + advancement(pos) + terminal_bonus(pos, ply)
}

/// Weighted difference of one per-side quantity.
fn differential(pos: &Position, term: impl Fn(Side) -> f64) -> f64 {
    term(pos.machine_side()) - HUMAN_WEIGHT * term(pos.human_side())
}

pub fn material(pos: &Position) -> f64 {
    differential(pos, |side| pos.pawn_count(side) as f64)
}

/// Endangered human pawns minus weighted endangered machine pawns.
///
/// The sign is flipped compared to the other terms: an endangered human
/// pawn is good for the machine.
pub fn danger(pos: &Position) -> f64 {
    let count = |side| pos.pawns(side).filter(|&sq| is_endangered(pos, sq, side)).count() as f64;
    count(pos.human_side()) - HUMAN_WEIGHT * count(pos.machine_side())
}

/// Isolated human pawns minus weighted isolated machine pawns.
pub fn isolation(pos: &Position) -> f64 {
    let count = |side| pos.pawns(side).filter(|&sq| is_isolated(pos, sq, side)).count() as f64;
    count(pos.human_side()) - HUMAN_WEIGHT * count(pos.machine_side())
}

/// Ranks travelled from home, summed per side.
pub fn advancement(pos: &Position) -> f64 {
    differential(pos, |side| {
        pos.pawns(side)
            .map(|sq| f64::from(pos.advancement(sq, side)))
            .sum()
    })
}

pub fn terminal_bonus(pos: &Position, ply: u8) -> f64 {
    let Some(winner) = pos.winner() else {
        return 0.0;
    };
    let depth = f64::from(ply.max(1));
    match pos.role_of(winner) {
        Role::Machine => MACHINE_WIN / depth,
        Role::Human => HUMAN_WIN / depth,
    }
}

/// An enemy pawn can capture onto `sq` next ply and no friendly pawn stands
/// diagonally behind to recapture. Pawns on their goal rank are never
/// endangered; pawns on their home rank have nothing behind them.
pub fn is_endangered(pos: &Position, sq: Square, side: Side) -> bool {
    let role = pos.role_of(side);
    if sq.rank() == role.goal_rank() {
        return false;
    }
    let fwd = role.forward();
    let holds = |df: i8, dr: i8, owner: Side| {
        sq.offset(df, dr)
            .is_some_and(|n| pos.cell(n).side() == Some(owner))
    };

    let attacked = [-1, 1].into_iter().any(|df| holds(df, fwd, side.other()));
    let covered = [-1, 1].into_iter().any(|df| holds(df, -fwd, side));
    attacked && !covered
}

/// No pawn of the same side on any in-bounds neighbouring cell.
pub fn is_isolated(pos: &Position, sq: Square, side: Side) -> bool {
    const NEIGHBOURS: [(i8, i8); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];
    !NEIGHBOURS.iter().any(|&(df, dr)| {
        sq.offset(df, dr)
            .is_some_and(|n| pos.cell(n).side() == Some(side))
    })
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
