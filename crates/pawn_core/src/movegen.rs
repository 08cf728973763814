use crate::{board::Position, types::*};

/// Destinations available to one pawn, in generation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PawnMoves {
    pub from: Square,
    pub targets: Vec<Square>,
}

/// Legal moves of the side to act, grouped per pawn.
///
/// Every pawn of the side to act gets an entry, even when it is blocked.
/// A finished game has no legal moves.
pub fn legal_moves(pos: &Position) -> Vec<PawnMoves> {
    if pos.is_terminal() {
        return Vec::new();
    }
    pos.pawns(pos.side_to_act())
        .map(|from| {
            let mut targets = Vec::with_capacity(4);
            pawn_targets_into(pos, from, &mut targets);
            PawnMoves { from, targets }
        })
        .collect()
}

/// Flat list of legal moves for the side to act, reusing the buffer.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    if pos.is_terminal() {
        return;
    }
    side_moves_into(pos, pos.side_to_act(), out);
}

/// Every move `side` could make on this grid, ignoring whose turn it is.
pub fn side_moves_into(pos: &Position, side: Side, out: &mut Vec<Move>) {
    let mut targets = Vec::with_capacity(4);
    for from in pos.pawns(side) {
        pawn_targets_into(pos, from, &mut targets);
        out.extend(targets.iter().map(|&to| Move::new(from, to)));
    }
}

pub fn has_any_move(pos: &Position, side: Side) -> bool {
    let mut targets = Vec::with_capacity(4);
    pos.pawns(side).any(|from| {
        pawn_targets_into(pos, from, &mut targets);
        !targets.is_empty()
    })
}

/// Successor positions of the side to act, in generation order.
pub fn successors(pos: &Position) -> Vec<(Move, Position)> {
    let mut moves = Vec::with_capacity(24);
    legal_moves_into(pos, &mut moves);
    moves
        .into_iter()
        .map(|mv| (mv, pos.play_unchecked(mv)))
        .collect()
}

/// Destinations for the pawn on `from`, written into `out`.
///
/// Order: home-rank double advance, straight advance, diagonal toward the
/// lower file, diagonal toward the higher file. Off-board targets are never
/// looked at, which covers the edge and corner cases.
pub fn pawn_targets_into(pos: &Position, from: Square, out: &mut Vec<Square>) {
    out.clear();
    let side = match pos.cell(from).side() {
        Some(s) => s,
        None => return,
    };
    let role = pos.role_of(side);
    let dir = role.forward();

    if from.rank() == role.home_rank()
        && let Some(two) = from.offset(0, 2 * dir)
        && pos.cell(two).is_empty()
    {
        let path_clear = from
            .offset(0, dir)
            .is_some_and(|one| pos.cell(one).is_empty());
        if path_clear || !pos.rules().double_step_requires_clear_path {
            out.push(two);
        }
    }

    if let Some(one) = from.offset(0, dir)
        && pos.cell(one).is_empty()
    {
        out.push(one);
    }

    for df in [-1, 1] {
        if let Some(diag) = from.offset(df, dir)
            && pos.cell(diag) == Cell::Pawn(side.other())
        {
            out.push(diag);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
