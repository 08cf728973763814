//! Turn passing and end-of-game detection.

use tracing::debug;

use crate::{board::Position, movegen::has_any_move, types::*};

/// Decides the outcome of a grid, checked in priority order: a human pawn
/// on the human goal rank, a machine pawn on the machine goal rank, a side
/// with no pawns left, and finally mutual immobility decided on pawn count.
pub fn detect_outcome(pos: &Position) -> Outcome {
    for role in [Role::Human, Role::Machine] {
        let side = pos.side_of(role);
        if pos.pawns(side).any(|sq| sq.rank() == role.goal_rank()) {
            return Outcome::Won(side);
        }
    }

    let human = pos.human_side();
    let machine = pos.machine_side();
    let human_count = pos.pawn_count(human);
    let machine_count = pos.pawn_count(machine);
    if human_count == 0 {
        return Outcome::Won(machine);
    }
    if machine_count == 0 {
        return Outcome::Won(human);
    }

    if !has_any_move(pos, human) && !has_any_move(pos, machine) {
        return match human_count.cmp(&machine_count) {
            std::cmp::Ordering::Greater => Outcome::Won(human),
            std::cmp::Ordering::Less => Outcome::Won(machine),
            std::cmp::Ordering::Equal => Outcome::Draw,
        };
    }
    Outcome::Ongoing
}

/// Fixes outcome and side to act after `mover` has moved on `pos`.
///
/// The opponent acts next unless it has no move at all, in which case the
/// turn silently returns to the mover. A finished game keeps the mover.
pub(crate) fn settle_after_move(pos: &mut Position, mover: Side) {
    let outcome = detect_outcome(pos);
    pos.set_outcome(outcome);
    if outcome.is_terminal() {
        debug!(?outcome, "game finished");
        pos.set_side_to_act(mover);
        return;
    }

    let opponent = mover.other();
    if has_any_move(pos, opponent) {
        pos.set_side_to_act(opponent);
    } else {
        debug!(skipped = ?opponent, "side has no move, turn passes back");
        pos.set_side_to_act(mover);
    }
}

/// True when the side to act is the one that just moved, i.e. the opponent
/// had to pass. `before` is the position the move was played on.
pub fn opponent_skipped(before: &Position, after: &Position) -> bool {
    !after.is_terminal() && after.side_to_act() == before.side_to_act()
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
