//! Randomised whole-game checks.
//!
//! Each seed plays a full game with uniformly chosen legal moves and checks
//! the invariants that must hold after every ply.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rayon::prelude::*;

use pawn_core::{
    EngineError, IllegalMove, Move, Position, Side, Square, legal_moves_into, opponent_skipped,
};

const SEEDS: u64 = 64;
/// Every pawn can advance at most six times before it scores.
const MAX_PLIES: usize = 16 * 7;

fn play_out(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let starting = if rng.gen_bool(0.5) { Side::White } else { Side::Black };
    let human = if rng.gen_bool(0.5) { Side::White } else { Side::Black };
    let mut pos = Position::new_game(starting, human);
    let mut moves = Vec::new();

    for ply in 0..=MAX_PLIES {
        if pos.is_terminal() {
            legal_moves_into(&pos, &mut moves);
            assert!(moves.is_empty(), "seed {seed}: moves after game end");
            return;
        }

        legal_moves_into(&pos, &mut moves);
        assert!(!moves.is_empty(), "seed {seed}: side to act cannot move at ply {ply}");

        // A random request outside the legal set must be refused.
        let candidate = random_move(&mut rng);
        if !moves.contains(&candidate) {
            assert!(
                matches!(pos.apply_move(candidate), Err(EngineError::IllegalMove(_))),
                "seed {seed}: accepted {candidate}"
            );
        }

        let &mv = moves.choose(&mut rng).unwrap_or_else(|| panic!("seed {seed}: no move"));
        let next = pos.apply_move(mv).unwrap();

        for side in [Side::White, Side::Black] {
            assert!(next.pawn_count(side) <= pos.pawn_count(side));
        }
        assert!(pos.pawn_count(Side::White) + pos.pawn_count(Side::Black) <= 16);
        if opponent_skipped(&pos, &next) {
            assert_eq!(next.side_to_act(), pos.side_to_act());
        }
        pos = next;
    }
    panic!("seed {seed}: game did not finish within {MAX_PLIES} plies");
}

fn random_move(rng: &mut StdRng) -> Move {
    let mut square = || {
        Square::new(rng.gen_range(0..8), rng.gen_range(0..8)).unwrap_or_else(|| unreachable!())
    };
    Move::new(square(), square())
}

#[test]
fn random_games_always_finish_cleanly() {
    (0..SEEDS).into_par_iter().for_each(play_out);
}

#[test]
fn off_board_coordinates_are_rejected() {
    assert_eq!(
        Move::from_coords(0, 7, 0, 8),
        Err(IllegalMove::OffBoard { file: 0, rank: 8 })
    );
    assert_eq!(
        Move::from_coords(-1, 6, 0, 5),
        Err(IllegalMove::OffBoard { file: -1, rank: 6 })
    );
    assert!(Move::from_coords(3, 7, 3, 6).is_ok());
}
