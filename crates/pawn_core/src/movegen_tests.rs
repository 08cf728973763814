use super::*;
use crate::diagram::parse_diagram;

fn sq(file: i8, rank: i8) -> Square {
    Square::new(file, rank).unwrap()
}

fn targets(pos: &Position, from: Square) -> Vec<Square> {
    let mut out = Vec::new();
    pawn_targets_into(pos, from, &mut out);
    out
}

#[test]
fn test_startpos_moves() {
    let pos = Position::new_game(Side::Black, Side::White);
    let mut moves = Vec::new();
    legal_moves_into(&pos, &mut moves);
    // Every pawn has a single and a double advance
    assert_eq!(moves.len(), 16);
    assert!(moves.iter().all(|mv| pos.cell(mv.from) == Cell::Pawn(Side::Black)));
}

#[test]
fn test_home_rank_double_advance_comes_first() {
    let pos = Position::new_game(Side::Black, Side::White);
    let t = targets(&pos, sq(2, 0));
    assert_eq!(t, vec![sq(2, 2), sq(2, 1)]);
    assert!(!t.contains(&sq(1, 1)));
    assert!(!t.contains(&sq(3, 1)));
}

#[test]
fn test_human_pawns_advance_downward() {
    let pos = Position::new_game(Side::White, Side::White);
    assert_eq!(targets(&pos, sq(3, 7)), vec![sq(3, 5), sq(3, 6)]);
}

#[test]
fn test_blocked_straight_leaves_only_capture() {
    let pos = parse_diagram(
        "........
         ........
         ........
         ........
         ........
         ..B.....
         ..WW....
         ........",
        Side::White,
        Side::Black,
    )
    .unwrap();
    assert_eq!(targets(&pos, sq(2, 5)), vec![sq(3, 6)]);
}

#[test]
fn test_no_diagonal_onto_own_pawn() {
    let pos = parse_diagram(
        "........
         ........
         ........
         ...B....
         ....B...
         ........
         .......W
         ........",
        Side::White,
        Side::Black,
    )
    .unwrap();
    assert_eq!(targets(&pos, sq(3, 3)), vec![sq(3, 4)]);
}

#[test]
fn test_edge_files_offer_one_diagonal() {
    let pos = parse_diagram(
        "........
         ........
         ........
         B......B
         WW....WW
         ........
         ........
         ........",
        Side::White,
        Side::Black,
    )
    .unwrap();
    assert_eq!(targets(&pos, sq(0, 3)), vec![sq(1, 4)]);
    assert_eq!(targets(&pos, sq(7, 3)), vec![sq(6, 4)]);
}

#[test]
fn test_corner_on_home_rank() {
    let pos = parse_diagram(
        "B.......
         .W......
         ........
         ........
         ........
         ........
         ........
         .......W",
        Side::White,
        Side::Black,
    )
    .unwrap();
    assert_eq!(targets(&pos, sq(0, 0)), vec![sq(0, 2), sq(0, 1), sq(1, 1)]);
}

#[test]
fn test_double_advance_ignores_blocked_path_by_default() {
    let diagram = "....B...
                   ....W...
                   ........
                   ........
                   ........
                   ........
                   ........
                   W.......";
    let pos = parse_diagram(diagram, Side::White, Side::Black).unwrap();
    assert_eq!(targets(&pos, sq(4, 0)), vec![sq(4, 2)]);

    let strict = pos.with_rules(RuleSet {
        double_step_requires_clear_path: true,
    });
    assert!(targets(&strict, sq(4, 0)).is_empty());
}

#[test]
fn test_legal_moves_lists_blocked_pawns() {
    let pos = parse_diagram(
        "........
         ........
         ........
         ...B....
         ...W....
         ........
         ........
         ......W.",
        Side::White,
        Side::White,
    )
    .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0].from, sq(3, 4));
    assert!(moves[0].targets.is_empty());
    assert_eq!(moves[1].from, sq(6, 7));
    assert_eq!(moves[1].targets, vec![sq(6, 5), sq(6, 6)]);
}

#[test]
fn test_finished_game_has_no_legal_moves() {
    let pos = parse_diagram(
        "...W....
         ........
         ........
         ........
         ........
         ........
         ........
         B.......",
        Side::White,
        Side::Black,
    )
    .unwrap();
    assert!(pos.is_terminal());
    assert!(legal_moves(&pos).is_empty());
    assert!(successors(&pos).is_empty());
}

#[test]
fn test_successors_follow_generation_order() {
    let pos = Position::new_game(Side::Black, Side::White);
    let succ = successors(&pos);
    assert_eq!(succ.len(), 16);
    assert_eq!(succ[0].0, Move::new(sq(0, 0), sq(0, 2)));
    assert_eq!(succ[1].0, Move::new(sq(0, 0), sq(0, 1)));
    assert_eq!(succ[15].0, Move::new(sq(7, 0), sq(7, 1)));
    assert_eq!(succ[0].1.side_to_act(), Side::White);
}
