use crate::{
    error::{EngineError, EngineResult, IllegalMove},
    movegen::pawn_targets_into,
    rules,
    types::*,
};

/// One immutable game-state snapshot.
///
/// Every applied move yields a fresh `Position`; the value is `Copy`, so
/// search trees hold independent snapshots without sharing any grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    cells: [Cell; 64],
    human: Side,
    starter: Side,
    to_act: Side,
    outcome: Outcome,
    rules: RuleSet,
}

impl Position {
    /// Initial layout: the machine's pawns fill rank 0, the human's rank 7.
    pub fn new_game(starting: Side, human: Side) -> Self {
        let mut cells = [Cell::Empty; 64];
        let machine = human.other();
        for file in 0..SIZE {
            for (side, rank) in [(machine, Role::Machine.home_rank()), (human, Role::Human.home_rank())] {
                if let Some(sq) = Square::new(file, rank) {
                    cells[sq.idx()] = Cell::Pawn(side);
                }
            }
        }
        Position {
            cells,
            human,
            starter: starting,
            to_act: starting,
            outcome: Outcome::Ongoing,
            rules: RuleSet::default(),
        }
    }

    /// Builds a position from an explicit grid. The outcome is derived from
    /// the grid the same way it is after a move.
    pub fn from_cells(cells: [Cell; 64], human: Side, to_act: Side) -> Self {
        let mut pos = Position {
            cells,
            human,
            starter: to_act,
            to_act,
            outcome: Outcome::Ongoing,
            rules: RuleSet::default(),
        };
        pos.outcome = rules::detect_outcome(&pos);
        pos
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn cell(&self, sq: Square) -> Cell {
        self.cells[sq.idx()]
    }

    pub fn human_side(&self) -> Side {
        self.human
    }

    pub fn machine_side(&self) -> Side {
        self.human.other()
    }

    /// The side that made the first move of the game.
    pub fn starter(&self) -> Side {
        self.starter
    }

    pub fn side_to_act(&self) -> Side {
        self.to_act
    }

    pub fn role_of(&self, side: Side) -> Role {
        if side == self.human {
            Role::Human
        } else {
            Role::Machine
        }
    }

    pub fn side_of(&self, role: Role) -> Side {
        match role {
            Role::Human => self.human,
            Role::Machine => self.machine_side(),
        }
    }

    pub fn role_to_act(&self) -> Role {
        self.role_of(self.to_act)
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn winner(&self) -> Option<Side> {
        self.outcome.winner()
    }

    /// Squares holding a pawn of `side`, file-major.
    pub fn pawns(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.cell(sq) == Cell::Pawn(side))
    }

    pub fn pawn_count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Pawn(side))
            .count()
    }

    /// Ranks a pawn on `sq` has travelled from its owner's home rank.
    pub fn advancement(&self, sq: Square, side: Side) -> i8 {
        (sq.rank() - self.role_of(side).home_rank()).abs()
    }

    /// The same game seen from the other player: roles swap and ranks flip,
    /// so the new machine side again starts on rank 0.
    pub fn mirrored(&self) -> Position {
        let mut cells = [Cell::Empty; 64];
        for sq in Square::all() {
            cells[sq.mirrored().idx()] = self.cell(sq);
        }
        Position {
            cells,
            human: self.human.other(),
            ..*self
        }
    }

    /// Applies a move for the side to act and returns the successor.
    ///
    /// Refuses moves on a finished game and any move outside the legal set.
    pub fn apply_move(&self, mv: Move) -> EngineResult<Position> {
        if self.is_terminal() {
            return Err(EngineError::GameOver);
        }
        if self.cell(mv.from) != Cell::Pawn(self.to_act) {
            return Err(IllegalMove::NoPawn(mv.from).into());
        }
        let mut targets = Vec::with_capacity(4);
        pawn_targets_into(self, mv.from, &mut targets);
        if !targets.contains(&mv.to) {
            return Err(IllegalMove::NotLegal {
                from: mv.from,
                to: mv.to,
            }
            .into());
        }
        Ok(self.play_unchecked(mv))
    }

    /// Plays a move already known to be legal: relocates the pawn (a capture
    /// overwrites the target), then settles outcome and turn.
    pub(crate) fn play_unchecked(&self, mv: Move) -> Position {
        let mut next = *self;
        next.cells[mv.to.idx()] = next.cells[mv.from.idx()];
        next.cells[mv.from.idx()] = Cell::Empty;
        rules::settle_after_move(&mut next, self.to_act);
        next
    }

    pub(crate) fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }

    pub(crate) fn set_side_to_act(&mut self, side: Side) {
        self.to_act = side;
    }

    /// One line per rank, rank 0 first, using `W`, `B` and `.`.
    pub fn diagram(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in 0..SIZE {
            for file in 0..SIZE {
                if let Some(sq) = Square::new(file, rank) {
                    out.push(self.cell(sq).symbol());
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
