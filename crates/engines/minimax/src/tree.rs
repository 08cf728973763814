//! Full-width, fixed-depth search tree.
//!
//! Every node owns its children; nothing points back up. Nodes keep their
//! own static evaluation and, after [`SearchTree::back_up`], add the value
//! of the reply the side to act would pick. Below the root's children the
//! tree is walked depth-first and folded into a single value per child.

use serde::{Deserialize, Serialize};

use pawn_core::{Move, Position, Role, successors};

use crate::eval::evaluate;

/// Which root child wins when several share the best value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootTieBreak {
    /// Scan from the last generated child backwards (reference behaviour).
    #[default]
    LatestChild,
    /// Scan from the first generated child forwards, as inner nodes do.
    EarliestChild,
}

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub position: Position,
    /// Static evaluation, plus the chosen reply's value once backed up
    pub evaluation: f64,
    /// Distance from the root
    pub ply: u8,
    /// Move that led here from the parent; `None` at the root
    pub mv: Option<Move>,
    /// Generation order. Only the root keeps its children; deeper levels
    /// are folded into `reply` while the tree is built.
    pub children: Vec<SearchNode>,
    /// Backed-up value of the reply the side to act would pick, `None`
    /// when the search stopped here
    pub reply: Option<f64>,
    pub leaf: bool,
}

impl SearchNode {
    fn new(position: Position, mv: Option<Move>, ply: u8) -> Self {
        SearchNode {
            position,
            evaluation: evaluate(&position, ply),
            ply,
            mv,
            children: Vec::new(),
            reply: None,
            leaf: true,
        }
    }

    /// Root-level child: its whole subtree is searched and dropped, only
    /// the value it backs up is kept.
    fn folded(position: Position, mv: Move, depth: u8, nodes: &mut u64) -> Self {
        *nodes += 1;
        let mut node = SearchNode::new(position, Some(mv), 1);
        node.reply = best_reply(&position, 1, depth, nodes);
        node.leaf = node.reply.is_none();
        node
    }

    fn back_up(&mut self) {
        for child in &mut self.children {
            child.back_up();
        }
        let maximise = self.position.role_to_act() == Role::Machine;
        let values: Vec<f64> = self.children.iter().map(|c| c.evaluation).collect();
        if let Some(idx) = pick_child(&values, maximise) {
            self.evaluation += values[idx];
        } else if let Some(reply) = self.reply.take() {
            self.evaluation += reply;
        }
    }
}

/// Depth-first minimax value of the best reply from `position`, which sits
/// `ply` plies below the root. Nothing below `position` outlives the call.
fn best_reply(position: &Position, ply: u8, depth: u8, nodes: &mut u64) -> Option<f64> {
    if ply >= depth || position.is_terminal() {
        return None;
    }
    let values: Vec<f64> = successors(position)
        .into_iter()
        .map(|(_, next)| {
            *nodes += 1;
            let child_ply = ply + 1;
            let backed = best_reply(&next, child_ply, depth, nodes).unwrap_or(0.0);
            evaluate(&next, child_ply) + backed
        })
        .collect();
    let maximise = position.role_to_act() == Role::Machine;
    pick_child(&values, maximise).map(|idx| values[idx])
}

/// Index of the max (or min) value, first one wins on ties.
pub(crate) fn pick_child(values: &[f64], maximise: bool) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, &value) in values.iter().enumerate() {
        let better = match best {
            None => true,
            Some(b) if maximise => value > values[b],
            Some(b) => value < values[b],
        };
        if better {
            best = Some(idx);
        }
    }
    best
}

/// Index of the root child with the highest value under `tie_break`.
pub(crate) fn select_root(children: &[SearchNode], tie_break: RootTieBreak) -> Option<usize> {
    let values: Vec<f64> = children.iter().map(|c| c.evaluation).collect();
    match tie_break {
        RootTieBreak::EarliestChild => pick_child(&values, true),
        RootTieBreak::LatestChild => {
            let last = values.len().checked_sub(1)?;
            Some((0..last).rev().fold(last, |best, idx| {
                if values[idx] > values[best] { idx } else { best }
            }))
        }
    }
}

/// A tree built for one machine turn and dropped once the move is chosen.
///
/// Every position down to `depth` plies is visited, but only the root and
/// its children are resident at the end, so memory stays flat while the
/// node count grows with the branching factor.
#[derive(Debug, Clone)]
pub struct SearchTree {
    pub root: SearchNode,
    pub depth: u8,
    /// Nodes visited, root included
    pub nodes: u64,
}

impl SearchTree {
    /// Visits every node down to `depth` plies, stopping early on finished
    /// games. No pruning or move ordering.
    pub fn build(position: &Position, depth: u8) -> Self {
        let mut nodes = 1;
        let mut root = SearchNode::new(*position, None, 0);
        if depth > 0 && !position.is_terminal() {
            root.children = successors(position)
                .into_iter()
                .map(|(mv, next)| SearchNode::folded(next, mv, depth, &mut nodes))
                .collect();
        }
        root.leaf = root.children.is_empty();
        SearchTree { root, depth, nodes }
    }

    /// Minimax back-up: machine nodes add their best reply, human nodes
    /// their worst. Call once per build.
    pub fn back_up(&mut self) {
        self.root.back_up();
    }

    /// Best root child, `None` when the root has no children.
    pub fn best_child(&self, tie_break: RootTieBreak) -> Option<&SearchNode> {
        select_root(&self.root.children, tie_break).map(|idx| &self.root.children[idx])
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
