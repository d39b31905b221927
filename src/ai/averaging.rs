use crate::error::{GameError, Precondition};
use crate::game::{GameTree, Line, NodeId};

use super::agent::Agent;

/// Score every move available at `node` by averaging over all continuations up
/// to `depth` further moves. Returns `(child, score)` in enumeration order.
pub fn scored_children(
    tree: &mut GameTree,
    node: NodeId,
    depth: usize,
) -> Result<Vec<(NodeId, f64)>, GameError> {
    let board = tree.board(node);
    if board.is_terminal() {
        return Err(Precondition::GameOver.into());
    }
    if !board.turn_is_opponent() {
        return Err(Precondition::NotOpponentsTurn.into());
    }

    // The horizon is an absolute move count, so deeper nodes see less of it.
    let horizon = depth + board.moves_made();
    let children = tree.expand(node).to_vec();
    Ok(children
        .into_iter()
        .map(|child| (child, tree.score(child, horizon)))
        .collect())
}

/// Pick the opponent's move: the child with the highest averaged score, the
/// first one in enumeration order on ties.
pub fn choose_move(tree: &mut GameTree, node: NodeId, depth: usize) -> Result<NodeId, GameError> {
    let mut best: Option<(NodeId, f64)> = None;
    for (child, score) in scored_children(tree, node, depth)? {
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((child, score));
        }
    }
    // A non-terminal board always has at least one child.
    best.map(|(child, _)| child)
        .ok_or(GameError::PreconditionViolation(Precondition::GameOver))
}

/// The automated opponent: greedy at the root over averaged subtree scores.
pub struct AveragingOpponent {
    depth: usize,
}

impl AveragingOpponent {
    pub fn new(depth: usize) -> Self {
        AveragingOpponent { depth }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Agent for AveragingOpponent {
    fn select_line(&mut self, tree: &mut GameTree, node: NodeId) -> Result<Line, GameError> {
        let child = choose_move(tree, node, self.depth)?;
        match tree.board(child).last_move() {
            Some(mv) => Ok(mv.line),
            None => unreachable!("child boards always carry their move"),
        }
    }

    fn name(&self) -> &str {
        "Averaging"
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        Box::new(AveragingOpponent::new(self.depth))
    }
}
