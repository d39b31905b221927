//! A game in progress: the shared game tree, the node the game is currently
//! at, and the moves played so far.

use std::collections::HashMap;

use crate::ai::choose_move;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Board, GameTree, Grid, Line, Move, NodeId, Side, Square};

const DEFAULT_COMPACT_THRESHOLD: usize = 200_000;

pub struct Session {
    tree: GameTree,
    current: NodeId,
    history: Vec<Move>,
    compact_threshold: usize,
}

impl Session {
    /// Start a game on a fresh board.
    pub fn new_game(
        columns: usize,
        rows: usize,
        starting: Side,
        extend_turn_on_score: bool,
    ) -> Result<Self, GameError> {
        let grid = Grid::new(columns, rows)?;
        let tree = GameTree::new(Board::new(grid, starting, extend_turn_on_score));
        Ok(Session {
            current: tree.root(),
            tree,
            history: Vec::new(),
            compact_threshold: DEFAULT_COMPACT_THRESHOLD,
        })
    }

    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        Self::new_game(
            config.columns,
            config.rows,
            config.starting_side(),
            config.extend_turn_on_score,
        )
    }

    /// Set the arena size above which unreachable branches are dropped.
    pub fn with_compact_threshold(mut self, compact_threshold: usize) -> Self {
        self.compact_threshold = compact_threshold.max(1);
        self
    }

    /// Throw away the current game and start over with new rules. On error the
    /// current game is kept.
    pub fn reset(&mut self, config: &GameConfig) -> Result<(), GameError> {
        let fresh = Self::new(config)?;
        self.tree = fresh.tree;
        self.current = fresh.current;
        self.history.clear();
        tracing::debug!(
            columns = config.columns,
            rows = config.rows,
            starting = config.starting_side().name(),
            extend_turn_on_score = config.extend_turn_on_score,
            "game reset"
        );
        Ok(())
    }

    pub fn board(&self) -> &Board {
        self.tree.board(self.current)
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut GameTree {
        &mut self.tree
    }

    /// Every move played this game, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn moves_made(&self) -> usize {
        self.board().moves_made()
    }

    pub fn is_terminal(&self) -> bool {
        self.board().is_terminal()
    }

    pub fn player_score(&self) -> u32 {
        self.board().player_score()
    }

    pub fn opponent_score(&self) -> u32 {
        self.board().opponent_score()
    }

    pub fn turn_is_opponent(&self) -> bool {
        self.board().turn_is_opponent()
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.board().last_move()
    }

    /// Boards reachable in one move, in enumeration order. Each carries the
    /// move that leads to it.
    pub fn legal_moves(&mut self) -> Vec<&Board> {
        let children = self.tree.expand(self.current).to_vec();
        children.into_iter().map(|id| self.tree.board(id)).collect()
    }

    /// Draw `line` for the side to move and advance to the matching child.
    pub fn apply_move(&mut self, line: Line) -> Result<&Board, GameError> {
        self.board().check_legal(line)?;
        let child = match self.tree.child_for(self.current, line) {
            Some(child) => child,
            None => unreachable!("a legal line always has a child"),
        };
        self.advance(child);
        Ok(self.board())
    }

    /// Let the opponent pick its move with the given look-ahead and advance.
    pub fn choose_move(&mut self, depth: usize) -> Result<&Board, GameError> {
        let child = choose_move(&mut self.tree, self.current, depth)?;
        self.advance(child);
        Ok(self.board())
    }

    /// Which side closed each completed square.
    pub fn square_owners(&self) -> HashMap<Square, Side> {
        self.history
            .iter()
            .flat_map(|mv| mv.completed.iter().map(move |&square| (square, mv.side)))
            .collect()
    }

    fn advance(&mut self, child: NodeId) {
        let board = self.tree.board(child);
        if let Some(mv) = board.last_move() {
            tracing::debug!(
                side = mv.side.name(),
                line = %mv.line,
                completed = mv.completed.len(),
                moves_made = board.moves_made(),
                player_score = board.player_score(),
                opponent_score = board.opponent_score(),
                "move applied"
            );
            self.history.push(mv.clone());
        }
        self.current = child;

        if self.tree.len() > self.compact_threshold {
            let before = self.tree.len();
            self.current = self.tree.retain_subtree(child);
            tracing::debug!(before, after = self.tree.len(), "game tree compacted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IllegalMoveReason, Precondition};
    use crate::game::Children;

    fn session(columns: usize, rows: usize, starting: Side, extend: bool) -> Session {
        Session::new_game(columns, rows, starting, extend).unwrap()
    }

    #[test]
    fn test_new_game_rejects_bad_geometry() {
        assert!(matches!(
            Session::new_game(1, 3, Side::Player, false),
            Err(GameError::InvalidGeometry { columns: 1, rows: 3 })
        ));
    }

    #[test]
    fn test_legal_moves_count() {
        let mut session = session(3, 3, Side::Player, false);
        assert_eq!(session.legal_moves().len(), 12);
        session.apply_move(Line::horizontal(0, 0)).unwrap();
        assert_eq!(session.legal_moves().len(), 11);
        for board in session.legal_moves() {
            assert!(board.last_move().is_some());
        }
    }

    #[test]
    fn test_apply_move_reuses_built_children() {
        let mut session = session(3, 3, Side::Player, false);
        let root = session.current();
        // Build two levels below the root
        session.tree_mut().score(root, 2);
        let child = session.tree_mut().child_for(root, Line::vertical(1, 1)).unwrap();
        let built = session.tree().built_children(child).map(|ids| ids.to_vec());
        assert!(built.is_some());

        let tree_len = session.tree().len();
        session.apply_move(Line::vertical(1, 1)).unwrap();
        assert_eq!(session.current(), child);
        assert_eq!(session.tree().len(), tree_len);
        assert_eq!(
            session.tree().built_children(session.current()).map(|ids| ids.to_vec()),
            built
        );
    }

    #[test]
    fn test_illegal_move_leaves_session_unchanged() {
        let mut session = session(3, 3, Side::Player, false);
        session.apply_move(Line::horizontal(1, 2)).unwrap();
        let current = session.current();

        let err = session.apply_move(Line::horizontal(1, 2)).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                line: Line::horizontal(1, 2),
                reason: IllegalMoveReason::AlreadyFilled,
            }
        );
        let err = session.apply_move(Line::vertical(0, 5)).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalMove {
                reason: IllegalMoveReason::OutOfRange,
                ..
            }
        ));
        assert_eq!(session.current(), current);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_choose_move_requires_opponent_turn() {
        let mut session = session(3, 3, Side::Player, false);
        let err = session.choose_move(2).unwrap_err();
        assert_eq!(
            err,
            GameError::PreconditionViolation(Precondition::NotOpponentsTurn)
        );
        assert_eq!(session.moves_made(), 0);
    }

    #[test]
    fn test_choose_move_on_finished_game() {
        let mut session = session(2, 2, Side::Player, false);
        let lines = session.board().legal_lines();
        for line in lines {
            session.apply_move(line).unwrap();
        }
        assert!(session.is_terminal());
        let err = session.choose_move(2).unwrap_err();
        assert_eq!(err, GameError::PreconditionViolation(Precondition::GameOver));
    }

    #[test]
    fn test_scenario_two_by_two() {
        let mut session = session(2, 2, Side::Player, false);
        let mut turns = vec![session.turn_is_opponent()];
        for line in [
            Line::horizontal(0, 0),
            Line::horizontal(0, 1),
            Line::vertical(0, 0),
        ] {
            session.apply_move(line).unwrap();
            turns.push(session.turn_is_opponent());
        }
        assert_eq!(session.moves_made(), 3);
        assert_eq!((session.player_score(), session.opponent_score()), (0, 0));
        assert_eq!(turns, vec![false, true, false, true]);

        session.apply_move(Line::vertical(1, 0)).unwrap();
        assert!(session.is_terminal());
        assert_eq!(session.opponent_score(), 1);
        assert_eq!(session.player_score(), 0);
        let last = session.last_move().unwrap();
        assert_eq!(last.side, Side::Opponent);
        assert_eq!(last.completed, vec![Square { i: 0, j: 0 }]);
    }

    #[test]
    fn test_scenario_two_by_two_extension() {
        let mut session = session(2, 2, Side::Player, true);
        for line in [
            Line::horizontal(0, 0),
            Line::horizontal(0, 1),
            Line::vertical(0, 0),
        ] {
            session.apply_move(line).unwrap();
        }
        assert!(session.turn_is_opponent());
        session.apply_move(Line::vertical(1, 0)).unwrap();
        assert!(session.turn_is_opponent());
        assert_eq!(session.opponent_score(), 1);
    }

    #[test]
    fn test_opponent_turn_then_choose_move() {
        let mut session = session(3, 3, Side::Player, false);
        session.apply_move(Line::horizontal(0, 0)).unwrap();
        assert!(session.turn_is_opponent());
        let before = session.board().clone();
        let board = session.choose_move(2).unwrap();
        let line = board.last_move().unwrap().line;
        assert!(!before.is_filled(line));
        assert_eq!(board.moves_made(), 2);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[1].side, Side::Opponent);
    }

    #[test]
    fn test_square_owners_follow_history() {
        let mut session = session(2, 2, Side::Player, false);
        let lines = session.board().legal_lines();
        for line in lines {
            session.apply_move(line).unwrap();
        }
        let owners = session.square_owners();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners.get(&Square { i: 0, j: 0 }), Some(&Side::Opponent));
    }

    #[test]
    fn test_reset_starts_over() {
        let mut session = session(3, 3, Side::Player, false);
        session.apply_move(Line::horizontal(0, 0)).unwrap();

        let config = GameConfig {
            columns: 4,
            rows: 2,
            opponent_starts: true,
            extend_turn_on_score: true,
        };
        session.reset(&config).unwrap();
        assert_eq!(session.moves_made(), 0);
        assert!(session.history().is_empty());
        assert!(session.turn_is_opponent());
        assert_eq!(session.board().grid().line_count(), 10);
        assert_eq!(session.tree().len(), 1);
    }

    #[test]
    fn test_reset_with_bad_geometry_keeps_game() {
        let mut session = session(3, 3, Side::Player, false);
        session.apply_move(Line::horizontal(0, 0)).unwrap();
        let config = GameConfig {
            columns: 0,
            ..GameConfig::default()
        };
        assert!(session.reset(&config).is_err());
        assert_eq!(session.moves_made(), 1);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_compaction_keeps_current_subtree() {
        let mut session = session(3, 3, Side::Opponent, false).with_compact_threshold(50);
        session.choose_move(2).unwrap();
        // 1 + 12 + 132 nodes were built; the session keeps only its own branch
        assert!(session.tree().len() <= 12);
        assert_eq!(session.current(), 0);
        assert_eq!(session.moves_made(), 1);
        assert!(matches!(
            session.tree().children_state(session.current()),
            Children::Built(ids) if ids.len() == 11
        ));
    }

    #[test]
    fn test_full_game_against_opponent() {
        let mut session = session(3, 3, Side::Player, true);
        while !session.is_terminal() {
            if session.turn_is_opponent() {
                session.choose_move(2).unwrap();
            } else {
                let line = session.board().legal_lines()[0];
                session.apply_move(line).unwrap();
            }
        }
        assert_eq!(session.history().len(), 12);
        assert_eq!(session.player_score() + session.opponent_score(), 4);
    }
}
