use serde::Serialize;

use super::grid::{Grid, Line, Orientation, Square};
use super::side::Side;
use crate::error::{GameError, IllegalMoveReason};

/// A drawn line together with who drew it and which squares it closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub side: Side,
    pub line: Line,
    pub completed: Vec<Square>,
}

impl Move {
    pub fn scored(&self) -> bool {
        !self.completed.is_empty()
    }
}

/// One game state: which lines are drawn, the scores so far and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
    turn: Side,
    moves_made: usize,
    extend_turn_on_score: bool,
    player_score: u32,
    opponent_score: u32,
    last_move: Option<Move>,
}

impl Board {
    /// Create an empty board with `starting` to move
    pub fn new(grid: Grid, starting: Side, extend_turn_on_score: bool) -> Self {
        Board {
            grid,
            horizontal: vec![false; grid.horizontal_count()],
            vertical: vec![false; grid.vertical_count()],
            turn: starting,
            moves_made: 0,
            extend_turn_on_score,
            player_score: 0,
            opponent_score: 0,
            last_move: None,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    /// Lines still undrawn; equals the number of children this node has.
    pub fn moves_remaining(&self) -> usize {
        self.grid.line_count() - self.moves_made
    }

    pub fn is_terminal(&self) -> bool {
        self.moves_made == self.grid.line_count()
    }

    /// Side to move next
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn turn_is_opponent(&self) -> bool {
        self.turn.is_opponent()
    }

    pub fn extend_turn_on_score(&self) -> bool {
        self.extend_turn_on_score
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn opponent_score(&self) -> u32 {
        self.opponent_score
    }

    pub fn score_of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Opponent => self.opponent_score,
        }
    }

    /// The move that produced this board, `None` on a fresh board.
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// Net squares in the opponent's favour.
    pub fn simple_score(&self) -> i32 {
        self.opponent_score as i32 - self.player_score as i32
    }

    /// Whether a line is drawn. Lines off the grid are never drawn.
    pub fn is_filled(&self, line: Line) -> bool {
        if !self.grid.contains(line) {
            return false;
        }
        match line.orientation {
            Orientation::Horizontal => self.horizontal[self.grid.horizontal_index(line.i, line.j)],
            Orientation::Vertical => self.vertical[self.grid.vertical_index(line.i, line.j)],
        }
    }

    /// Number of drawn lines, counted from the line sets themselves.
    pub fn filled_count(&self) -> usize {
        self.horizontal
            .iter()
            .chain(self.vertical.iter())
            .filter(|&&filled| filled)
            .count()
    }

    pub fn is_square_complete(&self, square: Square) -> bool {
        self.grid.contains_square(square)
            && self
                .grid
                .square_sides(square)
                .iter()
                .all(|&side| self.is_filled(side))
    }

    /// Check that a line is on the grid and not yet drawn
    pub fn check_legal(&self, line: Line) -> Result<(), GameError> {
        if !self.grid.contains(line) {
            return Err(GameError::IllegalMove {
                line,
                reason: IllegalMoveReason::OutOfRange,
            });
        }
        if self.is_filled(line) {
            return Err(GameError::IllegalMove {
                line,
                reason: IllegalMoveReason::AlreadyFilled,
            });
        }
        Ok(())
    }

    /// Undrawn lines: horizontals first, then verticals, each in storage order.
    pub fn legal_lines(&self) -> Vec<Line> {
        let horizontals = self
            .horizontal
            .iter()
            .enumerate()
            .filter(|(_, filled)| !**filled)
            .map(|(k, _)| self.grid.horizontal_at(k));
        let verticals = self
            .vertical
            .iter()
            .enumerate()
            .filter(|(_, filled)| !**filled)
            .map(|(k, _)| self.grid.vertical_at(k));
        horizontals.chain(verticals).collect()
    }

    /// Apply a move and return the new board (immutable)
    pub fn apply_move(&self, line: Line) -> Result<Board, GameError> {
        self.check_legal(line)?;
        let mut next = self.clone();
        next.draw(line);
        Ok(next)
    }

    /// Apply a move in place. On error the board is untouched.
    pub fn apply_move_mut(&mut self, line: Line) -> Result<&Move, GameError> {
        self.check_legal(line)?;
        Ok(self.draw(line))
    }

    /// One successor board per undrawn line, in enumeration order.
    pub fn successors(&self) -> Vec<Board> {
        self.legal_lines()
            .into_iter()
            .map(|line| {
                let mut child = self.clone();
                child.draw(line);
                child
            })
            .collect()
    }

    /// Draw a line already known to be legal.
    fn draw(&mut self, line: Line) -> &Move {
        match line.orientation {
            Orientation::Horizontal => {
                let k = self.grid.horizontal_index(line.i, line.j);
                self.horizontal[k] = true;
            }
            Orientation::Vertical => {
                let k = self.grid.vertical_index(line.i, line.j);
                self.vertical[k] = true;
            }
        }
        self.moves_made += 1;

        let completed: Vec<Square> = self
            .grid
            .adjacent_squares(line)
            .into_iter()
            .filter(|&square| self.is_square_complete(square))
            .collect();

        let mover = self.turn;
        let gained = completed.len() as u32;
        match mover {
            Side::Player => self.player_score += gained,
            Side::Opponent => self.opponent_score += gained,
        }

        if !(self.extend_turn_on_score && gained > 0) {
            self.turn = mover.other();
        }

        self.last_move.insert(Move {
            side: mover,
            line,
            completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(columns: usize, rows: usize, extend: bool) -> Board {
        Board::new(Grid::new(columns, rows).unwrap(), Side::Player, extend)
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = board(4, 3, false);
        assert_eq!(board.moves_made(), 0);
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.legal_lines().len(), 17);
        assert!(board.last_move().is_none());
        assert!(!board.is_terminal());
        assert_eq!(board.turn(), Side::Player);
    }

    #[test]
    fn test_single_square_without_extension() {
        let mut board = board(2, 2, false);

        board.apply_move_mut(Line::horizontal(0, 0)).unwrap();
        board.apply_move_mut(Line::horizontal(0, 1)).unwrap();
        board.apply_move_mut(Line::vertical(0, 0)).unwrap();

        assert_eq!(board.moves_made(), 3);
        assert_eq!((board.player_score(), board.opponent_score()), (0, 0));
        // Three flips from Player
        assert_eq!(board.turn(), Side::Opponent);

        let mv = board.apply_move_mut(Line::vertical(1, 0)).unwrap().clone();
        assert_eq!(mv.side, Side::Opponent);
        assert_eq!(mv.completed, vec![Square { i: 0, j: 0 }]);
        assert!(board.is_terminal());
        assert_eq!(board.opponent_score(), 1);
        assert_eq!(board.player_score(), 0);
        assert_eq!(board.turn(), Side::Player);
    }

    #[test]
    fn test_single_square_with_extension_keeps_turn() {
        let mut board = board(2, 2, true);
        board.apply_move_mut(Line::horizontal(0, 0)).unwrap();
        board.apply_move_mut(Line::horizontal(0, 1)).unwrap();
        board.apply_move_mut(Line::vertical(0, 0)).unwrap();

        let before = board.turn_is_opponent();
        board.apply_move_mut(Line::vertical(1, 0)).unwrap();
        assert_eq!(board.turn_is_opponent(), before);
        assert_eq!(board.opponent_score(), 1);
    }

    #[test]
    fn test_line_between_two_squares_completes_both() {
        // 3x2 dots: two squares side by side sharing vertical (1, 0)
        let mut board = board(3, 2, false);
        for line in [
            Line::horizontal(0, 0),
            Line::horizontal(0, 1),
            Line::horizontal(1, 0),
            Line::horizontal(1, 1),
            Line::vertical(0, 0),
            Line::vertical(2, 0),
        ] {
            board.apply_move_mut(line).unwrap();
        }
        let mover = board.turn();
        let mv = board.apply_move_mut(Line::vertical(1, 0)).unwrap().clone();
        assert_eq!(
            mv.completed,
            vec![Square { i: 0, j: 0 }, Square { i: 1, j: 0 }]
        );
        assert_eq!(board.score_of(mover), 2);
        assert!(board.is_terminal());
    }

    #[test]
    fn test_horizontal_completion_checks_both_sides() {
        // 2x3 dots: two squares stacked, sharing horizontal (0, 1)
        let mut board = board(2, 3, false);
        for line in [
            Line::horizontal(0, 0),
            Line::horizontal(0, 2),
            Line::vertical(0, 0),
            Line::vertical(1, 0),
            Line::vertical(0, 1),
            Line::vertical(1, 1),
        ] {
            board.apply_move_mut(line).unwrap();
        }
        let mv = board.apply_move_mut(Line::horizontal(0, 1)).unwrap().clone();
        assert_eq!(
            mv.completed,
            vec![Square { i: 0, j: 1 }, Square { i: 0, j: 0 }]
        );
    }

    #[test]
    fn test_filled_line_rejected_without_mutation() {
        let mut board = board(3, 3, false);
        board.apply_move_mut(Line::vertical(1, 1)).unwrap();
        let snapshot = board.clone();

        let err = board.apply_move_mut(Line::vertical(1, 1)).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                line: Line::vertical(1, 1),
                reason: IllegalMoveReason::AlreadyFilled,
            }
        );
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let board = board(3, 3, false);
        let err = board.apply_move(Line::horizontal(2, 0)).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                line: Line::horizontal(2, 0),
                reason: IllegalMoveReason::OutOfRange,
            }
        );
        assert!(board.apply_move(Line::vertical(0, 2)).is_err());
        assert!(!board.is_filled(Line::vertical(9, 9)));
    }

    #[test]
    fn test_apply_move_leaves_original_untouched() {
        let board = board(3, 3, false);
        let next = board.apply_move(Line::horizontal(0, 0)).unwrap();
        assert_eq!(board.moves_made(), 0);
        assert_eq!(next.moves_made(), 1);
        assert!(next.is_filled(Line::horizontal(0, 0)));
        assert!(!board.is_filled(Line::horizontal(0, 0)));
    }

    #[test]
    fn test_successors_match_legal_lines() {
        let mut board = board(3, 3, false);
        board.apply_move_mut(Line::horizontal(1, 1)).unwrap();
        board.apply_move_mut(Line::vertical(0, 0)).unwrap();

        let lines = board.legal_lines();
        let successors = board.successors();
        assert_eq!(successors.len(), board.moves_remaining());
        for (line, child) in lines.iter().zip(&successors) {
            assert_eq!(child.last_move().map(|m| m.line), Some(*line));
            assert_eq!(child.moves_made(), board.moves_made() + 1);
            assert_eq!(child.filled_count(), child.moves_made());
        }
    }

    #[test]
    fn test_legal_lines_order() {
        let board = board(3, 2, false);
        let lines = board.legal_lines();
        assert_eq!(
            lines,
            vec![
                Line::horizontal(0, 0),
                Line::horizontal(0, 1),
                Line::horizontal(1, 0),
                Line::horizontal(1, 1),
                Line::vertical(0, 0),
                Line::vertical(1, 0),
                Line::vertical(2, 0),
            ]
        );
    }

    #[test]
    fn test_simple_score() {
        let mut board = board(2, 2, false);
        for line in board.legal_lines() {
            board.apply_move_mut(line).unwrap();
        }
        // Fourth move is Opponent's when Player starts and nothing scores earlier
        assert_eq!(board.simple_score(), 1);
    }
}
