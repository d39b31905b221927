//! Core dots-and-boxes rules: grid geometry, the board value type with move
//! application and square detection, and the lazily built game tree.

mod board;
mod grid;
mod side;
mod tree;

pub use board::{Board, Move};
pub use grid::{Grid, Line, Orientation, Square};
pub use side::Side;
pub use tree::{Children, GameTree, NodeId};
