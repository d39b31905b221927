use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Orientation of a line between two adjacent dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }

    /// Get the other orientation
    pub fn flipped(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A line identified by orientation and the dot it starts from (upper/left end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Line {
    pub orientation: Orientation,
    pub i: usize,
    pub j: usize,
}

impl Line {
    pub fn horizontal(i: usize, j: usize) -> Self {
        Line {
            orientation: Orientation::Horizontal,
            i,
            j,
        }
    }

    pub fn vertical(i: usize, j: usize) -> Self {
        Line {
            orientation: Orientation::Vertical,
            i,
            j,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation.is_vertical()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.orientation {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        };
        write!(f, "{kind} ({}, {})", self.i, self.j)
    }
}

/// A unit cell, identified by its upper-left dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    pub i: usize,
    pub j: usize,
}

/// Dot-grid dimensions and the index arithmetic for its lines.
///
/// Horizontal line `(i, j)` is stored at `i * rows + j`, vertical line `(i, j)`
/// at `i + columns * j`. Enumeration order of legal moves follows these indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    columns: usize,
    rows: usize,
}

/// Unchecked dimensions as they appear on the wire.
#[derive(Deserialize)]
struct RawGrid {
    columns: usize,
    rows: usize,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GameError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Grid::new(raw.columns, raw.rows)
    }
}

impl Grid {
    /// Create a grid of `columns` x `rows` dots. Both must be at least 2.
    pub fn new(columns: usize, rows: usize) -> Result<Self, GameError> {
        if columns < 2 || rows < 2 {
            return Err(GameError::InvalidGeometry { columns, rows });
        }
        Ok(Grid { columns, rows })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn horizontal_count(&self) -> usize {
        (self.columns - 1) * self.rows
    }

    pub fn vertical_count(&self) -> usize {
        self.columns * (self.rows - 1)
    }

    /// Total number of lines, `m`.
    pub fn line_count(&self) -> usize {
        self.horizontal_count() + self.vertical_count()
    }

    pub fn square_count(&self) -> usize {
        (self.columns - 1) * (self.rows - 1)
    }

    /// Check whether a line lies on this grid
    pub fn contains(&self, line: Line) -> bool {
        match line.orientation {
            Orientation::Horizontal => line.i + 1 < self.columns && line.j < self.rows,
            Orientation::Vertical => line.i < self.columns && line.j + 1 < self.rows,
        }
    }

    pub fn contains_square(&self, square: Square) -> bool {
        square.i + 1 < self.columns && square.j + 1 < self.rows
    }

    pub(crate) fn horizontal_index(&self, i: usize, j: usize) -> usize {
        i * self.rows + j
    }

    pub(crate) fn vertical_index(&self, i: usize, j: usize) -> usize {
        i + self.columns * j
    }

    pub(crate) fn horizontal_at(&self, index: usize) -> Line {
        Line::horizontal(index / self.rows, index % self.rows)
    }

    pub(crate) fn vertical_at(&self, index: usize) -> Line {
        Line::vertical(index % self.columns, index / self.columns)
    }

    /// All lines of the grid in enumeration order: horizontals, then verticals.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        let horizontals = (0..self.horizontal_count()).map(|k| self.horizontal_at(k));
        let verticals = (0..self.vertical_count()).map(|k| self.vertical_at(k));
        horizontals.chain(verticals)
    }

    /// The four lines bounding a square: top, bottom, left, right.
    pub fn square_sides(&self, square: Square) -> [Line; 4] {
        let Square { i, j } = square;
        [
            Line::horizontal(i, j),
            Line::horizontal(i, j + 1),
            Line::vertical(i, j),
            Line::vertical(i + 1, j),
        ]
    }

    /// Squares that a line borders (one on the edge, two inside).
    pub fn adjacent_squares(&self, line: Line) -> Vec<Square> {
        let mut squares = Vec::with_capacity(2);
        match line.orientation {
            Orientation::Vertical => {
                if line.i > 0 {
                    squares.push(Square {
                        i: line.i - 1,
                        j: line.j,
                    });
                }
                if line.i + 1 < self.columns {
                    squares.push(Square { i: line.i, j: line.j });
                }
            }
            Orientation::Horizontal => {
                if line.j + 1 < self.rows {
                    squares.push(Square { i: line.i, j: line.j });
                }
                if line.j > 0 {
                    squares.push(Square {
                        i: line.i,
                        j: line.j - 1,
                    });
                }
            }
        }
        squares
    }
}
