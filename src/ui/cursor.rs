use crate::game::{Grid, Line, Orientation};

/// Keyboard-driven selection of a line on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    line: Line,
}

impl Cursor {
    pub fn new() -> Self {
        Cursor {
            line: Line::horizontal(0, 0),
        }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    /// Largest `(i, j)` a line of the given orientation can have on `grid`.
    fn max_index(grid: Grid, orientation: Orientation) -> (usize, usize) {
        match orientation {
            Orientation::Horizontal => (grid.columns() - 2, grid.rows() - 1),
            Orientation::Vertical => (grid.columns() - 1, grid.rows() - 2),
        }
    }

    fn clamp(&mut self, grid: Grid) {
        let (max_i, max_j) = Self::max_index(grid, self.line.orientation);
        self.line.i = self.line.i.min(max_i);
        self.line.j = self.line.j.min(max_j);
    }

    pub fn left(&mut self) {
        self.line.i = self.line.i.saturating_sub(1);
    }

    pub fn right(&mut self, grid: Grid) {
        self.line.i += 1;
        self.clamp(grid);
    }

    pub fn up(&mut self) {
        self.line.j = self.line.j.saturating_sub(1);
    }

    pub fn down(&mut self, grid: Grid) {
        self.line.j += 1;
        self.clamp(grid);
    }

    /// Switch between horizontal and vertical, staying as close as possible.
    pub fn toggle(&mut self, grid: Grid) {
        self.line.orientation = self.line.orientation.flipped();
        self.clamp(grid);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}
