// grid.rs - Grid types for Conway's Game of Life

use std::fmt;

use crate::error::{GridError, Result};

/// Default board height.
pub const DEFAULT_ROWS: usize = 20;
/// Default board width.
pub const DEFAULT_COLS: usize = 80;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }

    fn glyph(self) -> char {
        match self {
            CellState::Alive => 'O',
            CellState::Dead => '.',
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

impl TryFrom<u8> for CellState {
    type Error = GridError;

    fn try_from(raw: u8) -> Result<Self> {
        match raw {
            0 => Ok(CellState::Dead),
            1 => Ok(CellState::Alive),
            other => Err(GridError::bad_cell(other)),
        }
    }
}

impl TryFrom<char> for CellState {
    type Error = GridError;

    fn try_from(raw: char) -> Result<Self> {
        match raw {
            '.' => Ok(CellState::Dead),
            'O' | '*' => Ok(CellState::Alive),
            other => Err(GridError::bad_cell(other)),
        }
    }
}

/// A fixed-size rectangle of cells, stored row-major as `cells[row][col]`.
///
/// Grids built by [`Grid::dead`], [`Grid::parse`], `seed` and `step` are
/// always rectangular. [`Grid::from_rows`] trusts its input, so a grid built
/// that way is only checked when it is validated or stepped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cols: usize,
    cells: Vec<Vec<CellState>>,
}

impl Grid {
    /// A grid of the given size with every cell dead.
    pub fn dead(rows: usize, cols: usize) -> Self {
        Self { cols, cells: vec![vec![CellState::Dead; cols]; rows] }
    }

    /// Wraps pre-built rows with a declared column count. No shape check.
    pub fn from_rows(cols: usize, cells: Vec<Vec<CellState>>) -> Self {
        Self { cols, cells }
    }

    /// Builds a grid from raw cell values (`0` dead, `1` alive), checking
    /// both the values and the shape.
    pub fn from_raw(cols: usize, raw: &[Vec<u8>]) -> Result<Self> {
        let cells = raw
            .iter()
            .map(|row| row.iter().map(|&v| CellState::try_from(v)).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        let grid = Self { cols, cells };
        grid.validate()?;
        Ok(grid)
    }

    /// Parses the plaintext form: one line per row, `.` dead, `O` or `*`
    /// alive. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let cells = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(CellState::try_from).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        let cols = cells.first().map_or(0, Vec::len);
        let grid = Self { cols, cells };
        grid.validate()?;
        Ok(grid)
    }

    /// Checks that every row holds exactly `cols` cells.
    pub fn validate(&self) -> Result<()> {
        for (r, row) in self.cells.iter().enumerate() {
            if row.len() != self.cols {
                return Err(GridError::ragged(r, row.len(), self.cols));
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() || self.cols == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(CellState::is_alive)
    }

    /// Sets a cell; returns `false` if `(row, col)` is off the grid.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = state;
                true
            }
            None => false,
        }
    }

    /// Flips a cell; returns `false` if `(row, col)` is off the grid.
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        match self.get(row, col) {
            Some(state) => self.set(row, col, state.toggled()),
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> Option<&[CellState]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_alive()).count()
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(CellState::Dead);
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_grid_has_requested_shape() {
        let grid = Grid::dead(DEFAULT_ROWS, DEFAULT_COLS);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cols(), 80);
        assert_eq!(grid.live_count(), 0);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn parse_and_display_use_plaintext_glyphs() {
        let grid = Grid::parse(".O.\n*..\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert!(grid.is_alive(0, 1));
        assert!(grid.is_alive(1, 0));
        assert_eq!(grid.to_string(), ".O.\nO..\n");
    }

    #[test]
    fn parse_rejects_unknown_glyph() {
        let err = Grid::parse("..x\n...").unwrap_err();
        assert!(matches!(err, GridError::MalformedGrid(_)));
    }

    #[test]
    fn parse_rejects_ragged_lines() {
        let err = Grid::parse("...\n..").unwrap_err();
        assert!(matches!(err, GridError::MalformedGrid(_)));
    }

    #[test]
    fn raw_values_outside_alive_dead_are_malformed() {
        let err = Grid::from_raw(2, &[vec![0, 1], vec![2, 0]]).unwrap_err();
        assert!(matches!(err, GridError::MalformedGrid(_)));
        assert!(Grid::from_raw(2, &[vec![0, 1], vec![1, 0]]).is_ok());
    }

    #[test]
    fn from_rows_defers_shape_check_to_validate() {
        let grid = Grid::from_rows(3, vec![vec![CellState::Dead; 3], vec![CellState::Dead; 2]]);
        assert!(matches!(grid.validate(), Err(GridError::MalformedGrid(_))));
    }

    #[test]
    fn row_returns_cells_in_column_order() {
        let grid = Grid::parse("O..\n.O.").unwrap();
        assert_eq!(grid.row(1), Some(&[CellState::Dead, CellState::Alive, CellState::Dead][..]));
        assert_eq!(grid.row(2), None);
    }

    #[test]
    fn toggle_ignores_out_of_range_cells() {
        let mut grid = Grid::dead(2, 2);
        assert!(grid.toggle(1, 1));
        assert!(grid.is_alive(1, 1));
        assert!(!grid.toggle(2, 0));
        assert_eq!(grid.live_count(), 1);
    }
}
