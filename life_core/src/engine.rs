// engine.rs - One generation of Conway's Game of Life
//
// Every output cell is computed from the previous grid only; the next
// generation is written into freshly allocated rows.

//! The per-cell helpers stay inside the crate; only `step` and
//! `live_neighbors` are public, so nothing can advance a row of a grid that
//! has not been validated.
//!
//! ```compile_fail
//! use life_core::engine::next_row;
//! ```
//!
//! ```compile_fail
//! use life_core::engine::next_state;
//! ```

use crate::error::Result;
use crate::grid::{CellState::{self, Alive, Dead}, Grid};

/// Moore neighborhood offsets (radius 1, centre excluded).
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Next state indexed by `[current state][live neighbor count]`.
/// Covers every (state, count) pair, so there is no fallback branch.
#[rustfmt::skip]
const TRANSITIONS: [[CellState; 9]; 2] = [
    // Dead: birth on exactly 3
    [Dead, Dead, Dead, Alive, Dead, Dead, Dead, Dead, Dead],
    // Alive: survival on 2 or 3, under/overpopulation otherwise
    [Dead, Dead, Alive, Alive, Dead, Dead, Dead, Dead, Dead],
];

/// Applies the transition rule to a single cell.
pub(crate) fn next_state(current: CellState, live_neighbors: usize) -> CellState {
    TRANSITIONS[current as usize][live_neighbors]
}

/// Counts live neighbors of `(row, col)`. Positions off the grid do not
/// wrap; they are simply absent from the count.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> usize {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| Some((row.checked_add_signed(dr)?, col.checked_add_signed(dc)?)))
        .filter(|&(nr, nc)| grid.is_alive(nr, nc))
        .count()
}

/// Computes row `row` of the next generation from that row's own cells.
/// `grid` must already be validated.
pub(crate) fn next_row(grid: &Grid, row: usize) -> Vec<CellState> {
    grid.row(row)
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(col, &current)| next_state(current, live_neighbors(grid, row, col)))
        .collect()
}

/// Advances `grid` by one generation.
///
/// Fails with `MalformedGrid` if any row's length differs from the declared
/// column count. The input is never modified.
pub fn step(grid: &Grid) -> Result<Grid> {
    grid.validate()?;

    let cells = (0..grid.rows()).map(|row| next_row(grid, row)).collect();
    let next = Grid::from_rows(grid.cols(), cells);

    tracing::trace!(live_before = grid.live_count(), live_after = next.live_count(), "stepped grid");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn transition_table_matches_rules() {
        for count in 0..=8 {
            let survives = count == 2 || count == 3;
            assert_eq!(next_state(Alive, count), CellState::from(survives), "alive, {count}");
            assert_eq!(next_state(Dead, count), CellState::from(count == 3), "dead, {count}");
        }
    }

    #[test]
    fn corner_sees_only_three_neighbors() {
        let mut grid = Grid::dead(3, 3);
        for (r, c) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
            grid.set(r, c, Alive);
        }
        assert_eq!(live_neighbors(&grid, 0, 0), 3);
        assert_eq!(live_neighbors(&grid, 0, 1), 5);
        assert_eq!(live_neighbors(&grid, 1, 1), 8);
    }

    #[test]
    fn isolated_live_corner_dies() {
        let mut grid = Grid::dead(2, 2);
        grid.set(0, 0, Alive);
        let next = step(&grid).unwrap();
        assert_eq!(next.get(0, 0), Some(Dead));
        assert_eq!(next.live_count(), 0);
    }

    #[test]
    fn next_row_follows_each_cell_of_the_row() {
        let grid = Grid::parse(".....\n.OOO.\n.....").unwrap();
        assert_eq!(next_row(&grid, 0), vec![Dead, Dead, Alive, Dead, Dead]);
        assert_eq!(next_row(&grid, 1), vec![Dead, Dead, Alive, Dead, Dead]);
    }

    #[test]
    fn ragged_row_is_malformed() {
        let grid = Grid::from_rows(4, vec![vec![Dead; 4], vec![Dead; 3], vec![Dead; 4]]);
        assert!(matches!(step(&grid), Err(GridError::MalformedGrid(_))));
    }

    #[test]
    fn empty_grid_steps_to_empty_grid() {
        let grid = Grid::dead(0, 0);
        assert_eq!(step(&grid).unwrap(), grid);
    }
}
