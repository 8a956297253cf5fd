// coro.rs - Row coroutines: one tokio task per row of the next generation
//
// Rows only read the shared previous grid and each returns its own freshly
// allocated row, so no locking is needed.

use std::sync::Arc;

use crate::engine::next_row;
use crate::error::{GridError, Result};
use crate::grid::{CellState, Grid};

/// Row coroutine that computes one row of the next generation.
async fn process_row(row_index: usize, current_grid: Arc<Grid>) -> (usize, Vec<CellState>) {
    tokio::task::yield_now().await; // Cooperative yielding
    (row_index, next_row(&current_grid, row_index))
}

/// Advances `grid` by one generation, computing rows as concurrent tasks.
///
/// Must be called from within a tokio runtime. Produces exactly what
/// [`crate::engine::step`] produces for the same input.
pub async fn step_concurrent(grid: Arc<Grid>) -> Result<Grid> {
    grid.validate()?;

    // Spawn all row coroutines at once for time-slicing
    let handles: Vec<_> = (0..grid.rows())
        .map(|row| tokio::spawn(process_row(row, Arc::clone(&grid))))
        .collect();

    let mut next_rows = vec![Vec::new(); grid.rows()];
    for handle in handles {
        let (row_index, completed_row) =
            handle.await.map_err(|e| GridError::RowTask(e.to_string()))?;
        next_rows[row_index] = completed_row;
    }

    tracing::trace!(rows = grid.rows(), "stepped grid with row tasks");
    Ok(Grid::from_rows(grid.cols(), next_rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::step;

    #[tokio::test]
    async fn matches_sequential_step() {
        let grid = Grid::parse(
            "\
.O......
..O.....
OOO.....
........
.....OO.
.....OO.",
        )
        .unwrap();
        let expected = step(&grid).unwrap();
        let actual = step_concurrent(Arc::new(grid)).await.unwrap();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn rejects_ragged_rows() {
        let grid = Grid::from_rows(2, vec![vec![CellState::Dead; 2], vec![CellState::Dead; 1]]);
        let err = step_concurrent(Arc::new(grid)).await.unwrap_err();
        assert!(matches!(err, GridError::MalformedGrid(_)));
    }
}
