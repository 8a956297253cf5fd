// seeder.rs - Random generation 0

use rand::Rng;

use crate::error::{GridError, Result};
use crate::grid::{CellState, Grid};

/// Seeds a `rows` x `cols` grid from the thread RNG, each cell alive with
/// probability 1/2.
pub fn seed(rows: i64, cols: i64) -> Result<Grid> {
    seed_with(rows, cols, &mut rand::thread_rng())
}

/// Like [`seed`] but draws from `rng`, so a seeded RNG gives a reproducible
/// generation 0. A zero dimension yields an empty grid.
pub fn seed_with<R: Rng + ?Sized>(rows: i64, cols: i64, rng: &mut R) -> Result<Grid> {
    let (Ok(r), Ok(c)) = (usize::try_from(rows), usize::try_from(cols)) else {
        return Err(GridError::InvalidDimension { rows, cols });
    };

    let cells = (0..r)
        .map(|_| (0..c).map(|_| CellState::from(rng.gen_bool(0.5))).collect())
        .collect();

    let grid = Grid::from_rows(c, cells);
    tracing::debug!(rows = r, cols = c, live = grid.live_count(), "seeded grid");
    Ok(grid)
}
