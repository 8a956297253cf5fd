// error.rs - Error taxonomy for seeding and stepping grids

use thiserror::Error;

/// Errors raised by the core grid operations.
///
/// Both `seed` and `step` are pure, so a failure recurs identically on retry;
/// the caller has to fix its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimension: {rows}x{cols} (rows and cols must not be negative)")]
    InvalidDimension { rows: i64, cols: i64 },

    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    #[error("row task failed: {0}")]
    RowTask(String),
}

impl GridError {
    pub(crate) fn ragged(row: usize, len: usize, cols: usize) -> Self {
        GridError::MalformedGrid(format!("row {row} has {len} cells, expected {cols}"))
    }

    pub(crate) fn bad_cell(raw: impl std::fmt::Debug) -> Self {
        GridError::MalformedGrid(format!("cell value {raw:?} is neither ALIVE nor DEAD"))
    }
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;
