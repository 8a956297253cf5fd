//! Conway's Game of Life on a fixed, non-wrapping grid.
//!
//! [`seed`] builds generation 0 and [`step`] computes each following
//! generation from the previous one without touching it. Timing and
//! rendering belong to the caller.

pub mod coro;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod seeder;

pub use coro::step_concurrent;
pub use engine::step;
pub use error::GridError;
pub use grid::{CellState, DEFAULT_COLS, DEFAULT_ROWS, Grid};
pub use history::CycleDetector;
pub use patterns::{PATTERNS, Pattern};
pub use seeder::{seed, seed_with};
