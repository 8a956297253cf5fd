// history.rs - Detects a settled simulation from hashes of recent generations

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::Grid;

/// Default number of generations remembered.
pub const DEFAULT_WINDOW: usize = 10;

/// Fixed ring of recent grid hashes.
///
/// A repeat inside the window means the board is a still life, an oscillator
/// with period up to the window size, or empty.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    window: usize,
    grid_history: Vec<u64>,
    history_count: usize,
}

impl CycleDetector {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self { window, grid_history: Vec::with_capacity(window), history_count: 0 }
    }

    /// Records `grid`; returns true if it was already seen within the window.
    pub fn observe(&mut self, grid: &Grid) -> bool {
        let current_hash = hash_grid(grid);
        if self.grid_history.contains(&current_hash) {
            return true;
        }

        if self.grid_history.len() < self.window {
            self.grid_history.push(current_hash);
        } else {
            self.grid_history[self.history_count % self.window] = current_hash;
        }
        self.history_count += 1;
        false
    }

    /// Number of generations remembered.
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn reset(&mut self) {
        self.grid_history.clear();
        self.history_count = 0;
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

pub fn hash_grid(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::step;

    #[test]
    fn blinker_repeats_after_two_generations() {
        let mut grid = Grid::parse(".....\n.....\n.OOO.\n.....\n.....").unwrap();
        let mut detector = CycleDetector::default();
        assert!(!detector.observe(&grid));
        grid = step(&grid).unwrap();
        assert!(!detector.observe(&grid));
        grid = step(&grid).unwrap();
        assert!(detector.observe(&grid));
    }

    #[test]
    fn old_hashes_fall_out_of_the_window() {
        let mut detector = CycleDetector::new(2);
        let a = Grid::parse("O.").unwrap();
        let b = Grid::parse(".O").unwrap();
        let c = Grid::parse("OO").unwrap();
        assert!(!detector.observe(&a));
        assert!(!detector.observe(&b));
        assert!(!detector.observe(&c));
        // `a` was overwritten by `c`
        assert!(!detector.observe(&a));
    }

    #[test]
    fn window_is_at_least_one() {
        assert_eq!(CycleDetector::new(0).window(), 1);
        assert_eq!(CycleDetector::default().window(), DEFAULT_WINDOW);
    }

    #[test]
    fn reset_forgets_everything() {
        let grid = Grid::dead(2, 2);
        let mut detector = CycleDetector::default();
        detector.observe(&grid);
        detector.reset();
        assert!(!detector.observe(&grid));
    }
}
