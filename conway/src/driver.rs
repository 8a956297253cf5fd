// driver.rs - Owns the current generation and the start/stop tick lifecycle

use std::sync::Arc;
use std::time::{Duration, Instant};

use life_core::{CycleDetector, Grid, GridError, Pattern, patterns, seed_with, step, step_concurrent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::AppConfig;

/// How the next generation is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    Sequential,
    /// One tokio task per row; only used on the async path.
    Concurrent,
}

/// Holds the current grid and advances it one generation per tick while
/// running. A step error stops the driver; it never keeps ticking on a grid
/// it could not advance.
pub struct Driver {
    grid: Grid,
    generation: u64,
    rows: i64,
    cols: i64,
    rng: ChaCha8Rng,
    is_running: bool,
    last_update: Instant,
    update_interval: Duration,
    mode: StepMode,
    history: CycleDetector,
    stop_on_cycle: bool,
    settled: bool,
    last_error: Option<String>,
}

impl Driver {
    /// Builds generation 0 from `config`: the named pattern if one is set,
    /// random cells otherwise.
    pub fn new(config: &AppConfig) -> Result<Self, GridError> {
        let mut rng = match config.grid.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let (rows, cols) = (config.grid.rows, config.grid.cols);

        let mut grid = seed_with(rows, cols, &mut rng)?;
        if let Some(pattern) = config.grid.pattern.as_deref().and_then(patterns::find) {
            patterns::centered(&mut grid, pattern);
        }

        let mode = if config.simulation.concurrent { StepMode::Concurrent } else { StepMode::Sequential };

        let mut driver = Self {
            grid,
            generation: 0,
            rows,
            cols,
            rng,
            is_running: false,
            last_update: Instant::now(),
            update_interval: config.interval().max(Duration::from_millis(1)),
            mode,
            history: CycleDetector::new(config.simulation.history_window),
            stop_on_cycle: config.simulation.stop_on_cycle,
            settled: false,
            last_error: None,
        };
        driver.history.observe(&driver.grid);
        tracing::info!(rows, cols, live = driver.grid.live_count(), ?mode, "generation 0 ready");
        Ok(driver)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    pub fn interval(&self) -> Duration {
        self.update_interval
    }

    /// True once a generation repeated and the driver paused itself.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// How many recent generations are checked for a repeat.
    pub fn history_window(&self) -> usize {
        self.history.window()
    }

    /// Message of the step error that halted the driver, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.update_interval = interval.max(Duration::from_millis(1));
    }

    pub fn start(&mut self) {
        if self.is_running {
            return;
        }
        self.is_running = true;
        self.settled = false;
        self.last_error = None;
        self.last_update = Instant::now();
        tracing::info!(generation = self.generation, "simulation started");
    }

    /// Stops ticking. A step already in progress still completes, but no
    /// further tick fires.
    pub fn stop(&mut self) {
        if self.is_running {
            self.is_running = false;
            tracing::info!(generation = self.generation, "simulation stopped");
        }
    }

    /// Whether a tick is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.is_running && now.duration_since(self.last_update) >= self.update_interval
    }

    /// Advances one generation if running and the interval has elapsed.
    /// Returns whether a generation was computed.
    pub fn poll(&mut self, now: Instant) -> Result<bool, GridError> {
        if !self.is_due(now) {
            return Ok(false);
        }
        self.last_update = now;
        self.advance()?;
        Ok(true)
    }

    /// Async counterpart of [`Driver::poll`], honoring [`StepMode::Concurrent`].
    pub async fn poll_async(&mut self, now: Instant) -> Result<bool, GridError> {
        if !self.is_due(now) {
            return Ok(false);
        }
        self.last_update = now;
        self.advance_async().await?;
        Ok(true)
    }

    /// Advances one generation regardless of the running state, always
    /// stepping sequentially.
    pub fn advance(&mut self) -> Result<(), GridError> {
        let next = step(&self.grid);
        self.commit(next)
    }

    pub async fn advance_async(&mut self) -> Result<(), GridError> {
        let next = match self.mode {
            StepMode::Sequential => step(&self.grid),
            StepMode::Concurrent => step_concurrent(Arc::new(self.grid.clone())).await,
        };
        self.commit(next)
    }

    fn commit(&mut self, next: Result<Grid, GridError>) -> Result<(), GridError> {
        let next = match next {
            Ok(grid) => grid,
            Err(e) => {
                self.is_running = false;
                self.last_error = Some(e.to_string());
                tracing::warn!(generation = self.generation, error = %e, "step failed, simulation halted");
                return Err(e);
            }
        };

        self.grid = next;
        self.generation += 1;

        if self.history.observe(&self.grid) && self.stop_on_cycle && self.is_running {
            self.is_running = false;
            self.settled = true;
            tracing::info!(generation = self.generation, "generation repeated, simulation paused");
        }
        Ok(())
    }

    /// Replaces the grid with fresh random cells and restarts the count.
    pub fn reseed(&mut self) -> Result<(), GridError> {
        let grid = seed_with(self.rows, self.cols, &mut self.rng)?;
        self.reset_to(grid);
        Ok(())
    }

    pub fn clear(&mut self) {
        let mut grid = self.grid.clone();
        grid.clear();
        self.reset_to(grid);
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        let mut grid = self.grid.clone();
        patterns::centered(&mut grid, pattern);
        self.reset_to(grid);
    }

    /// Flips a cell while stopped; ignored while running or off the grid.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> bool {
        if self.is_running {
            return false;
        }
        let toggled = self.grid.toggle(row, col);
        if toggled {
            self.history.reset();
            self.history.observe(&self.grid);
        }
        toggled
    }

    fn reset_to(&mut self, grid: Grid) {
        self.stop();
        self.grid = grid;
        self.generation = 0;
        self.settled = false;
        self.last_error = None;
        self.history.reset();
        self.history.observe(&self.grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::CellState;

    fn config_with_pattern(name: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.grid.rows = 9;
        config.grid.cols = 9;
        config.grid.seed = Some(1);
        config.grid.pattern = Some(name.into());
        config.timing.interval_ms = 100;
        config
    }

    #[test]
    fn seeded_drivers_start_from_the_same_grid() {
        let mut config = AppConfig::default();
        config.grid.seed = Some(99);
        let a = Driver::new(&config).unwrap();
        let b = Driver::new(&config).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.generation(), 0);
    }

    #[test]
    fn negative_dimension_fails_construction() {
        let mut config = AppConfig::default();
        config.grid.rows = -1;
        assert!(matches!(Driver::new(&config), Err(GridError::InvalidDimension { .. })));
    }

    #[test]
    fn poll_waits_for_the_interval() {
        let mut driver = Driver::new(&config_with_pattern("Glider")).unwrap();
        let t0 = Instant::now();

        // Not running: nothing happens however late it is.
        assert!(!driver.poll(t0 + Duration::from_secs(5)).unwrap());

        driver.start();
        let started = driver.last_update;
        assert!(!driver.poll(started + Duration::from_millis(50)).unwrap());
        assert!(driver.poll(started + Duration::from_millis(100)).unwrap());
        assert_eq!(driver.generation(), 1);
        assert!(!driver.poll(started + Duration::from_millis(150)).unwrap());
        assert!(driver.poll(started + Duration::from_millis(200)).unwrap());
        assert_eq!(driver.generation(), 2);
    }

    #[test]
    fn stop_prevents_the_next_tick() {
        let mut driver = Driver::new(&config_with_pattern("Glider")).unwrap();
        driver.start();
        let started = driver.last_update;
        driver.stop();
        assert!(!driver.poll(started + Duration::from_secs(1)).unwrap());
        assert_eq!(driver.generation(), 0);
    }

    #[test]
    fn blinker_pauses_once_it_repeats() {
        let mut driver = Driver::new(&config_with_pattern("Blinker")).unwrap();
        driver.start();
        driver.advance().unwrap();
        assert!(driver.is_running());
        driver.advance().unwrap();
        assert!(!driver.is_running());
        assert!(driver.is_settled());
        assert_eq!(driver.generation(), 2);
    }

    #[test]
    fn history_window_comes_from_config() {
        let mut config = config_with_pattern("Block");
        config.simulation.history_window = 4;
        let driver = Driver::new(&config).unwrap();
        assert_eq!(driver.history_window(), 4);
    }

    #[test]
    fn cycle_stop_can_be_disabled() {
        let mut config = config_with_pattern("Block");
        config.simulation.stop_on_cycle = false;
        let mut driver = Driver::new(&config).unwrap();
        driver.start();
        driver.advance().unwrap();
        assert!(driver.is_running());
    }

    #[test]
    fn step_error_halts_and_records_message() {
        let mut driver = Driver::new(&config_with_pattern("Glider")).unwrap();
        driver.grid = Grid::from_rows(3, vec![vec![CellState::Dead; 3], vec![CellState::Dead; 2]]);
        driver.start();

        let err = driver.advance().unwrap_err();
        assert!(matches!(err, GridError::MalformedGrid(_)));
        assert!(!driver.is_running());
        assert!(driver.last_error().is_some_and(|m| m.contains("malformed")));
        assert_eq!(driver.generation(), 0);
    }

    #[test]
    fn toggle_only_while_stopped() {
        let mut driver = Driver::new(&config_with_pattern("Block")).unwrap();
        assert!(driver.toggle_cell(0, 0));
        assert!(driver.grid().is_alive(0, 0));
        driver.start();
        assert!(!driver.toggle_cell(0, 0));
        assert!(driver.grid().is_alive(0, 0));
    }

    #[test]
    fn clear_and_reseed_reset_generation() {
        let mut driver = Driver::new(&config_with_pattern("Glider")).unwrap();
        driver.advance().unwrap();
        driver.clear();
        assert_eq!(driver.generation(), 0);
        assert_eq!(driver.grid().live_count(), 0);
        assert_eq!((driver.grid().rows(), driver.grid().cols()), (9, 9));

        driver.advance().unwrap();
        driver.reseed().unwrap();
        assert_eq!(driver.generation(), 0);
        assert_eq!((driver.grid().rows(), driver.grid().cols()), (9, 9));
    }

    #[test]
    fn apply_pattern_stops_and_restarts_the_count() {
        let mut driver = Driver::new(&config_with_pattern("Glider")).unwrap();
        driver.start();
        driver.advance().unwrap();

        driver.apply_pattern(patterns::find("Block").unwrap());
        assert!(!driver.is_running());
        assert_eq!(driver.generation(), 0);
        assert_eq!(driver.grid().live_count(), 4);
        assert!(driver.grid().is_alive(3, 3));
        assert!(driver.grid().is_alive(4, 4));
    }

    #[tokio::test]
    async fn concurrent_mode_matches_sequential() {
        let mut config = AppConfig::default();
        config.grid.seed = Some(5);
        config.simulation.stop_on_cycle = false;
        let mut sequential = Driver::new(&config).unwrap();
        config.simulation.concurrent = true;
        let mut concurrent = Driver::new(&config).unwrap();
        assert_eq!(concurrent.mode(), StepMode::Concurrent);

        for _ in 0..5 {
            sequential.advance_async().await.unwrap();
            concurrent.advance_async().await.unwrap();
        }
        assert_eq!(sequential.grid(), concurrent.grid());
    }
}
