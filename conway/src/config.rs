//! Simulation settings.
//!
//! Values come from, in order of precedence:
//!
//! 1. Command line flags (see `cli.rs`)
//! 2. `conway.toml` (or the file given with `--config`)
//! 3. Defaults (hardcoded in the `Default` impls)
//!
//! ## Example `conway.toml`
//!
//! ```toml
//! [grid]
//! rows = 20
//! cols = 80
//! seed = 42
//!
//! [timing]
//! interval_ms = 500
//!
//! [simulation]
//! stop_on_cycle = true
//! history_window = 10
//! concurrent = false
//!
//! [display]
//! live_color = [0, 200, 0]
//! dead_color = [40, 40, 40]
//! cell_size = 12.0
//! ```

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use life_core::{DEFAULT_COLS, DEFAULT_ROWS, patterns};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Board size and generation 0.
///
/// `rows` and `cols` stay signed so a negative value reaches the seeder and
/// is reported as an invalid dimension.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub rows: i64,
    pub cols: i64,
    /// Fixed RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Start from a named pattern instead of random cells.
    pub pattern: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: DEFAULT_ROWS as i64, cols: DEFAULT_COLS as i64, seed: None, pattern: None }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { interval_ms: 500 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Pause once a generation repeats within `history_window`.
    pub stop_on_cycle: bool,
    pub history_window: usize,
    /// Compute rows as concurrent tasks.
    pub concurrent: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { stop_on_cycle: true, history_window: life_core::history::DEFAULT_WINDOW, concurrent: false }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
    pub cell_size: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { live_color: [0, 200, 0], dead_color: [40, 40, 40], cell_size: 12.0 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub timing: TimingConfig,
    pub simulation: SimulationConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Reads `path`; a missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "loaded config file");
                Self::from_toml_str(&content)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.interval_ms == 0 {
            return Err(ConfigError::Invalid("timing.interval_ms must be at least 1".into()));
        }
        if self.simulation.history_window == 0 {
            return Err(ConfigError::Invalid("simulation.history_window must be at least 1".into()));
        }
        if !self.display.cell_size.is_finite() || self.display.cell_size <= 0.0 {
            return Err(ConfigError::Invalid("display.cell_size must be positive".into()));
        }
        if let Some(name) = &self.grid.pattern {
            if patterns::find(name).is_none() {
                return Err(ConfigError::Invalid(format!("unknown pattern {name:?}")));
            }
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.timing.interval_ms)
    }
}
