// cli.rs - Command line flags layered over the config file

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Conway's Game of Life on a fixed, non-wrapping board", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = "conway.toml")]
    pub config: PathBuf,

    /// Board height
    #[arg(long, allow_negative_numbers = true)]
    pub rows: Option<i64>,

    /// Board width
    #[arg(long, allow_negative_numbers = true)]
    pub cols: Option<i64>,

    /// Milliseconds between generations
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// RNG seed for a reproducible generation 0
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Start from a named pattern (Glider, Blinker, Block, Toad, Beacon, Pulsar, R-pentomino)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Print generations to stdout instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Stop a headless run after this many generations
    #[arg(short, long)]
    pub generations: Option<u64>,

    /// Compute rows as concurrent tasks
    #[arg(long)]
    pub concurrent: bool,

    /// Keep running after a generation repeats
    #[arg(long)]
    pub no_cycle_stop: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Overlays the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.timing.interval_ms = interval_ms;
        }
        if self.seed.is_some() {
            config.grid.seed = self.seed;
        }
        if self.pattern.is_some() {
            config.grid.pattern = self.pattern.clone();
        }
        if self.concurrent {
            config.simulation.concurrent = true;
        }
        if self.no_cycle_stop {
            config.simulation.stop_on_cycle = false;
        }
    }
}
