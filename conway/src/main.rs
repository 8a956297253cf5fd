// main.rs - Conway's Game of Life: windowed (egui) or headless (text frames)

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod config;
mod driver;
mod headless;
mod render;
mod telemetry;
mod ui;

use cli::Args;
use config::AppConfig;
use driver::Driver;
use render::TextRenderer;

fn main() -> Result<()> {
    let args = Args::parse();
    let _telemetry = telemetry::init_tracing(&args.log_level);

    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    args.apply(&mut config);
    config.validate()?;

    let mut driver = Driver::new(&config).context("building generation 0")?;

    if args.headless {
        let runtime = tokio::runtime::Runtime::new()?;
        let mut renderer = TextRenderer::stdout();
        let exit = runtime.block_on(headless::run(&mut driver, &mut renderer, args.generations))?;
        tracing::debug!(?exit, "exiting");
        Ok(())
    } else {
        ui::run(driver, &config)
    }
}
