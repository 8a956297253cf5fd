// headless.rs - Timer-driven loop without a window

use anyhow::{Context, Result};
use tokio::time::{self, MissedTickBehavior};

use crate::driver::Driver;
use crate::render::Renderer;

/// Why the headless loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    GenerationLimit,
    Settled,
    Interrupted,
}

/// Renders generation 0, then ticks once per driver interval until
/// `max_generations` is reached, the driver pauses itself on a repeated
/// generation, or Ctrl-C arrives. A step error halts the loop and is
/// returned.
pub async fn run<R: Renderer>(
    driver: &mut Driver,
    renderer: &mut R,
    max_generations: Option<u64>,
) -> Result<Exit> {
    renderer.render(driver.generation(), driver.grid())?;

    let mut ticker = time::interval(driver.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await; // first tick completes immediately

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    driver.start();
    let exit = loop {
        if max_generations.is_some_and(|max| driver.generation() >= max) {
            break Exit::GenerationLimit;
        }

        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut ctrl_c => break Exit::Interrupted,
        }

        // The ticker already waited out the interval.
        let generation = driver.generation();
        driver
            .advance_async()
            .await
            .with_context(|| format!("generation {generation} could not be advanced"))?;
        renderer.render(driver.generation(), driver.grid())?;

        if driver.is_settled() {
            break Exit::Settled;
        }
    };

    driver.stop();
    tracing::info!(generation = driver.generation(), ?exit, "headless run finished");
    Ok(exit)
}
