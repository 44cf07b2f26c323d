//! Rollout driver for the grid snake engine.
//!
//! Usage: `snake-runner [config.json]`

mod policy;
mod rollout;
mod telemetry;

use anyhow::{Context, Result};
use policy::RandomPolicy;
use rollout::RunSummary;
use snake_core::RunnerConfig;
use snake_world::{render_text, SnakeEngine};
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => RunnerConfig::from_file(&path)
            .with_context(|| format!("failed to load runner config from {}", path))?,
        None => RunnerConfig::default(),
    };

    info!(
        episodes = config.episodes,
        grid_size = config.env.grid_size,
        env_seed = config.env.seed,
        policy_seed = config.policy_seed,
        "Starting snake runner"
    );

    let mut engine = SnakeEngine::new(config.env.clone()).context("failed to build engine")?;
    let mut policy = RandomPolicy::new(config.policy_seed);
    let mut summary = RunSummary::default();

    for episode in 0..config.episodes {
        let result = rollout::run_episode(
            &mut engine,
            &mut policy,
            episode,
            config.max_ticks_per_episode,
        )?;

        if config.render_final_frame {
            println!("{}", render_text(engine.grid()));
        }

        summary.record(&result);
    }

    summary.log();
    Ok(())
}
