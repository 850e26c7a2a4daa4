//! Agent - battle runner for the duelist engine
//!
//! Plays a configurable number of duel battles with either the MCTS bot or
//! the uniform random bot, then logs aggregate results.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod config;
mod mcts_policy;
mod policy;
mod runner;
mod stats;

use crate::config::Config;
use crate::runner::Runner;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let seed = config.base_seed();
    info!(
        bot = %config.bot,
        battles = config.battles,
        iterations = config.iterations,
        exploration = config.exploration,
        seed,
        "Starting agent"
    );

    let mut policy = config.build_policy(seed)?;
    let runner = Runner::new(config, seed);

    match runner.run(policy.as_mut()) {
        Ok(stats) => {
            stats.log_summary();
            Ok(())
        }
        Err(e) => {
            error!("Agent failed: {:#}", e);
            Err(e)
        }
    }
}
