//! Action selection policies for the agent

use anyhow::{anyhow, Result};
use engine_core::SearchState;
use games_duel::{Battle, Command};
use mcts::SearchStats;
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

/// A command picked for the real battle, plus search counters when a search
/// produced it.
#[derive(Debug, Clone)]
pub struct Choice {
    pub command: Command,
    pub search: Option<SearchStats>,
}

/// Trait for action selection policies.
pub trait Policy {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Pick the next command for `battle`.
    fn choose(&mut self, battle: &Battle) -> Result<Choice>;
}

/// Random policy that picks a legal action uniformly at random.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&mut self, battle: &Battle) -> Result<Choice> {
        let actions = battle.get_actions();
        let action = actions
            .choose(&mut self.rng)
            .ok_or_else(|| anyhow!("No legal actions available"))?;

        Ok(Choice {
            command: battle.to_committed(action),
            search: None,
        })
    }
}
