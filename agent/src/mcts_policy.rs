//! MCTS-based policy
//!
//! Runs a fresh search for every decision and commits its best action.

use anyhow::{Context, Result};
use games_duel::{Battle, Command};
use mcts::{choose_action, HealthWeightedEvaluator, MctsConfig, SearchError};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, warn};

use crate::policy::{Choice, Policy};

/// MCTS policy scoring rollouts with the health-weighted evaluator
#[derive(Debug)]
pub struct MctsPolicy {
    config: MctsConfig,
    evaluator: HealthWeightedEvaluator,
    /// RNG driving both state resampling and random choices in the search
    rng: ChaCha20Rng,
}

impl MctsPolicy {
    #[allow(dead_code)]
    pub fn new(config: MctsConfig) -> Self {
        Self {
            config,
            evaluator: HealthWeightedEvaluator::default(),
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create with a specific seed for determinism
    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self {
            config,
            evaluator: HealthWeightedEvaluator::default(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for MctsPolicy {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn choose(&mut self, battle: &Battle) -> Result<Choice> {
        match choose_action(battle, &self.evaluator, self.config.clone(), &mut self.rng) {
            Ok(decision) => {
                debug!(
                    command = ?decision.action,
                    iterations = decision.stats.iterations,
                    rollouts = decision.stats.rollouts,
                    time_us = decision.stats.total_time_us,
                    "MCTS selected command"
                );
                Ok(Choice {
                    command: decision.action,
                    search: Some(decision.stats),
                })
            }
            Err(SearchError::NoLegalActions) => {
                warn!(turn = battle.turn(), "MCTS returned no action, ending turn");
                Ok(Choice {
                    command: Command::EndTurn,
                    search: None,
                })
            }
            Err(e) => Err(e).context("MCTS search failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::SearchState;
    use games_duel::{Card, DuelAction, DuelConfig};

    fn test_config() -> MctsConfig {
        MctsConfig::for_testing().with_iterations(40)
    }

    #[test]
    fn test_choice_is_legal_and_carries_stats() {
        let battle = Battle::new(DuelConfig::default(), 2);
        let mut policy = MctsPolicy::with_seed(test_config(), 42);

        let choice = policy.choose(&battle).unwrap();

        let mut copy = battle.clone();
        copy.apply(&choice.command).unwrap();
        let stats = choice.search.unwrap();
        assert_eq!(stats.iterations, 40);
    }

    #[test]
    fn test_single_action_skips_search() {
        // Nothing affordable: only EndTurn is legal
        let mut battle = Battle::new(
            DuelConfig {
                energy: 1,
                deck: vec![Card::Bash; 6],
                ..DuelConfig::default()
            },
            0,
        );
        assert_eq!(battle.get_actions(), vec![DuelAction::EndTurn]);

        let mut policy = MctsPolicy::with_seed(test_config(), 1);
        let choice = policy.choose(&battle).unwrap();

        assert_eq!(choice.command, Command::EndTurn);
        assert_eq!(choice.search.unwrap().iterations, 0);
        battle.apply(&choice.command).unwrap();
    }

    #[test]
    fn test_finished_battle_falls_back_to_end_turn() {
        let mut battle = Battle::new(
            DuelConfig {
                player_hp: 1,
                ..DuelConfig::default()
            },
            0,
        );
        battle.apply(&Command::EndTurn).unwrap();

        let mut policy = MctsPolicy::with_seed(test_config(), 1);
        let choice = policy.choose(&battle).unwrap();

        assert_eq!(choice.command, Command::EndTurn);
        assert!(choice.search.is_none());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let battle = Battle::new(DuelConfig::default(), 2);
        let mut policy = MctsPolicy::new(test_config().with_exploration(f64::NAN));
        assert!(policy.choose(&battle).is_err());
    }
}
