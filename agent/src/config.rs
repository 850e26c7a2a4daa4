//! Configuration for the agent binary
//!
//! Defaults come from the central config (config.toml plus `DUELIST_*`
//! environment overrides). CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_duel::{starter_deck, DuelConfig};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::mcts_policy::MctsPolicy;
use crate::policy::{Policy, RandomPolicy};

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_bot() -> String {
    CENTRAL_CONFIG.agent.bot.clone()
}

fn default_battles() -> u32 {
    CENTRAL_CONFIG.agent.battles
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.agent.log_interval
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

fn default_rollout_depth_limit() -> u32 {
    CENTRAL_CONFIG.mcts.rollout_depth_limit
}

fn default_verbose() -> bool {
    CENTRAL_CONFIG.mcts.verbose
}

fn default_player_hp() -> u32 {
    CENTRAL_CONFIG.battle.player_hp
}

fn default_enemy_hp() -> u32 {
    CENTRAL_CONFIG.battle.enemy_hp
}

fn default_energy() -> u32 {
    CENTRAL_CONFIG.battle.energy
}

fn default_hand_size() -> u32 {
    CENTRAL_CONFIG.battle.hand_size
}

fn default_max_turns() -> u32 {
    CENTRAL_CONFIG.battle.max_turns
}

/// Bots the agent can play with.
pub const BOTS: &[&str] = &["mcts", "random"];

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "agent")]
#[command(about = "Duelist agent - plays duel battles with an MCTS or random bot")]
#[command(
    long_about = "Runs a series of single-enemy card battles and reports wins, losses,
remaining health and search statistics.

Configuration is loaded from config.toml with DUELIST_* environment variable
overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Bot to play with (mcts or random)
    #[arg(long, default_value_t = default_bot())]
    pub bot: String,

    /// Number of battles to play
    #[arg(long, default_value_t = default_battles())]
    pub battles: u32,

    /// Seed for battles and bots (random when unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N battles (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// MCTS iterations per decision
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// UCB1 exploration constant
    #[arg(short = 'p', long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Maximum random playout length (0 for unbounded)
    #[arg(long, default_value_t = default_rollout_depth_limit())]
    pub rollout_depth_limit: u32,

    /// Log the search tree after every decision
    #[arg(short, long, default_value_t = default_verbose())]
    pub verbose: bool,

    /// Player starting hp
    #[arg(long, default_value_t = default_player_hp())]
    pub player_hp: u32,

    /// Enemy starting hp
    #[arg(long, default_value_t = default_enemy_hp())]
    pub enemy_hp: u32,

    /// Energy per turn
    #[arg(long, default_value_t = default_energy())]
    pub energy: u32,

    /// Cards drawn per turn
    #[arg(long, default_value_t = default_hand_size())]
    pub hand_size: u32,

    /// Turn limit per battle
    #[arg(long, default_value_t = default_max_turns())]
    pub max_turns: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !BOTS.contains(&self.bot.as_str()) {
            return Err(anyhow!(
                "unknown bot '{}', expected one of {}",
                self.bot,
                BOTS.join(", ")
            ));
        }

        if self.battles == 0 {
            return Err(anyhow!("battles must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be finite and non-negative, got {}",
                self.exploration
            ));
        }

        for (name, value) in [
            ("player_hp", self.player_hp),
            ("enemy_hp", self.enemy_hp),
            ("energy", self.energy),
            ("hand_size", self.hand_size),
            ("max_turns", self.max_turns),
        ] {
            if value == 0 {
                return Err(anyhow!("{} must be greater than 0", name));
            }
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Seed for the whole run: CLI, then central config, then entropy.
    pub fn base_seed(&self) -> u64 {
        self.seed
            .or(CENTRAL_CONFIG.common.seed)
            .unwrap_or_else(rand::random)
    }

    pub fn mcts_config(&self) -> mcts::MctsConfig {
        mcts::MctsConfig::default()
            .with_iterations(self.iterations)
            .with_exploration(self.exploration)
            .with_rollout_depth_limit(self.rollout_depth_limit)
            .with_verbose(self.verbose)
    }

    pub fn duel_config(&self) -> DuelConfig {
        DuelConfig {
            player_hp: self.player_hp,
            enemy_hp: self.enemy_hp,
            energy: self.energy,
            hand_size: self.hand_size,
            max_turns: self.max_turns,
            deck: starter_deck(),
        }
    }

    /// Policy selected by `bot`, seeded with `seed`.
    pub fn build_policy(&self, seed: u64) -> Result<Box<dyn Policy>> {
        match self.bot.as_str() {
            "mcts" => Ok(Box::new(MctsPolicy::with_seed(self.mcts_config(), seed))),
            "random" => Ok(Box::new(RandomPolicy::with_seed(seed))),
            other => Err(anyhow!("unknown bot '{}'", other)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn base_config() -> Config {
        Config {
            bot: "mcts".into(),
            battles: 2,
            seed: Some(7),
            log_level: "info".into(),
            log_interval: 1,
            iterations: 20,
            exploration: 0.5,
            rollout_depth_limit: 0,
            verbose: false,
            player_hp: 50,
            enemy_hp: 60,
            energy: 3,
            hand_size: 5,
            max_turns: 30,
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_accepts_random_bot() {
        let mut cfg = base_config();
        cfg.bot = "random".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_bot() {
        let mut cfg = base_config();
        cfg.bot = "greedy".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("unknown bot"));
    }

    #[test]
    fn validate_rejects_zero_battles() {
        let mut cfg = base_config();
        cfg.battles = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("battles"));
    }

    #[test]
    fn validate_rejects_negative_exploration() {
        let mut cfg = base_config();
        cfg.exploration = -0.1;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("exploration"));
    }

    #[test]
    fn validate_rejects_nan_exploration() {
        let mut cfg = base_config();
        cfg.exploration = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_hand_size() {
        let mut cfg = base_config();
        cfg.hand_size = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("hand_size"));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn validate_accepts_zero_iterations() {
        // Zero iterations degrades to a random legal action
        let mut cfg = base_config();
        cfg.iterations = 0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn explicit_seed_wins() {
        let cfg = base_config();
        assert_eq!(cfg.base_seed(), 7);
    }

    #[test]
    fn mcts_config_maps_fields() {
        let mut cfg = base_config();
        cfg.rollout_depth_limit = 12;
        cfg.verbose = true;

        let mcts = cfg.mcts_config();
        assert_eq!(mcts.iterations, 20);
        assert!((mcts.exploration - 0.5).abs() < f64::EPSILON);
        assert_eq!(mcts.rollout_depth_limit, Some(12));
        assert!(mcts.verbose);
    }

    #[test]
    fn zero_depth_limit_is_unbounded() {
        let cfg = base_config();
        assert_eq!(cfg.mcts_config().rollout_depth_limit, None);
    }

    #[test]
    fn duel_config_maps_fields() {
        let mut cfg = base_config();
        cfg.enemy_hp = 42;
        let duel = cfg.duel_config();
        assert_eq!(duel.enemy_hp, 42);
        assert_eq!(duel.player_hp, 50);
        assert_eq!(duel.deck, starter_deck());
    }

    #[test]
    fn build_policy_by_name() {
        let cfg = base_config();
        assert_eq!(cfg.build_policy(1).unwrap().name(), "mcts");

        let mut cfg = base_config();
        cfg.bot = "random".into();
        assert_eq!(cfg.build_policy(1).unwrap().name(), "random");
    }

    #[test]
    fn cli_overrides_defaults() {
        let cfg = Config::parse_from([
            "agent",
            "--bot",
            "random",
            "--battles",
            "3",
            "-p",
            "1.5",
            "--seed",
            "11",
            "-v",
        ]);
        assert_eq!(cfg.bot, "random");
        assert_eq!(cfg.battles, 3);
        assert!((cfg.exploration - 1.5).abs() < f64::EPSILON);
        assert_eq!(cfg.seed, Some(11));
        assert!(cfg.verbose);
    }
}
