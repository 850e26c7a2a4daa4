//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so the binary and the
//! checked-in defaults can never disagree.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    battle: BattleDefaults,
    agent: AgentDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    iterations: u32,
    exploration: f64,
    rollout_depth_limit: u32,
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct BattleDefaults {
    player_hp: u32,
    enemy_hp: u32,
    energy: u32,
    hand_size: u32,
    max_turns: u32,
}

#[derive(Debug, Deserialize)]
struct AgentDefaults {
    bot: String,
    battles: u32,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> Option<u64> {
    DEFAULTS.common.seed
}

// MCTS
pub fn iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn rollout_depth_limit() -> u32 {
    DEFAULTS.mcts.rollout_depth_limit
}
pub fn verbose() -> bool {
    DEFAULTS.mcts.verbose
}

// Battle
pub fn player_hp() -> u32 {
    DEFAULTS.battle.player_hp
}
pub fn enemy_hp() -> u32 {
    DEFAULTS.battle.enemy_hp
}
pub fn energy() -> u32 {
    DEFAULTS.battle.energy
}
pub fn hand_size() -> u32 {
    DEFAULTS.battle.hand_size
}
pub fn max_turns() -> u32 {
    DEFAULTS.battle.max_turns
}

// Agent
pub fn bot() -> &'static str {
    &DEFAULTS.agent.bot
}
pub fn battles() -> u32 {
    DEFAULTS.agent.battles
}
pub fn log_interval() -> u32 {
    DEFAULTS.agent.log_interval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        // Just accessing these will verify the TOML parses correctly
        assert_eq!(log_level(), "info");
        assert_eq!(seed(), None);
    }

    #[test]
    fn test_mcts_defaults() {
        assert_eq!(iterations(), 100);
        assert!((exploration() - 0.5).abs() < f64::EPSILON);
        assert_eq!(rollout_depth_limit(), 0);
        assert!(!verbose());
    }

    #[test]
    fn test_battle_defaults() {
        assert_eq!(player_hp(), 50);
        assert_eq!(enemy_hp(), 60);
        assert_eq!(energy(), 3);
        assert_eq!(hand_size(), 5);
        assert_eq!(max_turns(), 30);
    }

    #[test]
    fn test_agent_defaults() {
        assert_eq!(bot(), "mcts");
        assert_eq!(battles(), 10);
        assert_eq!(log_interval(), 1);
    }
}
