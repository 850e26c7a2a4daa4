//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_rollout_depth_limit() -> u32 {
    defaults::rollout_depth_limit()
}
fn d_verbose() -> bool {
    defaults::verbose()
}
fn d_player_hp() -> u32 {
    defaults::player_hp()
}
fn d_enemy_hp() -> u32 {
    defaults::enemy_hp()
}
fn d_energy() -> u32 {
    defaults::energy()
}
fn d_hand_size() -> u32 {
    defaults::hand_size()
}
fn d_max_turns() -> u32 {
    defaults::max_turns()
}
fn d_bot() -> String {
    defaults::bot().into()
}
fn d_battles() -> u32 {
    defaults::battles()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub battle: BattleConfig,
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Seed for every RNG of a run; random when unset
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Search settings for the MCTS bot
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// Maximum random playout length; 0 means unbounded
    #[serde(default = "d_rollout_depth_limit")]
    pub rollout_depth_limit: u32,
    #[serde(default = "d_verbose")]
    pub verbose: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            exploration: defaults::exploration(),
            rollout_depth_limit: defaults::rollout_depth_limit(),
            verbose: defaults::verbose(),
        }
    }
}

/// Battle scenario
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BattleConfig {
    #[serde(default = "d_player_hp")]
    pub player_hp: u32,
    #[serde(default = "d_enemy_hp")]
    pub enemy_hp: u32,
    #[serde(default = "d_energy")]
    pub energy: u32,
    #[serde(default = "d_hand_size")]
    pub hand_size: u32,
    #[serde(default = "d_max_turns")]
    pub max_turns: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            player_hp: defaults::player_hp(),
            enemy_hp: defaults::enemy_hp(),
            energy: defaults::energy(),
            hand_size: defaults::hand_size(),
            max_turns: defaults::max_turns(),
        }
    }
}

/// Agent binary configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AgentConfig {
    /// "mcts" or "random"
    #[serde(default = "d_bot")]
    pub bot: String,
    #[serde(default = "d_battles")]
    pub battles: u32,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            bot: defaults::bot().into(),
            battles: defaults::battles(),
            log_interval: defaults::log_interval(),
        }
    }
}
