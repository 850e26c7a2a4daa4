//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate directory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by DUELIST_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("DUELIST_CONFIG") {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from DUELIST_CONFIG: {}", path.display());
            return load_from_path(path);
        }
        warn!(
            "DUELIST_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// A file that cannot be read or parsed is reported and replaced by the
/// built-in defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: DUELIST_<SECTION>_<KEY>.
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "DUELIST_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "DUELIST_COMMON_SEED", optional_parse);

    // MCTS
    env_override!(
        config,
        mcts.iterations,
        "DUELIST_MCTS_ITERATIONS",
        parse
    );
    env_override!(
        config,
        mcts.exploration,
        "DUELIST_MCTS_EXPLORATION",
        parse
    );
    env_override!(
        config,
        mcts.rollout_depth_limit,
        "DUELIST_MCTS_ROLLOUT_DEPTH_LIMIT",
        parse
    );
    env_override!(config, mcts.verbose, "DUELIST_MCTS_VERBOSE", parse);

    // Battle
    env_override!(
        config,
        battle.player_hp,
        "DUELIST_BATTLE_PLAYER_HP",
        parse
    );
    env_override!(config, battle.enemy_hp, "DUELIST_BATTLE_ENEMY_HP", parse);
    env_override!(config, battle.energy, "DUELIST_BATTLE_ENERGY", parse);
    env_override!(
        config,
        battle.hand_size,
        "DUELIST_BATTLE_HAND_SIZE",
        parse
    );
    env_override!(
        config,
        battle.max_turns,
        "DUELIST_BATTLE_MAX_TURNS",
        parse
    );

    // Agent
    env_override!(config, agent.bot, "DUELIST_AGENT_BOT");
    env_override!(config, agent.battles, "DUELIST_AGENT_BATTLES", parse);
    env_override!(
        config,
        agent.log_interval,
        "DUELIST_AGENT_LOG_INTERVAL",
        parse
    );

    config
}
