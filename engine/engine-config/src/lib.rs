//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the duelist components (search engine, battle, agent).
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`DUELIST_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! Command-line flags of the agent binary sit above all three.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! DUELIST_<SECTION>_<KEY>=value
//!
//! Examples:
//!     DUELIST_COMMON_LOG_LEVEL=debug
//!     DUELIST_COMMON_SEED=7
//!     DUELIST_MCTS_ITERATIONS=500
//!     DUELIST_BATTLE_ENEMY_HP=80
//!     DUELIST_AGENT_BOT=random
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
