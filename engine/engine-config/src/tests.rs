//! Tests for the configuration module.

use super::*;
use std::path::Path;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.common.seed, None);
    assert_eq!(config.mcts.iterations, 100);
    assert_eq!(config.agent.bot, "mcts");
    assert_eq!(config.agent.battles, 10);
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.mcts.iterations, 100);
    assert!((config.mcts.exploration - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.mcts.rollout_depth_limit, 0);
    assert!(!config.mcts.verbose);
}

#[test]
fn test_battle_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.battle.player_hp, 50);
    assert_eq!(config.battle.enemy_hp, 60);
    assert_eq!(config.battle.energy, 3);
    assert_eq!(config.battle.hand_size, 5);
    assert_eq!(config.battle.max_turns, 30);
}

#[test]
fn test_duelist_env_overrides() {
    std::env::set_var("DUELIST_BATTLE_ENEMY_HP", "80");
    std::env::set_var("DUELIST_COMMON_SEED", "7");
    std::env::set_var("DUELIST_MCTS_EXPLORATION", "1.25");

    let config = load_config();
    assert_eq!(config.battle.enemy_hp, 80);
    assert_eq!(config.common.seed, Some(7));
    assert!((config.mcts.exploration - 1.25).abs() < f64::EPSILON);

    std::env::remove_var("DUELIST_BATTLE_ENEMY_HP");
    std::env::remove_var("DUELIST_COMMON_SEED");
    std::env::remove_var("DUELIST_MCTS_EXPLORATION");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("DUELIST_BATTLE_MAX_TURNS", "lots");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.battle.max_turns, 30);

    std::env::remove_var("DUELIST_BATTLE_MAX_TURNS");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"
seed = 1234

[mcts]
iterations = 500
exploration = 1.0
rollout_depth_limit = 20
verbose = true

[battle]
enemy_hp = 45

[agent]
bot = "random"
battles = 3
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.common.seed, Some(1234));
    assert_eq!(config.mcts.iterations, 500);
    assert!((config.mcts.exploration - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.rollout_depth_limit, 20);
    assert!(config.mcts.verbose);
    assert_eq!(config.battle.enemy_hp, 45);
    assert_eq!(config.agent.bot, "random");
    assert_eq!(config.agent.battles, 3);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[mcts]
iterations = 25
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.mcts.iterations, 25);
    assert!((config.mcts.exploration - 0.5).abs() < f64::EPSILON); // Default
    assert_eq!(config.battle.player_hp, 50); // Default
    assert_eq!(config.agent.log_interval, 1); // Default
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = load_from_path(Path::new("/nonexistent/duelist/config.toml"));
    assert_eq!(config.battle.hand_size, 5);
    assert_eq!(config.agent.bot, "mcts");
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join(format!("duelist-invalid-{}.toml", std::process::id()));
    std::fs::write(&path, "[mcts\niterations = ").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.mcts.iterations, 100);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_from_path_reads_file() {
    let path = std::env::temp_dir().join(format!("duelist-valid-{}.toml", std::process::id()));
    std::fs::write(&path, "[agent]\nlog_interval = 5\n").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.agent.log_interval, 5);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.log_level, cloned.common.log_level);
    assert_eq!(config.agent.bot, cloned.agent.bot);
}
