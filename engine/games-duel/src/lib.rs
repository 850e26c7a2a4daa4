//! Single-enemy card battle for the duelist engine
//!
//! This crate provides a small deck-building battle that implements the
//! `engine-core` [`SearchState`](engine_core::SearchState) trait, so the MCTS
//! engine can play it. The draw order is hidden information: the battle keeps
//! its own shuffle RNG and search clones reseed it.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::SearchState;
//! use games_duel::{Battle, Command, DuelConfig};
//!
//! let mut battle = Battle::new(DuelConfig::default(), 42);
//! assert_eq!(battle.hand().len(), 5);
//!
//! let actions = battle.get_actions();
//! let command = battle.to_committed(&actions[0]);
//! battle.apply(&command).unwrap();
//!
//! battle.apply(&Command::EndTurn).unwrap();
//! assert_eq!(battle.turn(), 2);
//! ```

pub mod battle;
pub mod cards;
pub mod enemy;

pub use battle::{Battle, Command, DuelAction, DuelConfig, DuelError, Outcome};
pub use cards::{starter_deck, Card};
pub use enemy::{Enemy, Intent, INTENT_CYCLE};
