//! Monte Carlo Tree Search (MCTS) decision engine for stochastic, turn-based games.
//!
//! This crate provides a game-agnostic UCB1 search that works with any
//! state implementing the `engine-core` [`SearchState`](engine_core::SearchState)
//! trait. It is invoked once per decision with a fixed iteration budget and
//! returns a single action.
//!
//! # Overview
//!
//! Every iteration runs against an independent stochastic clone of the real
//! state, so hidden information (draw order, for example) is resampled each
//! time and the real state is never touched. One iteration consists of:
//!
//! 1. **Selection**: descend through explored children using UCB1 while every
//!    legal action already has a child
//! 2. **Expansion**: pick one unexplored action uniformly at random and add
//!    it as a new node
//! 3. **Rollout**: play uniformly random actions until the clone ends
//! 4. **Backpropagation**: add the evaluation to the new node and all of its
//!    ancestors
//!
//! Because a clone may offer a different action set than the one the tree
//! was built from, selection only considers children that are legal in the
//! current clone and treats a node with no usable children as a leaf.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::{choose_action, HealthWeightedEvaluator, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let battle = games_duel::Battle::new(games_duel::DuelConfig::default(), 7);
//! let config = MctsConfig::default().with_iterations(200).with_exploration(0.5);
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let decision = choose_action(&battle, &HealthWeightedEvaluator::default(), config, &mut rng)?;
//!
//! println!("Command: {:?}", decision.action);
//! println!("Rollouts: {}", decision.stats.rollouts);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: Number of iterations per decision (default: 100)
//! - `exploration`: UCB1 exploration constant `c` (default: 0.5)
//! - `rollout_depth_limit`: Optional cap on random playout length
//! - `verbose`: Log the rendered tree after the search
//!
//! # Evaluators
//!
//! Rollout end states are scored by an [`Evaluator`]:
//!
//! - [`HealthWeightedEvaluator`]: score scaled by remaining health (default)
//! - [`ScoreEvaluator`]: raw score

pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export main types
pub use config::MctsConfig;
pub use evaluator::{Evaluator, HealthWeightedEvaluator, ScoreEvaluator};
pub use node::{NodeId, SearchNode};
pub use search::{choose_action, Decision, MctsSearch, SearchError, SearchStats, Selection};
pub use tree::{SearchTree, TreeStats};
