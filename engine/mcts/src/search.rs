//! MCTS search implementation.
//!
//! Each iteration works on its own stochastic clone of the real state:
//! 1. Selection: descend through explored children using UCB1
//! 2. Expansion: materialise one random unexplored action as a new node
//! 3. Rollout: play uniformly random actions until the clone ends
//! 4. Backpropagation: add the evaluation to every node on the path

use std::time::Instant;

use engine_core::{SearchAction, SearchState};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::config::MctsConfig;
use crate::evaluator::Evaluator;
use crate::node::NodeId;
use crate::tree::SearchTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("No legal actions available")]
    NoLegalActions,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Outcome of a single decision.
#[derive(Debug, Clone)]
pub struct Decision<C> {
    /// Action to commit, in the caller's form
    pub action: C,

    /// What the search did to reach it
    pub stats: SearchStats,
}

/// Counters collected over one decision's iterations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Iterations run (0 when the single-action shortcut was taken)
    pub iterations: u32,
    /// Steps from a node into an already explored child
    pub descents: u32,
    /// Nodes created
    pub expansions: u32,
    /// Random playouts completed
    pub rollouts: u32,
    /// Actions applied during playouts
    pub rollout_steps: u64,
    /// Iterations that stopped at a node with no legal actions
    pub leaf_terminal: u32,
    /// Iterations that stopped because no recorded child was legal
    pub leaf_mismatch: u32,
    /// Leaf iterations (terminal or mismatch) that stopped at the root
    /// itself, so no child of the root was visited
    pub root_leaves: u32,
    /// Wall-clock time of the whole decision (microseconds)
    pub total_time_us: u64,
}

impl SearchStats {
    /// Copy with the wall-clock time cleared, leaving only counters that
    /// depend on the RNG seed.
    pub fn without_timing(&self) -> Self {
        Self {
            total_time_us: 0,
            ..self.clone()
        }
    }
}

/// What selection decided to do at one node for the current working state.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<A: SearchAction> {
    /// Every legal action is explored: step into `child` by playing `action`,
    /// the working state's own instance of that child's action.
    Descend { child: NodeId, action: A },

    /// These legal actions have no child yet.
    Expand(Vec<A>),

    /// The working state offers no actions; evaluate it here.
    LeafTerminal,

    /// Actions exist and all have children, yet UCB1 selection produced no
    /// usable child. A resampled clone whose action set differs from what
    /// the tree has seen is already absorbed by `Expand`, since any legal
    /// action without a child is expanded first, so this is unreachable
    /// with a consistent `SearchAction::key`. It is kept as the explicit
    /// degrade-to-leaf arm: evaluate here instead of descending.
    LeafMismatch,
}

/// MCTS search state for one decision.
pub struct MctsSearch<'a, S: SearchState, E: Evaluator<S>> {
    tree: SearchTree<S::Action>,
    evaluator: &'a E,
    config: MctsConfig,
    stats: SearchStats,
}

impl<'a, S: SearchState, E: Evaluator<S>> MctsSearch<'a, S, E> {
    /// Create a search with an empty tree.
    ///
    /// Each iteration adds at most one node, so the iteration budget must
    /// stay below `u32::MAX` for every node id to differ from `NodeId::NONE`.
    pub fn new(evaluator: &'a E, config: MctsConfig) -> Result<Self, SearchError> {
        if !config.exploration.is_finite() || config.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be a finite non-negative number, got {}",
                config.exploration
            )));
        }
        if config.iterations == u32::MAX {
            return Err(SearchError::InvalidConfig(format!(
                "iterations must be below {}",
                u32::MAX
            )));
        }

        Ok(Self {
            tree: SearchTree::new(),
            evaluator,
            config,
            stats: SearchStats::default(),
        })
    }

    /// Run the configured number of iterations against clones of `state`
    /// and return the chosen action.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        state: &S,
        rng: &mut R,
    ) -> Result<Decision<S::Committed>, SearchError> {
        let start = Instant::now();

        for _ in 0..self.config.iterations {
            self.iterate(state, rng);
        }

        if self.config.verbose {
            info!(
                "Search tree after {} iterations:\n{}",
                self.stats.iterations,
                self.tree.render()
            );
        }

        let best = self.best_action(state, rng)?;
        self.stats.total_time_us += start.elapsed().as_micros() as u64;

        let tree_stats = self.tree.stats();
        debug!(
            action = %best.label(),
            iterations = self.stats.iterations,
            nodes = tree_stats.total_nodes,
            max_depth = tree_stats.max_depth,
            root_value = tree_stats.root_value,
            time_us = self.stats.total_time_us,
            "MCTS decision"
        );

        Ok(Decision {
            action: state.to_committed(&best),
            stats: self.stats.clone(),
        })
    }

    /// Run one full iteration on a fresh stochastic clone of `state`.
    pub fn iterate<R: Rng + ?Sized>(&mut self, state: &S, rng: &mut R) {
        let working = state.copy_undeterministic(rng);
        self.stats.iterations += 1;
        self.search_from_root(working, rng);
    }

    /// Selection from the root with an already prepared working state. The
    /// state is consumed: it ends the iteration wherever the rollout left it.
    pub fn search_from_root<R: Rng + ?Sized>(&mut self, mut state: S, rng: &mut R) {
        let mut current = self.tree.root();
        let mut depth = 0u32;

        loop {
            match self.select(current, &state) {
                Selection::Descend { child, action } => {
                    state.step(&action);
                    self.stats.descents += 1;
                    current = child;
                    depth += 1;
                }
                Selection::Expand(unexplored) => {
                    trace!(depth, candidates = unexplored.len(), "Expanding node");
                    self.expand(current, state, unexplored, rng);
                    return;
                }
                Selection::LeafTerminal => {
                    trace!(depth, "No legal actions, evaluating leaf");
                    self.stats.leaf_terminal += 1;
                    if depth == 0 {
                        self.stats.root_leaves += 1;
                    }
                    self.evaluate_and_backpropagate(current, &state);
                    return;
                }
                Selection::LeafMismatch => {
                    trace!(depth, "Recorded children no longer legal, evaluating leaf");
                    self.stats.leaf_mismatch += 1;
                    if depth == 0 {
                        self.stats.root_leaves += 1;
                    }
                    self.evaluate_and_backpropagate(current, &state);
                    return;
                }
            }
        }
    }

    /// Decide what to do at `node_id` given the working state positioned there.
    pub fn select(&self, node_id: NodeId, state: &S) -> Selection<S::Action> {
        let actions = state.get_actions();
        if actions.is_empty() {
            return Selection::LeafTerminal;
        }

        let node = self.tree.get(node_id);
        let (explored, unexplored): (Vec<_>, Vec<_>) = actions
            .into_iter()
            .partition(|action| node.has_child(&action.key()));

        if !unexplored.is_empty() {
            return Selection::Expand(unexplored);
        }

        let legal: Vec<_> = explored.iter().map(SearchAction::key).collect();
        let Some(child) = self
            .tree
            .select_child(node_id, &legal, self.config.exploration)
        else {
            return Selection::LeafMismatch;
        };

        // Play the working state's own instance of the chosen action
        let child_key = self.tree.get(child).action.as_ref().map(SearchAction::key);
        explored
            .into_iter()
            .find(|action| Some(action.key()) == child_key)
            .map(|action| Selection::Descend { child, action })
            .unwrap_or(Selection::LeafMismatch)
    }

    /// Add one random unexplored action as a child, play it, then roll out.
    fn expand<R: Rng + ?Sized>(
        &mut self,
        node_id: NodeId,
        mut state: S,
        mut unexplored: Vec<S::Action>,
        rng: &mut R,
    ) {
        let index = rng.gen_range(0..unexplored.len());
        let action = unexplored.swap_remove(index);

        let child_id = self.tree.add_child(node_id, action.clone());
        self.stats.expansions += 1;

        state.step(&action);
        self.rollout(child_id, state, rng);
    }

    /// Play uniformly random actions until the state ends, runs out of
    /// actions or hits the configured horizon, then backpropagate.
    fn rollout<R: Rng + ?Sized>(&mut self, node_id: NodeId, mut state: S, rng: &mut R) {
        let mut steps = 0u32;

        while !state.ended() {
            if self
                .config
                .rollout_depth_limit
                .is_some_and(|limit| steps >= limit)
            {
                break;
            }
            let actions = state.get_actions();
            let Some(action) = actions.choose(rng) else {
                break;
            };
            state.step(action);
            steps += 1;
        }

        self.stats.rollouts += 1;
        self.stats.rollout_steps += u64::from(steps);
        let reward = self.evaluate_and_backpropagate(node_id, &state);
        trace!(node = node_id.0, steps, reward, "Rollout complete");
    }

    fn evaluate_and_backpropagate(&mut self, node_id: NodeId, state: &S) -> f64 {
        let reward = self.evaluator.evaluate(state);
        self.tree.backpropagate(node_id, reward);
        reward
    }

    /// Action to commit in `state`: the legal root child with the highest
    /// average score, or a uniformly random legal action when the tree has
    /// nothing usable.
    pub fn best_action<R: Rng + ?Sized>(
        &self,
        state: &S,
        rng: &mut R,
    ) -> Result<S::Action, SearchError> {
        let actions = state.get_actions();
        let legal: Vec<_> = actions.iter().map(SearchAction::key).collect();

        if let Some(child) = self.tree.best_child(&legal) {
            let child_key = self.tree.get(child).action.as_ref().map(SearchAction::key);
            if let Some(action) = actions.iter().find(|a| Some(a.key()) == child_key) {
                return Ok(action.clone());
            }
        }

        match actions.choose(rng) {
            Some(action) => {
                warn!(
                    fallback = %action.label(),
                    "MCTS produced no usable action, choosing at random"
                );
                Ok(action.clone())
            }
            None => {
                warn!("MCTS did not return any action: no legal actions");
                Err(SearchError::NoLegalActions)
            }
        }
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree<S::Action> {
        &self.tree
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

/// Choose an action for `state` with a fresh search tree.
///
/// A state with exactly one legal action returns it without searching. The
/// real state is only read and cloned; every iteration mutates its own copy.
pub fn choose_action<S, E, R>(
    state: &S,
    evaluator: &E,
    config: MctsConfig,
    rng: &mut R,
) -> Result<Decision<S::Committed>, SearchError>
where
    S: SearchState,
    E: Evaluator<S>,
    R: Rng + ?Sized,
{
    let actions = state.get_actions();
    if let [only] = actions.as_slice() {
        debug!(action = %only.label(), "Single legal action, skipping search");
        return Ok(Decision {
            action: state.to_committed(only),
            stats: SearchStats::default(),
        });
    }

    let mut search = MctsSearch::new(evaluator, config)?;
    search.run(state, rng)
}
