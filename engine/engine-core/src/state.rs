//! Typed state abstraction the search is generic over
//!
//! Games implement [`SearchState`] with their own action and command types.
//! The search engine only ever talks to a state through this trait, and only
//! to its own exclusive clone of it.

use rand::Rng;
use std::fmt::Debug;
use std::hash::Hash;

/// A single legal move.
///
/// Actions are value-like and never mutated by the search. Two actions taken
/// from different clones of the same position must report equal keys when
/// they denote the same move, even if the clones differ structurally.
///
/// # Example
///
/// ```rust
/// # use engine_core::SearchAction;
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Move {
///     Attack,
///     Pass,
/// }
///
/// impl SearchAction for Move {
///     type Key = Move;
///
///     fn key(&self) -> Move {
///         *self
///     }
/// }
///
/// assert_eq!(Move::Attack.key(), Move::Attack);
/// assert_eq!(Move::Pass.label(), "Pass");
/// ```
pub trait SearchAction: Clone + Debug {
    /// Identity used to key search-tree children
    type Key: Eq + Hash + Clone + Debug;

    /// Stable identity of this move across state clones
    fn key(&self) -> Self::Key;

    /// Human-readable label used by tree dumps
    fn label(&self) -> String {
        format!("{:?}", self)
    }
}

/// Mutable simulation of a game position.
///
/// # Contract
///
/// * `get_actions` may return an empty list; the search treats that as a leaf.
/// * `step` is only called with an action returned by `get_actions` on the
///   same state.
/// * Playing uniformly random legal actions must reach `ended()` or an empty
///   action list within a bounded number of steps. The search has no
///   internal timeout of its own.
/// * `copy_undeterministic` returns an independent state. It may resample
///   hidden stochastic elements (draw order, for instance), so two copies of
///   the same position can offer different futures.
pub trait SearchState: Sized {
    /// Move type enumerated by this state
    type Action: SearchAction;

    /// What the caller ultimately commits to the real game
    type Committed;

    /// Legal actions in the current position
    fn get_actions(&self) -> Vec<Self::Action>;

    /// Apply a legal action in place
    fn step(&mut self, action: &Self::Action);

    /// True once no further actions should be taken
    fn ended(&self) -> bool;

    /// Intrinsic task score of the position
    fn score(&self) -> f64;

    /// Health signal of the acting agent, usually normalised to `0.0..=1.0`
    fn health(&self) -> f64;

    /// Independent copy with hidden information resampled from `rng`
    fn copy_undeterministic<R: Rng + ?Sized>(&self, rng: &mut R) -> Self;

    /// Convert an action into the committable form the caller expects
    fn to_committed(&self, action: &Self::Action) -> Self::Committed;
}
