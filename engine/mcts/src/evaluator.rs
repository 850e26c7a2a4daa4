//! Evaluator trait for leaf and terminal positions.
//!
//! The evaluator turns the state reached at the end of a rollout (or at a
//! leaf) into the scalar reward that is backpropagated. It must be a pure
//! function of the state so that every iteration of a decision is scored by
//! the same rule.

use engine_core::SearchState;

/// Trait for position evaluators.
///
/// Implementations:
/// - HealthWeightedEvaluator: score scaled by remaining health (default)
/// - ScoreEvaluator: raw score
pub trait Evaluator<S: SearchState> {
    /// Scalar reward for `state`; higher is better.
    fn evaluate(&self, state: &S) -> f64;
}

/// Rewards damage dealt while staying healthy:
/// `score * (base + health_weight * health)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthWeightedEvaluator {
    pub base: f64,
    pub health_weight: f64,
}

impl Default for HealthWeightedEvaluator {
    fn default() -> Self {
        Self {
            base: 0.5,
            health_weight: 0.5,
        }
    }
}

impl HealthWeightedEvaluator {
    pub fn new(base: f64, health_weight: f64) -> Self {
        Self {
            base,
            health_weight,
        }
    }
}

impl<S: SearchState> Evaluator<S> for HealthWeightedEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        state.score() * (self.base + self.health_weight * state.health())
    }
}

/// Uses the state's score as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluator;

impl<S: SearchState> Evaluator<S> for ScoreEvaluator {
    fn evaluate(&self, state: &S) -> f64 {
        state.score()
    }
}
