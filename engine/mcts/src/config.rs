//! MCTS configuration parameters.

/// Configuration for one decision's search.
///
/// The same configuration is used for every iteration of a decision; the
/// search never changes it mid-run.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of iterations to run per decision.
    pub iterations: u32,

    /// Exploration constant `c` of the UCB1 formula.
    /// Higher values spread visits more evenly, lower values exploit sooner.
    pub exploration: f64,

    /// Maximum number of random steps in one rollout.
    /// `None` plays until the state ends or runs out of actions.
    pub rollout_depth_limit: Option<u32>,

    /// Emit the rendered search tree after the iterations.
    pub verbose: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            exploration: 0.5,
            rollout_depth_limit: None,
            verbose: false,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 50,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: cap rollout length. Zero means unbounded.
    pub fn with_rollout_depth_limit(mut self, limit: u32) -> Self {
        self.rollout_depth_limit = (limit > 0).then_some(limit);
        self
    }

    /// Builder pattern: toggle the tree dump.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 100);
        assert!((config.exploration - 0.5).abs() < 1e-12);
        assert!(config.rollout_depth_limit.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(250)
            .with_exploration(1.4)
            .with_verbose(true);

        assert_eq!(config.iterations, 250);
        assert!((config.exploration - 1.4).abs() < 1e-12);
        assert!(config.verbose);
    }

    #[test]
    fn test_zero_depth_limit_is_unbounded() {
        let config = MctsConfig::for_testing().with_rollout_depth_limit(0);
        assert!(config.rollout_depth_limit.is_none());

        let config = config.with_rollout_depth_limit(12);
        assert_eq!(config.rollout_depth_limit, Some(12));
    }
}
