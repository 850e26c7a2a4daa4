//! Search tree node representation.
//!
//! Each node stands for the position reached by playing its action from the
//! parent's position. Because every iteration works on a freshly resampled
//! clone, a node does not store a state; it only accumulates the rewards of
//! the rollouts that passed through it.

use engine_core::SearchAction;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<A: SearchAction> {
    /// Parent node index (NONE for root). Never implies ownership.
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub action: Option<A>,

    /// Number of completed rollouts that passed through this node
    pub visits: u32,

    /// Sum of rewards backpropagated through this node
    pub total_reward: f64,

    /// Expanded children keyed by action identity, in insertion order
    pub children: Vec<(A::Key, NodeId)>,
}

impl<A: SearchAction> SearchNode<A> {
    /// Create a new root node.
    pub fn new_root() -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            visits: 0,
            total_reward: 0.0,
            children: Vec::new(),
        }
    }

    /// Create a new child node with zero statistics.
    pub fn new_child(parent: NodeId, action: A) -> Self {
        Self {
            parent,
            action: Some(action),
            visits: 0,
            total_reward: 0.0,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Mean reward, `total_reward / visits`.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn average_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    /// UCB1 priority relative to the parent's visit count.
    ///
    /// `average + c * sqrt(ln(parent_visits) / visits)`, or `+inf` for an
    /// unvisited node so that it is tried before any visited sibling.
    #[inline]
    pub fn ucb_score(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        let exploration_term = exploration * ((parent_visits as f64).ln() / visits).sqrt();
        self.average_score() + exploration_term
    }

    /// Child recorded under `key`, if that action has been expanded.
    pub fn child(&self, key: &A::Key) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, id)| *id)
    }

    #[inline]
    pub fn has_child(&self, key: &A::Key) -> bool {
        self.child(key).is_some()
    }

    /// Diagnostic label: the action's label, or `Root`.
    pub fn label(&self) -> String {
        self.action
            .as_ref()
            .map(|action| action.label())
            .unwrap_or_else(|| "Root".to_string())
    }
}
