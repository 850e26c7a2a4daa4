//! Search tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! Parent links are plain indices, so ownership only ever flows from the
//! arena (and, logically, from parent to child). The whole arena is dropped
//! once a decision has been committed.

use std::fmt::Write as _;

use engine_core::SearchAction;

use crate::node::{NodeId, SearchNode};

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<A: SearchAction> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<A>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<A: SearchAction> Default for SearchTree<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: SearchAction> SearchTree<A> {
    /// Create a tree holding only a fresh root.
    pub fn new() -> Self {
        Self {
            nodes: vec![SearchNode::new_root()],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child of `node_id` recorded under `key`.
    #[inline]
    pub fn child(&self, node_id: NodeId, key: &A::Key) -> Option<NodeId> {
        self.get(node_id).child(key)
    }

    /// Materialise `action` as a new child of `parent_id`.
    ///
    /// The caller guarantees the action's key is not yet present under the
    /// parent; a node exists in the child list iff its action was expanded.
    /// The arena holds fewer than `u32::MAX` nodes, so no id equals
    /// `NodeId::NONE`; `MctsSearch::new` bounds the iteration budget to match.
    pub fn add_child(&mut self, parent_id: NodeId, action: A) -> NodeId {
        debug_assert!(
            !self.get(parent_id).has_child(&action.key()),
            "add_child: {:?} already expanded under {:?}",
            action,
            parent_id
        );

        debug_assert!(
            self.nodes.len() < NodeId::NONE.0 as usize,
            "node arena full at {} nodes",
            self.nodes.len()
        );
        let key = action.key();
        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new_child(parent_id, action));
        self.get_mut(parent_id).children.push((key, child_id));
        child_id
    }

    /// Select the child of `node_id` with the highest UCB1 score among those
    /// whose key is in `legal`.
    ///
    /// Exact ties go to the child that was expanded first. Returns None when
    /// no recorded child is legal any more.
    pub fn select_child(
        &self,
        node_id: NodeId,
        legal: &[A::Key],
        exploration: f64,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        let parent_visits = node.visits;

        first_max_by_score(
            node.children
                .iter()
                .filter(|(key, _)| legal.contains(key))
                .map(|(_, id)| (*id, self.get(*id).ucb_score(parent_visits, exploration))),
        )
    }

    /// Child of the root with the highest average score among those whose key
    /// is in `legal`. Exact ties go to the child that was expanded first.
    pub fn best_child(&self, legal: &[A::Key]) -> Option<NodeId> {
        first_max_by_score(
            self.get(self.root)
                .children
                .iter()
                .filter(|(key, _)| legal.contains(key))
                .map(|(_, id)| (*id, self.get(*id).average_score())),
        )
    }

    /// Record one rollout result on `leaf_id` and every ancestor.
    ///
    /// The same reward is added at each level: the search optimises a single
    /// agent, so there is no sign flip and no decay.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.total_reward += reward;
            current_id = node.parent;
        }
    }

    /// Render the tree, one node per line: `label visits average`, indented
    /// two spaces per level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, 0, &mut out);
        out
    }

    fn render_node(&self, node_id: NodeId, indent: usize, out: &mut String) {
        let node = self.get(node_id);
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{:indent$}{} {} {:.2}",
            "",
            node.label(),
            node.visits,
            node.average_score(),
            indent = indent
        );
        for (_, child_id) in &node.children {
            self.render_node(*child_id, indent + 2, out);
        }
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_value: root.average_score(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        self.get(node_id)
            .children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Highest-scoring entry; the earliest one wins exact ties.
fn first_max_by_score(candidates: impl Iterator<Item = (NodeId, f64)>) -> Option<NodeId> {
    candidates
        .fold(None, |best: Option<(NodeId, f64)>, (id, score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((id, score)),
        })
        .map(|(id, _)| id)
}

/// Statistics about a search tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
