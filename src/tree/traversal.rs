//! Depth-first traversal.
//!
//! Every traversal follows pre-order: a node, then each child subtree in
//! order. This is the order rows appear in a tree view, so "next" and
//! "previous" always mean the visually adjacent row.

use crate::identifiers::NodeId;

use super::{Tree, TreeNode};

// ============================================================================
// PreOrder
// ============================================================================

/// Pre-order iterator over a subtree.
pub struct PreOrder<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<T> Iterator for PreOrder<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

// ============================================================================
// Tree - Traversal
// ============================================================================

impl<T> Tree<T> {
    /// Iterates the subtree under `from` (inclusive) in pre-order.
    ///
    /// Yields nothing for an unknown node.
    #[must_use]
    pub fn pre_order(&self, from: NodeId) -> PreOrder<'_, T> {
        let stack = if self.contains(from) {
            vec![from]
        } else {
            Vec::new()
        };
        PreOrder { tree: self, stack }
    }

    /// Returns the first node under `from` (inclusive, pre-order) matching
    /// `predicate`.
    pub fn find<F>(&self, from: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(NodeId, &TreeNode<T>) -> bool,
    {
        self.pre_order(from)
            .find(|&id| self.node(id).is_ok_and(|node| predicate(id, node)))
    }

    /// Like [`find`](Self::find), but visits the last child subtree first
    /// and each node after its children: the exact reverse of pre-order.
    pub fn find_reverse<F>(&self, from: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(NodeId, &TreeNode<T>) -> bool,
    {
        let order: Vec<NodeId> = self.pre_order(from).collect();
        order
            .into_iter()
            .rev()
            .find(|&id| self.node(id).is_ok_and(|node| predicate(id, node)))
    }

    /// Calls `callback` on every node under `from` (inclusive) in pre-order.
    pub fn walk<F>(&self, from: NodeId, mut callback: F)
    where
        F: FnMut(NodeId, &TreeNode<T>),
    {
        for id in self.pre_order(from) {
            if let Ok(node) = self.node(id) {
                callback(id, node);
            }
        }
    }

    /// Returns the node following `id` in the pre-order of its whole tree.
    #[must_use]
    pub fn next_node(&self, id: NodeId) -> Option<NodeId> {
        let mut order = self.pre_order(self.root_of(id));
        order.find(|&n| n == id)?;
        order.next()
    }

    /// Returns the node preceding `id` in the pre-order of its whole tree.
    #[must_use]
    pub fn prev_node(&self, id: NodeId) -> Option<NodeId> {
        let mut previous = None;
        for n in self.pre_order(self.root_of(id)) {
            if n == id {
                return previous;
            }
            previous = Some(n);
        }
        None
    }

    /// Returns the last node of the subtree under `id` in pre-order.
    #[must_use]
    pub fn last_node(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(&last) = self.children(current).last() {
            current = last;
        }
        current
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    /// root
    /// ├── a
    /// │   ├── a1
    /// │   └── a2
    /// │       └── a21
    /// └── b
    /// ```
    fn sample() -> (Tree<&'static str>, [NodeId; 5]) {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_node("a");
        let a1 = tree.create_node("a1");
        let a2 = tree.create_node("a2");
        let a21 = tree.create_node("a21");
        let b = tree.create_node("b");
        tree.append_child(root, a).expect("a");
        tree.append_child(a, a1).expect("a1");
        tree.append_child(a, a2).expect("a2");
        tree.append_child(a2, a21).expect("a21");
        tree.append_child(root, b).expect("b");
        (tree, [a, a1, a2, a21, b])
    }

    fn labels(tree: &Tree<&'static str>, ids: impl IntoIterator<Item = NodeId>) -> Vec<&'static str> {
        ids.into_iter()
            .filter_map(|id| tree.payload(id).copied())
            .collect()
    }

    #[test]
    fn test_pre_order() {
        let (tree, _) = sample();
        let order = labels(&tree, tree.pre_order(tree.root()));
        assert_eq!(order, vec!["a", "a1", "a2", "a21", "b"]);
    }

    #[test]
    fn test_pre_order_of_subtree() {
        let (tree, [a, ..]) = sample();
        assert_eq!(labels(&tree, tree.pre_order(a)), vec!["a", "a1", "a2", "a21"]);
    }

    #[test]
    fn test_find_visits_self_first() {
        let (tree, [a, ..]) = sample();
        let found = tree.find(a, |_, node| node.payload().is_some());
        assert_eq!(found, Some(a));
    }

    #[test]
    fn test_find_reverse_visits_children_last_first() {
        let (tree, [_, _, _, a21, b]) = sample();
        let mut visited = Vec::new();
        let found = tree.find_reverse(tree.root(), |id, _| {
            visited.push(id);
            false
        });
        assert!(found.is_none());
        assert_eq!(visited.first(), Some(&b));
        assert_eq!(visited.get(1), Some(&a21));
        assert_eq!(visited.last(), Some(&tree.root()));
    }

    #[test]
    fn test_walk_visits_everything() {
        let (tree, _) = sample();
        let mut count = 0;
        tree.walk(tree.root(), |_, _| count += 1);
        assert_eq!(count, 6);
    }

    #[test]
    fn test_next_node_descends_into_children() {
        let (tree, [a, a1, a2, a21, b]) = sample();
        assert_eq!(tree.next_node(a), Some(a1));
        assert_eq!(tree.next_node(a1), Some(a2));
        assert_eq!(tree.next_node(a21), Some(b));
        assert_eq!(tree.next_node(b), None);
    }

    #[test]
    fn test_prev_node_climbs_to_parent() {
        let (tree, [a, a1, a2, a21, b]) = sample();
        assert_eq!(tree.prev_node(b), Some(a21));
        assert_eq!(tree.prev_node(a2), Some(a1));
        assert_eq!(tree.prev_node(a1), Some(a));
        assert_eq!(tree.prev_node(a), Some(tree.root()));
        assert_eq!(tree.prev_node(tree.root()), None);
    }

    #[test]
    fn test_last_node() {
        let (tree, [a, a1, _, a21, b]) = sample();
        assert_eq!(tree.last_node(tree.root()), b);
        assert_eq!(tree.last_node(a), a21);
        assert_eq!(tree.last_node(a1), a1);
    }

    #[test]
    fn test_neighbours_of_detached_subtree() {
        let (mut tree, [a, a1, a2, ..]) = sample();
        tree.detach(a).expect("detach");
        assert_eq!(tree.prev_node(a), None);
        assert_eq!(tree.next_node(a), Some(a1));
        assert_eq!(tree.prev_node(a2), Some(a1));
    }
}
