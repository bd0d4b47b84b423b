//! Tree arena and structural mutation.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{Error, Result};
use crate::identifiers::NodeId;

// ============================================================================
// TreeNode
// ============================================================================

/// A single node: optional payload, ordered children, parent back-reference.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// Payload (always `None` for the root).
    payload: Option<T>,
    /// Parent node, `None` while detached or for the root.
    parent: Option<NodeId>,
    /// Ordered children.
    children: Vec<NodeId>,
}

impl<T> TreeNode<T> {
    fn new(payload: Option<T>) -> Self {
        Self {
            payload,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns the payload.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Returns the payload mutably.
    #[inline]
    #[must_use]
    pub fn payload_mut(&mut self) -> Option<&mut T> {
        self.payload.as_mut()
    }

    /// Returns the parent node.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children in order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` if the node has no parent.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

// ============================================================================
// Tree
// ============================================================================

/// Arena of [`TreeNode`]s rooted at [`NodeId::ROOT`].
///
/// Nodes are created detached with [`Tree::create_node`] and become part of
/// the tree once appended under an attached node.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: FxHashMap<NodeId, TreeNode<T>>,
    next_id: u64,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tree - Constructor
// ============================================================================

impl<T> Tree<T> {
    /// Creates a tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = FxHashMap::default();
        nodes.insert(NodeId::ROOT, TreeNode::new(None));
        Self { nodes, next_id: 1 }
    }

    /// Creates a detached node holding `payload`.
    pub fn create_node(&mut self, payload: T) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, TreeNode::new(Some(payload)));
        trace!(node_id = %id, "Node created");
        id
    }
}

// ============================================================================
// Tree - Accessors
// ============================================================================

impl<T> Tree<T> {
    /// Returns the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the number of live nodes, root and detached nodes included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if only the root exists.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Returns `true` if the node exists.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] for an unknown ID.
    pub fn node(&self, id: NodeId) -> Result<&TreeNode<T>> {
        self.nodes.get(&id).ok_or_else(|| Error::node_not_found(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut TreeNode<T>> {
        self.nodes.get_mut(&id).ok_or_else(|| Error::node_not_found(id))
    }

    /// Returns the payload of a node.
    #[inline]
    #[must_use]
    pub fn payload(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(&id).and_then(TreeNode::payload)
    }

    /// Returns the payload of a node mutably.
    #[inline]
    #[must_use]
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(&id).and_then(TreeNode::payload_mut)
    }

    /// Returns the parent of a node.
    #[inline]
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(TreeNode::parent)
    }

    /// Returns the children of a node (empty for unknown IDs).
    #[inline]
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(TreeNode::children).unwrap_or_default()
    }

    /// Returns `true` if the node has no parent.
    #[inline]
    #[must_use]
    pub fn is_root(&self, id: NodeId) -> bool {
        self.parent(id).is_none()
    }

    /// Returns the topmost ancestor of a node.
    #[must_use]
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Returns the distance from the topmost ancestor (root = 0).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] for an unknown ID.
    pub fn depth(&self, id: NodeId) -> Result<usize> {
        let mut depth = 0;
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            depth += 1;
            current = self.node(parent)?;
        }
        Ok(depth)
    }

    /// Returns `true` if `ancestor` is `node` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

// ============================================================================
// Tree - Structural Mutation
// ============================================================================

impl<T> Tree<T> {
    /// Appends `node` as the last child of `parent`, detaching it first.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeNotFound`] if either node is unknown
    /// - [`Error::InvalidOperation`] if `node` is the root or `parent` lies in
    ///   the subtree of `node`
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<NodeId> {
        self.check_attachable(parent, node)?;
        self.detach(node)?;
        self.node_mut(parent)?.children.push(node);
        self.node_mut(node)?.parent = Some(parent);
        trace!(parent = %parent, node_id = %node, "Node appended");
        Ok(node)
    }

    /// Inserts `node` right after `sibling` in `parent`'s children,
    /// detaching it first.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeNotFound`] if any node is unknown
    /// - [`Error::InvalidArgument`] if `sibling` is not a child of `parent`
    ///   or is `node` itself
    /// - [`Error::InvalidOperation`] if `node` is the root or `parent` lies in
    ///   the subtree of `node`
    pub fn append_child_after(
        &mut self,
        parent: NodeId,
        node: NodeId,
        sibling: NodeId,
    ) -> Result<NodeId> {
        if self.node(sibling)?.parent != Some(parent) || sibling == node {
            return Err(Error::invalid_argument(format!(
                "node {sibling} is not a child of {parent}"
            )));
        }
        self.check_attachable(parent, node)?;
        self.detach(node)?;

        let children = &mut self.node_mut(parent)?.children;
        let index = children
            .iter()
            .position(|&child| child == sibling)
            .ok_or_else(|| {
                Error::invalid_argument(format!("node {sibling} is not a child of {parent}"))
            })?;
        children.insert(index + 1, node);
        self.node_mut(node)?.parent = Some(parent);
        trace!(parent = %parent, node_id = %node, sibling = %sibling, "Node inserted");
        Ok(node)
    }

    /// Removes `node` from its parent's children. No-op for a root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeNotFound`] for an unknown ID.
    pub fn detach(&mut self, node: NodeId) -> Result<NodeId> {
        let Some(parent) = self.node_mut(node)?.parent.take() else {
            return Ok(node);
        };
        self.node_mut(parent)?.children.retain(|&child| child != node);
        trace!(parent = %parent, node_id = %node, "Node detached");
        Ok(node)
    }

    /// Detaches `node` and discards it with its whole subtree.
    ///
    /// Returns the payloads in pre-order.
    ///
    /// # Errors
    ///
    /// - [`Error::NodeNotFound`] for an unknown ID
    /// - [`Error::InvalidOperation`] for the tree root
    pub fn remove_subtree(&mut self, node: NodeId) -> Result<Vec<T>> {
        if node == NodeId::ROOT {
            return Err(Error::invalid_operation("cannot discard the root node"));
        }
        self.detach(node)?;

        let ids: Vec<NodeId> = self.pre_order(node).collect();
        let payloads = ids
            .iter()
            .filter_map(|id| self.nodes.remove(id))
            .filter_map(|removed| removed.payload)
            .collect();
        trace!(node_id = %node, count = ids.len(), "Subtree discarded");
        Ok(payloads)
    }

    fn check_attachable(&self, parent: NodeId, node: NodeId) -> Result<()> {
        self.node(parent)?;
        self.node(node)?;
        if node == NodeId::ROOT {
            return Err(Error::invalid_operation("cannot attach the root node"));
        }
        if self.is_ancestor_or_self(node, parent) {
            return Err(Error::invalid_operation(format!(
                "cannot attach node {node} inside its own subtree"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Tree<&'static str>, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let a = tree.create_node("a");
        let b = tree.create_node("b");
        let c = tree.create_node("c");
        let root = tree.root();
        tree.append_child(root, a).expect("append a");
        tree.append_child(root, b).expect("append b");
        tree.append_child(root, c).expect("append c");
        (tree, a, b, c)
    }

    #[test]
    fn test_new_tree_has_only_root() {
        let tree: Tree<u8> = Tree::new();
        assert!(tree.is_empty());
        assert!(tree.is_root(tree.root()));
        assert!(tree.payload(tree.root()).is_none());
    }

    #[test]
    fn test_created_node_is_detached() {
        let mut tree = Tree::new();
        let a = tree.create_node(1);
        assert!(tree.is_root(a));
        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.payload(a), Some(&1));
    }

    #[test]
    fn test_append_child_moves_node() {
        let (mut tree, a, b, c) = sample();
        tree.append_child(a, c).expect("move c under a");

        assert_eq!(tree.children(tree.root()), &[a, b]);
        assert_eq!(tree.children(a), &[c]);
        assert_eq!(tree.parent(c), Some(a));
    }

    #[test]
    fn test_append_child_after_inserts_next_to_sibling() {
        let (mut tree, a, b, c) = sample();
        let root = tree.root();
        tree.append_child_after(root, c, a).expect("insert");
        assert_eq!(tree.children(root), &[a, c, b]);
    }

    #[test]
    fn test_append_child_after_moving_forward_within_parent() {
        let (mut tree, a, b, c) = sample();
        let root = tree.root();
        tree.append_child_after(root, a, c).expect("insert");
        assert_eq!(tree.children(root), &[b, c, a]);
    }

    #[test]
    fn test_append_child_after_rejects_foreign_sibling() {
        let (mut tree, a, b, c) = sample();
        tree.append_child(a, b).expect("nest b");
        let err = tree.append_child_after(tree.root(), c, b).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(tree.parent(c), Some(tree.root()));
    }

    #[test]
    fn test_append_child_after_rejects_self_as_sibling() {
        let (mut tree, a, _, _) = sample();
        let err = tree.append_child_after(tree.root(), a, a).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_append_child_rejects_cycle() {
        let (mut tree, a, b, _) = sample();
        tree.append_child(a, b).expect("nest b");
        let err = tree.append_child(b, a).unwrap_err();
        assert!(matches!(err, Error::InvalidOperation { .. }));
        assert_eq!(tree.parent(a), Some(tree.root()));
    }

    #[test]
    fn test_append_root_rejected() {
        let (mut tree, a, _, _) = sample();
        let err = tree.append_child(a, tree.root()).unwrap_err();
        assert!(matches!(err, Error::InvalidOperation { .. }));
    }

    #[test]
    fn test_detach_is_idempotent() {
        let (mut tree, a, b, c) = sample();
        tree.detach(b).expect("detach");
        tree.detach(b).expect("detach again");
        tree.detach(tree.root()).expect("detach root");
        assert_eq!(tree.children(tree.root()), &[a, c]);
        assert!(tree.is_root(b));
    }

    #[test]
    fn test_depth() {
        let (mut tree, a, b, c) = sample();
        tree.append_child(a, b).expect("nest b");
        tree.append_child(b, c).expect("nest c");
        assert_eq!(tree.depth(tree.root()).expect("depth"), 0);
        assert_eq!(tree.depth(a).expect("depth"), 1);
        assert_eq!(tree.depth(c).expect("depth"), 3);
    }

    #[test]
    fn test_remove_subtree_returns_payloads_in_order() {
        let (mut tree, a, b, c) = sample();
        tree.append_child(a, b).expect("nest b");
        let removed = tree.remove_subtree(a).expect("remove");
        assert_eq!(removed, vec!["a", "b"]);
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
        assert_eq!(tree.children(tree.root()), &[c]);
    }

    #[test]
    fn test_remove_root_rejected() {
        let (mut tree, _, _, _) = sample();
        assert!(tree.remove_subtree(tree.root()).is_err());
    }

    #[test]
    fn test_unknown_node() {
        let (mut tree, a, _, _) = sample();
        tree.remove_subtree(a).expect("remove");
        assert!(tree.node(a).unwrap_err().is_not_found());
        assert!(tree.append_child(tree.root(), a).unwrap_err().is_not_found());
    }
}
