//! Structural mutation: adding, dropping and moving tabs.

use std::fmt;

use tracing::debug;

use crate::browser::tab::Tab;
use crate::context::BrowsingContext;
use crate::error::{Error, Result};
use crate::identifiers::{NodeId, TabId};

use super::core::{TabTree, TreeEvent};

// ============================================================================
// AddTab
// ============================================================================

/// Options for [`TabTree::add_tab`].
///
/// # Example
///
/// ```ignore
/// let child = tree.add_tab(AddTab::new().url("https://example.com").parent(opener))?;
/// ```
#[derive(Default)]
pub struct AddTab {
    url: Option<String>,
    parent: Option<TabId>,
    selected: bool,
    context: Option<Box<dyn BrowsingContext>>,
}

impl fmt::Debug for AddTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddTab")
            .field("url", &self.url)
            .field("parent", &self.parent)
            .field("selected", &self.selected)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

impl AddTab {
    /// Creates options for an empty, top-level, unselected tab.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigates the new tab to `url`.
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Nests the new tab as the last child of `parent`.
    #[inline]
    #[must_use]
    pub fn parent(mut self, parent: TabId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Selects the new tab.
    #[inline]
    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Adopts an existing browsing context instead of creating one lazily.
    #[inline]
    #[must_use]
    pub fn context(mut self, context: Box<dyn BrowsingContext>) -> Self {
        self.context = Some(context);
        self
    }
}

// ============================================================================
// TabTree - Structure
// ============================================================================

impl TabTree {
    /// Adds a tab as the last child of its parent (or of the root).
    ///
    /// The first tab of an empty tree is always selected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if the parent is unknown.
    pub fn add_tab(&mut self, request: AddTab) -> Result<TabId> {
        let AddTab {
            url,
            parent,
            selected,
            context,
        } = request;

        let parent_node = match parent {
            Some(parent) => self.node_of(parent)?,
            None => self.tree.root(),
        };
        let tree_was_empty = self.tree.children(self.tree.root()).is_empty();

        let tab_id = self.allocate_tab_id()?;
        let tab = Tab::new(tab_id, self.services.clone(), context);
        let node = self.tree.create_node(tab);
        if let Err(e) = self.tree.append_child(parent_node, node) {
            self.tree.remove_subtree(node)?;
            return Err(e);
        }
        self.index.insert(tab_id, node);
        debug!(tab_id = %tab_id, parent = ?parent, "Tab added");

        if let Some(url) = url.filter(|url| !url.is_empty()) {
            self.tab_mut(tab_id)?.set_location(&url);
        }

        if tree_was_empty || selected {
            self.select_tab(tab_id)?;
        }

        self.emit(TreeEvent::TreeLayoutChanged);
        Ok(tab_id)
    }

    /// Drops a tab together with its whole subtree.
    ///
    /// If the selection lies inside the subtree, the tab following the
    /// subtree is selected first, else the tab preceding it.
    ///
    /// # Errors
    ///
    /// - [`Error::TabNotFound`] for an unknown tab
    /// - [`Error::InvalidOperation`] if this would empty a tree configured to
    ///   keep its last tab
    pub fn drop_tab_and_children(&mut self, tab_id: TabId) -> Result<()> {
        let node = self.node_of(tab_id)?;
        let doomed = self
            .tree
            .pre_order(node)
            .filter(|&id| self.tree.payload(id).is_some())
            .count();
        self.check_can_drop(doomed)?;

        let selection_inside = self
            .selected_node()
            .is_some_and(|selected| self.tree.is_ancestor_or_self(node, selected));
        if selection_inside {
            let after = self.tree.next_node(self.tree.last_node(node));
            let replacement = after
                .or_else(|| self.tree.prev_node(node))
                .and_then(|id| self.tab_at(id));
            self.reselect(replacement)?;
        }

        let tabs = self.tree.remove_subtree(node)?;
        for mut tab in tabs {
            self.index.remove(&tab.id());
            tab.destroy();
        }
        debug!(tab_id = %tab_id, count = doomed, "Dropped tab and children");

        self.emit(TreeEvent::TreeLayoutChanged);
        Ok(())
    }

    /// Drops a single tab, splicing its children into its former position.
    ///
    /// # Errors
    ///
    /// - [`Error::TabNotFound`] for an unknown tab
    /// - [`Error::InvalidOperation`] if the tab's node is a root, or this
    ///   would empty a tree configured to keep its last tab
    pub fn drop_tab_and_move_children_up(&mut self, tab_id: TabId) -> Result<()> {
        let node = self.node_of(tab_id)?;
        let parent = self
            .tree
            .parent(node)
            .ok_or_else(|| Error::invalid_operation("cannot drop the root node"))?;
        self.check_can_drop(1)?;

        if self.tab(tab_id)?.is_selected() {
            let replacement = self
                .tree
                .next_node(node)
                .or_else(|| self.tree.prev_node(node))
                .and_then(|id| self.tab_at(id));
            self.reselect(replacement)?;
        }

        let children: Vec<NodeId> = self.tree.children(node).to_vec();
        for &child in children.iter().rev() {
            self.tree.append_child_after(parent, child, node)?;
        }

        let tabs = self.tree.remove_subtree(node)?;
        self.index.remove(&tab_id);
        for mut tab in tabs {
            tab.destroy();
        }
        debug!(tab_id = %tab_id, children = children.len(), "Dropped tab, children moved up");

        self.emit(TreeEvent::TreeLayoutChanged);
        Ok(())
    }

    /// Moves a tab and its subtree to right after `prev_tab`, under
    /// `prev_tab`'s parent.
    ///
    /// # Errors
    ///
    /// - [`Error::TabNotFound`] for an unknown tab
    /// - [`Error::InvalidOperation`] if `prev_tab` is `tab_id` or one of its
    ///   descendants
    pub fn move_tab_and_children_after(&mut self, tab_id: TabId, prev_tab: TabId) -> Result<()> {
        let node = self.node_of(tab_id)?;
        let prev_node = self.node_of(prev_tab)?;

        if self.tree.is_ancestor_or_self(node, prev_node) {
            return Err(Error::invalid_operation(format!(
                "cannot move tab {tab_id} after {prev_tab}, which lies in its own subtree"
            )));
        }
        let parent = self
            .tree
            .parent(prev_node)
            .ok_or_else(|| Error::invalid_operation("cannot move after the root node"))?;

        self.tree.append_child_after(parent, node, prev_node)?;
        debug!(tab_id = %tab_id, after = %prev_tab, "Moved tab and children");

        self.emit(TreeEvent::TreeLayoutChanged);
        Ok(())
    }

    /// Rejects drops that would empty a tree configured to keep a tab.
    fn check_can_drop(&self, count: usize) -> Result<()> {
        if !self.options.allow_empty && count >= self.tab_count() {
            return Err(Error::invalid_operation(
                "cannot drop the last remaining tabs",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
