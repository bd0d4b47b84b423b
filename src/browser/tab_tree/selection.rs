//! Selection and pre-order traversal over tabs.

use tracing::debug;

use crate::browser::tab::Tab;
use crate::error::{Error, Result};
use crate::identifiers::{NodeId, TabId};

use super::core::{TabTree, TreeEvent};

// ============================================================================
// TabTree - Selection
// ============================================================================

impl TabTree {
    /// Returns the selected tab, `None` only for an empty tree.
    #[must_use]
    pub fn selected_tab(&self) -> Option<TabId> {
        self.selected_node().and_then(|node| self.tab_at(node))
    }

    pub(crate) fn selected_node(&self) -> Option<NodeId> {
        self.tree.find(self.tree.root(), |_, node| {
            node.payload().is_some_and(Tab::is_selected)
        })
    }

    /// Selects a tab, deselecting the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] for an unknown tab.
    pub fn select_tab(&mut self, tab_id: TabId) -> Result<()> {
        self.node_of(tab_id)?;
        let previous = self.selected_tab();
        if previous == Some(tab_id) {
            return Ok(());
        }

        if let Some(previous) = previous {
            self.tab_mut(previous)?.set_selected(false);
        }
        self.tab_mut(tab_id)?.set_selected(true);
        debug!(tab_id = %tab_id, previous = ?previous, "Tab selected");

        self.emit(TreeEvent::SelectedTabChanged);
        Ok(())
    }

    /// Moves the selection to `replacement`, or clears it when there is none.
    pub(crate) fn reselect(&mut self, replacement: Option<TabId>) -> Result<()> {
        if let Some(tab_id) = replacement {
            return self.select_tab(tab_id);
        }

        if let Some(previous) = self.selected_tab() {
            self.tab_mut(previous)?.set_selected(false);
            debug!(tab_id = %previous, "Selection cleared");
            self.emit(TreeEvent::SelectedTabChanged);
        }
        Ok(())
    }

    /// Selects the next tab in pre-order, wrapping to the first.
    ///
    /// No-op for an empty tree.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures.
    pub fn select_next_tab(&mut self) -> Result<()> {
        let Some(current) = self.selected_tab() else {
            return Ok(());
        };
        let next = self.next_tab_and_loop(current)?;
        self.select_tab(next)
    }

    /// Selects the previous tab in pre-order, wrapping to the last.
    ///
    /// No-op for an empty tree.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures.
    pub fn select_prev_tab(&mut self) -> Result<()> {
        let Some(current) = self.selected_tab() else {
            return Ok(());
        };
        let previous = self.previous_tab_and_loop(current)?;
        self.select_tab(previous)
    }
}

// ============================================================================
// TabTree - Traversal
// ============================================================================

impl TabTree {
    /// Returns the first tab in pre-order.
    #[must_use]
    pub fn first_tab(&self) -> Option<TabId> {
        let first = *self.tree.children(self.tree.root()).first()?;
        self.tab_at(first)
    }

    /// Returns the last tab in pre-order.
    #[must_use]
    pub fn last_tab(&self) -> Option<TabId> {
        self.tab_at(self.tree.last_node(self.tree.root()))
    }

    /// Returns the tab after `tab_id` in pre-order, without wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] for an unknown tab.
    pub fn next_tab(&self, tab_id: TabId) -> Result<Option<TabId>> {
        let node = self.node_of(tab_id)?;
        Ok(self.tree.next_node(node).and_then(|next| self.tab_at(next)))
    }

    /// Returns the tab before `tab_id` in pre-order, without wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] for an unknown tab.
    pub fn previous_tab(&self, tab_id: TabId) -> Result<Option<TabId>> {
        let node = self.node_of(tab_id)?;
        Ok(self.tree.prev_node(node).and_then(|prev| self.tab_at(prev)))
    }

    /// Returns the tab after `tab_id`, wrapping to the first tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] for an unknown tab.
    pub fn next_tab_and_loop(&self, tab_id: TabId) -> Result<TabId> {
        self.next_tab(tab_id)?
            .or_else(|| self.first_tab())
            .ok_or_else(|| Error::tab_not_found(tab_id))
    }

    /// Returns the tab before `tab_id`, wrapping to the last tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] for an unknown tab.
    pub fn previous_tab_and_loop(&self, tab_id: TabId) -> Result<TabId> {
        self.previous_tab(tab_id)?
            .or_else(|| self.last_tab())
            .ok_or_else(|| Error::tab_not_found(tab_id))
    }
}

// ============================================================================
// Tests
// ============================================================================
