//! Core TabTree struct, accessors and notifications.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::browser::favicon::FaviconResolver;
use crate::browser::keybindings::Keymap;
use crate::browser::tab::{Tab, TabServices};
use crate::config::ChromeOptions;
use crate::context::{ContextFactory, ResourceEvent};
use crate::error::{Error, Result};
use crate::identifiers::{NodeId, TabId};
use crate::tree::Tree;

// ============================================================================
// TreeEvent
// ============================================================================

/// Change notification for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeEvent {
    /// Tabs were added, removed or reordered; re-render the whole tree.
    TreeLayoutChanged,
    /// The selection moved.
    SelectedTabChanged,
    /// One tab's state changed; refresh its row.
    TabUpdate(TabId),
}

// ============================================================================
// TabRow
// ============================================================================

/// One row of a tab list, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRow {
    /// Tab the row shows.
    pub tab_id: TabId,
    /// Nesting level; top-level tabs are 0.
    pub depth: usize,
    /// Label: title, else a loading hint, else the location.
    pub title: String,
    /// Icon URL.
    pub favicon: String,
    /// Whether the tab is loading.
    pub loading: bool,
    /// Whether the tab is selected.
    pub selected: bool,
}

// ============================================================================
// TabTree
// ============================================================================

/// Ordered, hierarchical collection of tabs.
///
/// Invariant: while the tree holds at least one tab, exactly one is selected.
pub struct TabTree {
    pub(crate) tree: Tree<Tab>,
    pub(crate) index: FxHashMap<TabId, NodeId>,
    pub(crate) options: ChromeOptions,
    pub(crate) keymap: Keymap,
    pub(crate) services: Arc<TabServices>,
    pub(crate) events: mpsc::UnboundedReceiver<(TabId, ResourceEvent)>,
    pub(crate) listeners: Vec<mpsc::UnboundedSender<TreeEvent>>,
    pub(crate) next_tab_id: u32,
}

impl fmt::Debug for TabTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabTree")
            .field("tabs", &self.index.len())
            .field("selected", &self.selected_tab())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

/// Pre-order dump: `[*]` marks the selection, three spaces per depth.
impl fmt::Display for TabTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.tree.pre_order(self.tree.root()) {
            let Some(tab) = self.tree.payload(id) else {
                continue;
            };
            let depth = self.tree.depth(id).map_err(|_| fmt::Error)?;
            let marker = if tab.is_selected() { "[*]" } else { "[ ]" };
            writeln!(f, "{marker}{}{tab}", "   ".repeat(depth))?;
        }
        Ok(())
    }
}

impl TabTree {
    /// Creates an empty tree.
    pub(crate) fn new(
        options: ChromeOptions,
        factory: Box<dyn ContextFactory>,
        favicons: Box<dyn FaviconResolver>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let services = Arc::new(TabServices {
            factory,
            favicons,
            events: tx,
            config: options.context_config(),
        });

        Self {
            tree: Tree::new(),
            index: FxHashMap::default(),
            keymap: Keymap::for_platform(options.platform),
            options,
            services,
            events: rx,
            listeners: Vec::new(),
            next_tab_id: 1,
        }
    }
}

// ============================================================================
// TabTree - Accessors
// ============================================================================

impl TabTree {
    /// Returns a tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] for an unknown ID.
    pub fn tab(&self, tab_id: TabId) -> Result<&Tab> {
        let node = self.node_of(tab_id)?;
        self.tree
            .payload(node)
            .ok_or_else(|| Error::tab_not_found(tab_id))
    }

    /// Returns a tab mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] for an unknown ID.
    pub fn tab_mut(&mut self, tab_id: TabId) -> Result<&mut Tab> {
        let node = self.node_of(tab_id)?;
        self.tree
            .payload_mut(node)
            .ok_or_else(|| Error::tab_not_found(tab_id))
    }

    /// Returns `true` if the tab is in the tree.
    #[inline]
    #[must_use]
    pub fn contains(&self, tab_id: TabId) -> bool {
        self.index.contains_key(&tab_id)
    }

    /// Returns the number of tabs.
    #[inline]
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the tree holds no tab.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the options the tree was built with.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ChromeOptions {
        &self.options
    }

    /// Returns the active keymap.
    #[inline]
    #[must_use]
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Returns the keymap for rebinding.
    #[inline]
    pub fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    /// Returns the underlying tree, e.g. for custom traversals.
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &Tree<Tab> {
        &self.tree
    }

    /// Returns the tree node holding a tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] for an unknown ID.
    pub fn node_of(&self, tab_id: TabId) -> Result<NodeId> {
        self.index
            .get(&tab_id)
            .copied()
            .ok_or_else(|| Error::tab_not_found(tab_id))
    }

    /// Returns the tab held by a node, if any.
    #[inline]
    #[must_use]
    pub(crate) fn tab_at(&self, node: NodeId) -> Option<TabId> {
        self.tree.payload(node).map(Tab::id)
    }

    /// Returns every tab in pre-order.
    #[must_use]
    pub fn tab_ids(&self) -> Vec<TabId> {
        self.tree
            .pre_order(self.tree.root())
            .filter_map(|node| self.tab_at(node))
            .collect()
    }

    /// Returns the tab list rows in pre-order.
    #[must_use]
    pub fn rows(&self) -> Vec<TabRow> {
        self.tree
            .pre_order(self.tree.root())
            .filter_map(|node| {
                let tab = self.tree.payload(node)?;
                let depth = self.tree.depth(node).ok()?;
                Some(TabRow {
                    tab_id: tab.id(),
                    depth: depth.saturating_sub(1),
                    title: tab.display_title().to_string(),
                    favicon: tab.favicon(),
                    loading: tab.is_loading(),
                    selected: tab.is_selected(),
                })
            })
            .collect()
    }
}

// ============================================================================
// TabTree - Notifications
// ============================================================================

impl TabTree {
    /// Registers a notification consumer. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<TreeEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push(tx);
        trace!(listeners = self.listeners.len(), "Tree listener added");
        rx
    }

    /// Sends `event` to every live listener.
    pub(crate) fn emit(&mut self, event: TreeEvent) {
        trace!(event = ?event, "Tree event");
        self.listeners.retain(|listener| listener.send(event).is_ok());
    }

    /// Allocates the next tab ID.
    pub(crate) fn allocate_tab_id(&mut self) -> Result<TabId> {
        let id = TabId::new(self.next_tab_id)
            .ok_or_else(|| Error::invalid_operation("tab ID space exhausted"))?;
        self.next_tab_id = self
            .next_tab_id
            .checked_add(1)
            .ok_or_else(|| Error::invalid_operation("tab ID space exhausted"))?;
        Ok(id)
    }
}

// ============================================================================
// TabTree - Teardown
// ============================================================================

impl TabTree {
    /// Destroys every tab and releases the tree.
    pub fn close(mut self) {
        let ids = self.tab_ids();
        for tab_id in &ids {
            if let Ok(tab) = self.tab_mut(*tab_id) {
                tab.destroy();
            }
        }
        debug!(tabs = ids.len(), "Destroyed tabs");
        info!("Tab tree closed");
    }
}
