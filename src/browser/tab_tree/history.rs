//! Back/forward availability queries.
//!
//! Browsing contexts answer history queries asynchronously, so the tree may
//! change before an answer arrives. A [`HistoryProbe`] owns its queries and
//! holds no borrow of the tree; the resolved [`HistoryState`] must be checked
//! with [`TabTree::is_current`] before it is shown.
//!
//! # Example
//!
//! ```ignore
//! let probe = tree.probe_history(tab_id)?;
//! let state = probe.resolve().await;
//! if tree.is_current(&state) {
//!     navbar.set_back_enabled(state.can_go_back);
//! }
//! ```

use std::fmt;

use futures_util::future::{self, BoxFuture};
use tracing::trace;

use crate::error::Result;
use crate::identifiers::TabId;

use super::core::TabTree;

// ============================================================================
// HistoryState
// ============================================================================

/// Resolved back/forward availability of one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryState {
    /// Tab the state was queried for.
    pub tab_id: TabId,
    /// Whether a back entry exists.
    pub can_go_back: bool,
    /// Whether a forward entry exists.
    pub can_go_forward: bool,
}

// ============================================================================
// HistoryProbe
// ============================================================================

/// Pending back/forward queries for one tab.
pub struct HistoryProbe {
    tab_id: TabId,
    back: BoxFuture<'static, bool>,
    forward: BoxFuture<'static, bool>,
}

impl fmt::Debug for HistoryProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryProbe")
            .field("tab_id", &self.tab_id)
            .finish_non_exhaustive()
    }
}

impl HistoryProbe {
    /// Returns the probed tab.
    #[inline]
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    /// Waits for both answers.
    pub async fn resolve(self) -> HistoryState {
        let (can_go_back, can_go_forward) = future::join(self.back, self.forward).await;
        trace!(tab_id = %self.tab_id, can_go_back, can_go_forward, "History resolved");
        HistoryState {
            tab_id: self.tab_id,
            can_go_back,
            can_go_forward,
        }
    }
}

// ============================================================================
// TabTree - History
// ============================================================================

impl TabTree {
    /// Starts back/forward queries for a tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`](crate::Error::TabNotFound) for an
    /// unknown tab.
    pub fn probe_history(&self, tab_id: TabId) -> Result<HistoryProbe> {
        let tab = self.tab(tab_id)?;
        Ok(HistoryProbe {
            tab_id,
            back: tab.can_go_back(),
            forward: tab.can_go_forward(),
        })
    }

    /// Returns `true` if `state` belongs to the selected tab and may be shown.
    #[must_use]
    pub fn is_current(&self, state: &HistoryState) -> bool {
        self.selected_tab() == Some(state.tab_id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::browser::tab_tree::AddTab;
    use crate::context::MemoryContextFactory;

    fn tree() -> TabTree {
        TabTree::builder()
            .context_factory(MemoryContextFactory::new())
            .empty()
            .build()
            .expect("build")
    }

    #[test]
    fn test_probe_resolves_history() {
        let mut tree = tree();
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        tree.tab_mut(a).expect("tab").set_location("https://b.com/");

        let state = tokio_test::block_on(tree.probe_history(a).expect("probe").resolve());
        assert_eq!(state.tab_id, a);
        assert!(state.can_go_back);
        assert!(!state.can_go_forward);
        assert!(tree.is_current(&state));
    }

    #[test]
    fn test_empty_tab_resolves_false() {
        let mut tree = tree();
        let a = tree.add_tab(AddTab::new()).expect("add");

        let state = tokio_test::block_on(tree.probe_history(a).expect("probe").resolve());
        assert!(!state.can_go_back);
        assert!(!state.can_go_forward);
    }

    #[test]
    fn test_stale_state_after_selection_change() {
        let mut tree = tree();
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        let b = tree.add_tab(AddTab::new().url("https://b.com/")).expect("add");

        let probe = tree.probe_history(a).expect("probe");
        tree.select_tab(b).expect("select");
        let state = tokio_test::block_on(probe.resolve());
        assert!(!tree.is_current(&state));
    }

    #[test]
    fn test_stale_state_after_drop() {
        let mut tree = tree();
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        tree.add_tab(AddTab::new().url("https://b.com/")).expect("add");

        let probe = tree.probe_history(a).expect("probe");
        tree.drop_tab_and_children(a).expect("drop");
        let state = tokio_test::block_on(probe.resolve());
        assert!(!tree.is_current(&state));
    }
}
