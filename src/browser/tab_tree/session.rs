//! Session snapshots.
//!
//! A [`Session`] records the nested tab URLs and which tab was selected.
//! Where it is persisted is up to the caller.
//!
//! # Format
//!
//! ```json
//! {
//!   "tabs": [
//!     { "url": "https://a.com/", "children": [{ "url": "https://a.com/1" }] },
//!     { "url": "https://b.com/", "selected": true }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::identifiers::{NodeId, TabId};

use super::core::TabTree;
use super::structure::AddTab;

// ============================================================================
// Session
// ============================================================================

/// Saved tab tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Top-level tabs in order.
    #[serde(default)]
    pub tabs: Vec<SessionEntry>,
}

/// One saved tab and its children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Location; empty for an empty tab.
    #[serde(default)]
    pub url: String,

    /// Whether the tab was selected.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,

    /// Child tabs in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SessionEntry>,
}

impl SessionEntry {
    /// Creates an entry for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Marks the entry selected.
    #[must_use]
    pub fn with_selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Appends a child entry.
    #[must_use]
    pub fn with_child(mut self, child: SessionEntry) -> Self {
        self.children.push(child);
        self
    }
}

impl Session {
    /// Returns `true` if the session holds no tab.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Returns the number of tabs, nested ones included.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        fn count(entries: &[SessionEntry]) -> usize {
            entries.iter().map(|e| 1 + count(&e.children)).sum()
        }
        count(&self.tabs)
    }

    /// Parses a session from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) for malformed input.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the session to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ============================================================================
// TabTree - Session
// ============================================================================

impl TabTree {
    /// Captures the current tabs.
    #[must_use]
    pub fn save_session(&self) -> Session {
        Session {
            tabs: self.session_entries(self.tree.root()),
        }
    }

    fn session_entries(&self, parent: NodeId) -> Vec<SessionEntry> {
        self.tree
            .children(parent)
            .iter()
            .filter_map(|&node| {
                let tab = self.tree.payload(node)?;
                Some(SessionEntry {
                    url: tab.url().to_string(),
                    selected: tab.is_selected(),
                    children: self.session_entries(node),
                })
            })
            .collect()
    }

    /// Appends the tabs of `session` after the existing ones and selects the
    /// entry marked selected, if any.
    ///
    /// Returns the new tabs in pre-order.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`add_tab`](Self::add_tab).
    pub fn restore_session(&mut self, session: &Session) -> Result<Vec<TabId>> {
        let mut restored = Vec::with_capacity(session.tab_count());
        let mut selected = None;
        for entry in &session.tabs {
            self.restore_entry(entry, None, &mut restored, &mut selected)?;
        }

        if let Some(tab_id) = selected {
            self.select_tab(tab_id)?;
        }
        info!(tabs = restored.len(), "Session restored");
        Ok(restored)
    }

    fn restore_entry(
        &mut self,
        entry: &SessionEntry,
        parent: Option<TabId>,
        restored: &mut Vec<TabId>,
        selected: &mut Option<TabId>,
    ) -> Result<()> {
        let mut request = AddTab::new().url(entry.url.clone());
        if let Some(parent) = parent {
            request = request.parent(parent);
        }
        let tab_id = self.add_tab(request)?;
        restored.push(tab_id);
        if entry.selected {
            *selected = Some(tab_id);
        }

        for child in &entry.children {
            self.restore_entry(child, Some(tab_id), restored, selected)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
