//! Resource event routing.
//!
//! Browsing contexts queue `(TabId, ResourceEvent)` pairs; the tree applies
//! them when the owner pumps the queue. No tree borrow is held while a
//! context reports, so reporting from inside a tree call is always safe.

use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, warn};

use crate::browser::tab::TabEventOutcome;
use crate::context::{BrowsingContext, ResourceEvent};
use crate::error::Result;
use crate::identifiers::TabId;

use super::core::{TabTree, TreeEvent};
use super::structure::AddTab;

// ============================================================================
// TabTree - Routing
// ============================================================================

impl TabTree {
    /// Applies one resource event to a tab.
    ///
    /// `open-window` adds a selected child tab, `open-tab` a background child
    /// tab; any other recognized event emits [`TreeEvent::TabUpdate`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`](crate::Error::TabNotFound) for a tab that
    /// is no longer in the tree.
    pub fn handle_resource_event(&mut self, tab_id: TabId, event: ResourceEvent) -> Result<()> {
        let outcome = self.tab_mut(tab_id)?.handle_event(event);

        match outcome {
            TabEventOutcome::Ignored => {}
            TabEventOutcome::Updated => self.emit(TreeEvent::TabUpdate(tab_id)),
            TabEventOutcome::OpenWindow { url, context } => {
                self.open_child(tab_id, url, context, true)?;
            }
            TabEventOutcome::OpenTab { url, context } => {
                self.open_child(tab_id, url, context, false)?;
            }
        }
        Ok(())
    }

    /// Applies every queued resource event. Returns the number applied.
    ///
    /// Events for tabs that were dropped meanwhile are discarded.
    pub fn process_pending_events(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.events.try_recv() {
                Ok((tab_id, event)) => {
                    if self.dispatch(tab_id, event) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Waits for the next resource event and applies it.
    ///
    /// Returns the tab it was addressed to and whether it was applied.
    pub async fn process_next_event(&mut self) -> Option<(TabId, bool)> {
        let (tab_id, event) = self.events.recv().await?;
        let applied = self.dispatch(tab_id, event);
        Some((tab_id, applied))
    }

    fn dispatch(&mut self, tab_id: TabId, event: ResourceEvent) -> bool {
        if !self.contains(tab_id) {
            debug!(tab_id = %tab_id, event = event.name(), "Discarding event for stale tab");
            return false;
        }
        match self.handle_resource_event(tab_id, event) {
            Ok(()) => true,
            Err(e) => {
                warn!(tab_id = %tab_id, error = %e, "Failed to apply resource event");
                false
            }
        }
    }

    fn open_child(
        &mut self,
        opener: TabId,
        url: String,
        context: Option<Box<dyn BrowsingContext>>,
        selected: bool,
    ) -> Result<TabId> {
        let mut request = AddTab::new().url(url).parent(opener).selected(selected);
        if let Some(context) = context {
            request = request.context(context);
        }
        let child = self.add_tab(request)?;
        debug!(opener = %opener, tab_id = %child, selected, "Opened child tab");
        Ok(child)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::context::{MemoryContext, MemoryContextFactory};

    fn tree() -> (TabTree, MemoryContextFactory) {
        let factory = MemoryContextFactory::new();
        let tree = TabTree::builder()
            .context_factory(factory.clone())
            .empty()
            .build()
            .expect("build");
        (tree, factory)
    }

    #[test]
    fn test_pending_events_update_tab() {
        let (mut tree, _) = tree();
        let mut events = tree.subscribe();
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        while events.try_recv().is_ok() {}

        assert_eq!(tree.process_pending_events(), 3);
        let tab = tree.tab(a).expect("tab");
        assert_eq!(tab.location(), "https://a.com/");
        assert!(!tab.is_loading());

        let mut updates = 0;
        while let Ok(event) = events.try_recv() {
            assert_eq!(event, TreeEvent::TabUpdate(a));
            updates += 1;
        }
        assert_eq!(updates, 3);
    }

    #[test]
    fn test_open_window_adds_selected_child() {
        let (mut tree, factory) = tree();
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        tree.process_pending_events();

        let opener = factory.last().expect("context");
        opener.emit(ResourceEvent::OpenWindow {
            url: "https://popup.com/".into(),
            context: Some(Box::new(MemoryContext::default())),
        });
        tree.process_pending_events();

        let child = tree.next_tab(a).expect("next").expect("child");
        assert_eq!(tree.selected_tab(), Some(child));
        assert_eq!(tree.tab(child).expect("tab").location(), "https://popup.com/");
        assert_eq!(factory.contexts().len(), 1);
    }

    #[test]
    fn test_open_tab_adds_background_child() {
        let (mut tree, factory) = tree();
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        tree.process_pending_events();

        factory.last().expect("context").emit(ResourceEvent::OpenTab {
            url: "https://bg.com/".into(),
            context: None,
        });
        tree.process_pending_events();

        let child = tree.next_tab(a).expect("next").expect("child");
        assert_eq!(tree.selected_tab(), Some(a));
        let child_node = tree.node_of(child).expect("node");
        assert_eq!(tree.tree().parent(child_node), Some(tree.node_of(a).expect("node")));
    }

    #[test]
    fn test_events_for_dropped_tab_are_discarded() {
        let (mut tree, factory) = tree();
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        let b = tree.add_tab(AddTab::new().url("https://b.com/")).expect("add");
        let context_b = factory.last().expect("context");

        tree.drop_tab_and_children(b).expect("drop");
        context_b.emit(ResourceEvent::TitleChange("late".into()));

        assert_eq!(tree.process_pending_events(), 3);
        assert!(tree.contains(a));
        assert!(tree.handle_resource_event(b, ResourceEvent::LoadEnd).is_err());
    }

    #[tokio::test]
    async fn test_process_next_event() {
        let (mut tree, _) = tree();
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");

        let (tab_id, applied) = tree.process_next_event().await.expect("event");
        assert_eq!(tab_id, a);
        assert!(applied);
        assert!(tree.tab(a).expect("tab").is_loading());
    }
}
