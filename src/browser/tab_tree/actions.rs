//! Keyboard actions and URL-bar submission.

use tracing::debug;

use crate::browser::keybindings::{Action, KeyChord};
use crate::browser::url_input::resolve_user_input;
use crate::error::Result;
use crate::identifiers::TabId;

use super::core::TabTree;
use super::structure::AddTab;

// ============================================================================
// TabTree - Actions
// ============================================================================

impl TabTree {
    /// Performs an action on the tree or its selected tab.
    ///
    /// Tab-level actions are no-ops while nothing is selected.
    ///
    /// # Errors
    ///
    /// Propagates the error of the structural operation behind the action.
    pub fn perform(&mut self, action: Action) -> Result<()> {
        debug!(action = %action, "Performing action");

        match action {
            Action::SelectNextTab => return self.select_next_tab(),
            Action::SelectPrevTab => return self.select_prev_tab(),
            Action::NewTab => {
                self.add_tab(AddTab::new().selected(true))?;
                return Ok(());
            }
            _ => {}
        }

        let Some(selected) = self.selected_tab() else {
            debug!(action = %action, "No selected tab");
            return Ok(());
        };

        match action {
            Action::CloseTab => return self.drop_tab_and_move_children_up(selected),
            Action::Stop => self.tab(selected)?.stop(),
            Action::Reload => self.tab(selected)?.reload(),
            Action::GoBack => self.tab(selected)?.go_back(),
            Action::GoForward => self.tab(selected)?.go_forward(),
            Action::ZoomIn => self.tab_mut(selected)?.zoom_in(),
            Action::ZoomOut => self.tab_mut(selected)?.zoom_out(),
            Action::ResetZoom => self.tab_mut(selected)?.reset_zoom(),
            Action::SelectNextTab | Action::SelectPrevTab | Action::NewTab => {}
        }
        Ok(())
    }

    /// Performs the action bound to `chord`, if any.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`perform`](Self::perform).
    pub fn handle_key(&mut self, chord: &KeyChord) -> Result<Option<Action>> {
        let Some(action) = self.keymap.lookup(chord) else {
            return Ok(None);
        };
        self.perform(action)?;
        Ok(Some(action))
    }

    /// Navigates the selected tab to what was typed in the URL bar, then
    /// focuses it.
    ///
    /// Returns the tab navigated, `None` while nothing is selected.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures.
    pub fn submit_user_input(&mut self, text: &str) -> Result<Option<TabId>> {
        let Some(selected) = self.selected_tab() else {
            return Ok(None);
        };
        let url = resolve_user_input(text, &self.options.search_template);
        debug!(tab_id = %selected, url = %url, "Submitting URL-bar input");

        let tab = self.tab_mut(selected)?;
        tab.set_user_input(text);
        tab.set_location(&url);
        tab.focus();
        Ok(Some(selected))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::browser::tab::{DEFAULT_ZOOM, MAX_ZOOM};
    use crate::config::{ChromeOptions, Platform};
    use crate::context::MemoryContextFactory;

    fn tree(factory: &MemoryContextFactory) -> TabTree {
        TabTree::builder()
            .options(ChromeOptions::new().with_platform(Platform::X11))
            .context_factory(factory.clone())
            .empty()
            .build()
            .expect("build")
    }

    #[test]
    fn test_new_tab_is_selected_and_empty() {
        let factory = MemoryContextFactory::new();
        let mut tree = tree(&factory);
        tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");

        tree.perform(Action::NewTab).expect("new tab");
        let selected = tree.selected_tab().expect("selection");
        assert_eq!(tree.last_tab(), Some(selected));
        assert!(tree.tab(selected).expect("tab").is_empty());
    }

    #[test]
    fn test_close_tab_keeps_children() {
        let factory = MemoryContextFactory::new();
        let mut tree = tree(&factory);
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        let a1 = tree
            .add_tab(AddTab::new().url("https://a1.com/").parent(a))
            .expect("add");

        tree.perform(Action::CloseTab).expect("close");
        assert!(!tree.contains(a));
        assert_eq!(tree.selected_tab(), Some(a1));
    }

    #[test]
    fn test_zoom_actions() {
        let factory = MemoryContextFactory::new();
        let mut tree = tree(&factory);
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");

        for _ in 0..15 {
            tree.perform(Action::ZoomIn).expect("zoom");
        }
        assert_eq!(tree.tab(a).expect("tab").zoom(), MAX_ZOOM);
        assert_eq!(factory.last().expect("context").zoom(), MAX_ZOOM);

        tree.perform(Action::ResetZoom).expect("reset");
        assert_eq!(tree.tab(a).expect("tab").zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn test_history_actions() {
        let factory = MemoryContextFactory::new();
        let mut tree = tree(&factory);
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        tree.tab_mut(a).expect("tab").set_location("https://b.com/");

        tree.perform(Action::GoBack).expect("back");
        let context = factory.last().expect("context");
        assert_eq!(context.current_url().as_deref(), Some("https://a.com/"));

        tree.perform(Action::GoForward).expect("forward");
        tree.perform(Action::Reload).expect("reload");
        assert_eq!(context.current_url().as_deref(), Some("https://b.com/"));
        assert_eq!(context.reload_count(), 1);
    }

    #[test]
    fn test_actions_on_empty_tree_are_noops() {
        let factory = MemoryContextFactory::new();
        let mut tree = tree(&factory);
        for action in [Action::Stop, Action::CloseTab, Action::ZoomIn, Action::SelectNextTab] {
            tree.perform(action).expect("noop");
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_handle_key() {
        let factory = MemoryContextFactory::new();
        let mut tree = tree(&factory);
        let a = tree.add_tab(AddTab::new().url("https://a.com/")).expect("add");
        let b = tree.add_tab(AddTab::new().url("https://b.com/")).expect("add");

        let next = KeyChord::parse("Ctrl", "Tab").expect("chord");
        assert_eq!(tree.handle_key(&next).expect("key"), Some(Action::SelectNextTab));
        assert_eq!(tree.selected_tab(), Some(b));

        let unbound = KeyChord::parse("Ctrl", "q").expect("chord");
        assert_eq!(tree.handle_key(&unbound).expect("key"), None);

        let prev = KeyChord::parse("Ctrl Shift", "code:9").expect("chord");
        tree.handle_key(&prev).expect("key");
        assert_eq!(tree.selected_tab(), Some(a));
    }

    #[test]
    fn test_submit_user_input() {
        let factory = MemoryContextFactory::new();
        let mut tree = tree(&factory);
        let a = tree.add_tab(AddTab::new()).expect("add");

        assert_eq!(tree.submit_user_input("mozilla.org").expect("submit"), Some(a));
        let context = factory.last().expect("context");
        assert_eq!(context.current_url().as_deref(), Some("http://mozilla.org"));
        assert!(context.is_focused());
        assert_eq!(tree.tab(a).expect("tab").user_input(), "mozilla.org");

        tree.process_pending_events();
        assert_eq!(tree.tab(a).expect("tab").user_input(), "");
        assert_eq!(tree.tab(a).expect("tab").url_bar_text(), "http://mozilla.org");
    }

    #[test]
    fn test_submit_search_query() {
        let factory = MemoryContextFactory::new();
        let mut tree = tree(&factory);
        tree.add_tab(AddTab::new()).expect("add");

        tree.submit_user_input("rust tabs").expect("submit");
        let context = factory.last().expect("context");
        assert_eq!(
            context.current_url().as_deref(),
            Some("https://search.yahoo.com/search?p=rust%20tabs")
        );
    }
}
