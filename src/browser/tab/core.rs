//! Core Tab struct and accessors.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::browser::favicon::{FaviconResolver, DEFAULT_FAVICON};
use crate::context::{
    BrowsingContext, ContextConfig, ContextFactory, EventSink, IconDescriptor, ResourceEvent,
    SecurityState,
};
use crate::identifiers::{SubscriptionId, TabId};

use super::zoom::DEFAULT_ZOOM;

// ============================================================================
// Types
// ============================================================================

/// Collaborators shared by every tab of one tree.
pub(crate) struct TabServices {
    /// Creates contexts for tabs that navigate before having one.
    pub factory: Box<dyn ContextFactory>,
    /// Icon-selection policy.
    pub favicons: Box<dyn FaviconResolver>,
    /// Sender half of the tree's resource event queue.
    pub events: mpsc::UnboundedSender<(TabId, ResourceEvent)>,
    /// Capabilities handed to new contexts.
    pub config: ContextConfig,
}

/// Document state reset on every `load-start`.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageState {
    pub location: String,
    pub title: String,
    pub loading: bool,
    pub best_icon: Option<IconDescriptor>,
    pub favicon_url: Option<String>,
    pub security_state: SecurityState,
    pub extended_validation: bool,
}

// ============================================================================
// Tab
// ============================================================================

/// One browsing-context handle and its observable state.
///
/// Tabs are owned by a [`TabTree`](crate::TabTree); reach them through
/// [`TabTree::tab`](crate::TabTree::tab) and
/// [`TabTree::tab_mut`](crate::TabTree::tab_mut). A tab without a context is
/// *empty* until its first navigation creates one.
pub struct Tab {
    pub(crate) id: TabId,
    pub(crate) services: Arc<TabServices>,
    pub(crate) context: Option<Box<dyn BrowsingContext>>,
    pub(crate) subscription: Option<SubscriptionId>,
    pub(crate) page: PageState,
    /// Last requested or committed URL; kept across `load-start`.
    pub(crate) url: String,
    pub(crate) user_input: String,
    pub(crate) zoom: f64,
    pub(crate) selected: bool,
    pub(crate) destroyed: bool,
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("location", &self.page.location)
            .field("url", &self.url)
            .field("title", &self.page.title)
            .field("loading", &self.page.loading)
            .field("selected", &self.selected)
            .field("zoom", &self.zoom)
            .field("empty", &self.is_empty())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tab: {}", self.page.location)
    }
}

impl Tab {
    /// Creates an unselected tab, adopting `context` when one is given.
    pub(crate) fn new(
        id: TabId,
        services: Arc<TabServices>,
        context: Option<Box<dyn BrowsingContext>>,
    ) -> Self {
        let mut tab = Self {
            id,
            services,
            context: None,
            subscription: None,
            page: PageState::default(),
            url: String::new(),
            user_input: String::new(),
            zoom: DEFAULT_ZOOM,
            selected: false,
            destroyed: false,
        };
        if let Some(context) = context {
            tab.attach_context(context);
        }
        tab
    }
}

// ============================================================================
// Tab - Accessors
// ============================================================================

impl Tab {
    /// Returns the tab ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Returns the committed location, empty while a load has not committed.
    #[inline]
    #[must_use]
    pub fn location(&self) -> &str {
        &self.page.location
    }

    /// Returns the URL the tab is showing or loading.
    ///
    /// Unlike [`location`](Self::location) this is not cleared when a load
    /// starts, so it names the page across a navigation.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the document title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.page.title
    }

    /// Returns `true` while a load is in progress.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.page.loading
    }

    /// Returns the URL-bar draft text.
    #[inline]
    #[must_use]
    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    /// Replaces the URL-bar draft text.
    pub fn set_user_input(&mut self, text: impl Into<String>) {
        self.user_input = text.into();
    }

    /// Returns the transport security state.
    #[inline]
    #[must_use]
    pub fn security_state(&self) -> SecurityState {
        self.page.security_state
    }

    /// Returns `true` if the certificate has extended validation.
    #[inline]
    #[must_use]
    pub fn security_extended_validation(&self) -> bool {
        self.page.extended_validation
    }

    /// Returns the zoom factor.
    #[inline]
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns `true` if this is the tree's selected tab.
    #[inline]
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Returns `true` if no browsing context is attached.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.context.is_none()
    }

    /// Returns `true` once the tab has been torn down.
    #[inline]
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Returns the best reported icon, or the fallback for the location.
    #[must_use]
    pub fn favicon(&self) -> String {
        match &self.page.favicon_url {
            Some(url) => url.clone(),
            None if self.page.location.is_empty() => DEFAULT_FAVICON.to_string(),
            None => self.services.favicons.fallback(&self.page.location),
        }
    }

    /// Returns the label shown in a tab list.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.is_empty() {
            "New tab"
        } else if !self.page.title.is_empty() {
            &self.page.title
        } else if self.page.loading {
            "Loading…"
        } else {
            &self.page.location
        }
    }

    /// Returns the URL-bar text: the draft if any, else the location.
    #[must_use]
    pub fn url_bar_text(&self) -> &str {
        if self.user_input.is_empty() {
            &self.page.location
        } else {
            &self.user_input
        }
    }
}

// ============================================================================
// Tab - Lifecycle
// ============================================================================

impl Tab {
    /// Takes ownership of `context` and subscribes to its events.
    pub(crate) fn attach_context(&mut self, context: Box<dyn BrowsingContext>) {
        let sink = EventSink::new(self.id, self.services.events.clone());
        let subscription = context.subscribe(sink);
        debug!(tab_id = %self.id, subscription = %subscription, "Context attached");

        self.context = Some(context);
        self.subscription = Some(subscription);
        self.apply_zoom();
        self.apply_visibility();
    }

    /// Marks the tab selected or not, showing or hiding its context.
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.apply_visibility();
    }

    fn apply_visibility(&self) {
        if !self.services.config.privileged {
            return;
        }
        if let Some(context) = &self.context {
            context.set_visible(self.selected);
        }
    }

    /// Unsubscribes from the context and releases it. Idempotent.
    ///
    /// Only the owning tree tears tabs down, after moving the selection away.
    pub(crate) fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.selected = false;

        let context = self.context.take();
        if let (Some(context), Some(subscription)) = (context, self.subscription.take()) {
            context.unsubscribe(subscription);
            trace!(tab_id = %self.id, subscription = %subscription, "Context detached");
        }
        debug!(tab_id = %self.id, "Tab destroyed");
    }
}

impl Drop for Tab {
    fn drop(&mut self) {
        self.destroy();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::browser::tab::test_services as services;
    use crate::context::MemoryContext;

    fn tab_id(id: u32) -> TabId {
        TabId::new(id).expect("non-zero")
    }

    #[test]
    fn test_new_tab_is_empty() {
        let (services, _rx, _) = services(ContextConfig::privileged());
        let tab = Tab::new(tab_id(1), services, None);

        assert!(tab.is_empty());
        assert!(!tab.is_selected());
        assert_eq!(tab.display_title(), "New tab");
        assert_eq!(tab.favicon(), DEFAULT_FAVICON);
        assert_eq!(tab.to_string(), "Tab: ");
    }

    #[test]
    fn test_adopted_context_is_subscribed() {
        let (services, _rx, _) = services(ContextConfig::privileged());
        let context = MemoryContext::default();
        let tab = Tab::new(tab_id(1), services, Some(Box::new(context.clone())));

        assert!(!tab.is_empty());
        assert_eq!(context.subscriber_count(), 1);
        assert!(!context.is_visible());
    }

    #[test]
    fn test_selection_toggles_visibility() {
        let (services, _rx, _) = services(ContextConfig::privileged());
        let context = MemoryContext::default();
        let mut tab = Tab::new(tab_id(1), services, Some(Box::new(context.clone())));

        tab.set_selected(true);
        assert!(context.is_visible());
        tab.set_selected(false);
        assert!(!context.is_visible());
    }

    #[test]
    fn test_unprivileged_does_not_touch_visibility() {
        let (services, _rx, _) = services(ContextConfig::unprivileged());
        let context = MemoryContext::default();
        let mut tab = Tab::new(tab_id(1), services, Some(Box::new(context.clone())));

        tab.set_selected(true);
        assert!(tab.is_selected());
        assert!(!context.is_visible());
    }

    #[test]
    fn test_destroy_unsubscribes() {
        let (services, _rx, _) = services(ContextConfig::privileged());
        let context = MemoryContext::default();
        let mut tab = Tab::new(tab_id(1), services, Some(Box::new(context.clone())));

        tab.destroy();
        assert!(tab.is_destroyed());
        assert!(tab.is_empty());
        assert_eq!(context.subscriber_count(), 0);

        tab.destroy();
        assert!(tab.is_destroyed());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let (services, _rx, _) = services(ContextConfig::privileged());
        let context = MemoryContext::default();
        let tab = Tab::new(tab_id(1), services, Some(Box::new(context.clone())));

        drop(tab);
        assert_eq!(context.subscriber_count(), 0);
    }

    #[test]
    fn test_url_bar_prefers_draft() {
        let (services, _rx, _) = services(ContextConfig::privileged());
        let mut tab = Tab::new(tab_id(1), services, None);
        tab.page.location = "https://a.com/".to_string();

        assert_eq!(tab.url_bar_text(), "https://a.com/");
        tab.set_user_input("goog");
        assert_eq!(tab.url_bar_text(), "goog");
    }
}
