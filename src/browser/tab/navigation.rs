//! Tab navigation methods.

use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use tracing::debug;

use super::Tab;

// ============================================================================
// Tab - Navigation
// ============================================================================

impl Tab {
    /// Navigates to a URL, creating the browsing context on first use.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to navigate to
    pub fn set_location(&mut self, url: &str) {
        debug!(url = %url, tab_id = %self.id, "Navigating");
        self.page.location = url.to_string();
        self.url = url.to_string();

        if self.context.is_none() {
            let context = self.services.factory.create(&self.services.config);
            self.attach_context(context);
        }

        let target = self.services.config.navigation_target(url);
        if let Some(context) = &self.context {
            context.navigate(&target);
        }
    }

    /// Reloads the current page.
    pub fn reload(&self) {
        debug!(tab_id = %self.id, "Reloading page");
        if let Some(context) = &self.context {
            context.reload();
        }
    }

    /// Stops loading.
    pub fn stop(&self) {
        if let Some(context) = &self.context {
            context.stop();
        }
    }

    /// Navigates back in history.
    pub fn go_back(&self) {
        debug!(tab_id = %self.id, "Navigating back");
        if let Some(context) = &self.context {
            context.go_back();
        }
    }

    /// Navigates forward in history.
    pub fn go_forward(&self) {
        debug!(tab_id = %self.id, "Navigating forward");
        if let Some(context) = &self.context {
            context.go_forward();
        }
    }

    /// Asks whether a back entry exists. Resolves `false` for an empty tab.
    ///
    /// The future does not borrow the tab; check the result against the
    /// current tree before acting on it.
    #[must_use]
    pub fn can_go_back(&self) -> BoxFuture<'static, bool> {
        match &self.context {
            Some(context) => context.query_can_go_back(),
            None => future::ready(false).boxed(),
        }
    }

    /// Asks whether a forward entry exists. Resolves `false` for an empty tab.
    #[must_use]
    pub fn can_go_forward(&self) -> BoxFuture<'static, bool> {
        match &self.context {
            Some(context) => context.query_can_go_forward(),
            None => future::ready(false).boxed(),
        }
    }

    /// Gives keyboard focus to the browsing context.
    pub fn focus(&self) {
        if let Some(context) = &self.context {
            context.focus();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
