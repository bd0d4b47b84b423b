//! Builder pattern for tab tree configuration.
//!
//! # Example
//!
//! ```
//! use browser_tabtree::{ChromeOptions, MemoryContextFactory, TabTree};
//!
//! # fn example() -> browser_tabtree::Result<()> {
//! let tree = TabTree::builder()
//!     .options(ChromeOptions::new().with_homepage("https://example.com"))
//!     .context_factory(MemoryContextFactory::new())
//!     .build()?;
//!
//! assert_eq!(tree.tab_count(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tracing::info;

use crate::browser::favicon::{DefaultFaviconResolver, FaviconResolver};
use crate::config::ChromeOptions;
use crate::context::ContextFactory;
use crate::error::{Error, Result};

use super::core::TabTree;
use super::session::Session;
use super::structure::AddTab;

// ============================================================================
// Startup
// ============================================================================

/// What a freshly built tree contains.
#[derive(Debug, Clone, Default)]
enum Startup {
    /// One selected tab on the homepage.
    #[default]
    Homepage,
    /// No tab at all.
    Empty,
    /// The tabs of a saved session.
    Session(Session),
}

// ============================================================================
// TabTreeBuilder
// ============================================================================

/// Builder for configuring a [`TabTree`].
///
/// Use [`TabTree::builder()`] to create a new builder.
#[derive(Default)]
pub struct TabTreeBuilder {
    /// Tree options.
    options: ChromeOptions,
    /// Context factory (required).
    factory: Option<Box<dyn ContextFactory>>,
    /// Icon-selection policy.
    favicons: Option<Box<dyn FaviconResolver>>,
    /// Initial content.
    startup: Startup,
}

impl fmt::Debug for TabTreeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabTreeBuilder")
            .field("options", &self.options)
            .field("has_factory", &self.factory.is_some())
            .field("has_favicon_resolver", &self.favicons.is_some())
            .field("startup", &self.startup)
            .finish()
    }
}

impl TabTree {
    /// Creates a builder.
    #[inline]
    #[must_use]
    pub fn builder() -> TabTreeBuilder {
        TabTreeBuilder::new()
    }
}

// ============================================================================
// TabTreeBuilder Implementation
// ============================================================================

impl TabTreeBuilder {
    /// Creates a builder with default options and no factory.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tree options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ChromeOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the factory creating contexts for tabs that navigate.
    #[inline]
    #[must_use]
    pub fn context_factory(mut self, factory: impl ContextFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Sets the icon-selection policy.
    #[inline]
    #[must_use]
    pub fn favicon_resolver(mut self, resolver: impl FaviconResolver + 'static) -> Self {
        self.favicons = Some(Box::new(resolver));
        self
    }

    /// Starts without any tab.
    #[inline]
    #[must_use]
    pub fn empty(mut self) -> Self {
        self.startup = Startup::Empty;
        self
    }

    /// Starts from a saved session.
    #[inline]
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.startup = Startup::Session(session);
        self
    }

    /// Builds the tree with validation.
    ///
    /// Unless [`empty`](Self::empty) or [`session`](Self::session) was
    /// chosen, the tree starts with one selected tab on the homepage. An empty
    /// session also falls back to the homepage.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the options are invalid
    /// - [`Error::Config`] if no context factory was set
    pub fn build(self) -> Result<TabTree> {
        self.options.validate().map_err(Error::config)?;

        let factory = self.factory.ok_or_else(|| {
            Error::config(
                "Context factory is required. Use .context_factory() to set it.\n\
                 Example: TabTree::builder().context_factory(MemoryContextFactory::new())",
            )
        })?;
        let favicons = self
            .favicons
            .unwrap_or_else(|| Box::new(DefaultFaviconResolver));

        let mut tree = TabTree::new(self.options, factory, favicons);
        match self.startup {
            Startup::Empty => {}
            Startup::Session(session) if !session.is_empty() => {
                tree.restore_session(&session)?;
            }
            Startup::Homepage | Startup::Session(_) => {
                let homepage = tree.options.homepage.clone();
                tree.add_tab(AddTab::new().url(homepage))?;
            }
        }

        info!(tabs = tree.tab_count(), "Tab tree ready");
        Ok(tree)
    }
}

// ============================================================================
// Tests
// ============================================================================
