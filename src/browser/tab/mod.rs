//! Browser tab state.
//!
//! Each [`Tab`] wraps one browsing context and tracks what the chrome shows
//! for it: location, title, loading, favicon, security and zoom.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Tab struct, accessors and lifecycle |
//! | `navigation` | URL navigation, history |
//! | `zoom` | Clamped zoom control |
//! | `events` | Resource event handling |
//!
//! # Example
//!
//! ```
//! use browser_tabtree::{AddTab, MemoryContextFactory, TabTree};
//!
//! let mut tree = TabTree::builder()
//!     .context_factory(MemoryContextFactory::new())
//!     .empty()
//!     .build()?;
//!
//! let id = tree.add_tab(AddTab::new().url("https://example.com"))?;
//! tree.process_pending_events();
//!
//! let tab = tree.tab_mut(id)?;
//! tab.zoom_in();
//! assert_eq!(tab.location(), "https://example.com");
//! # Ok::<(), browser_tabtree::Error>(())
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod core;
mod events;
mod navigation;
mod zoom;

// ============================================================================
// Re-exports
// ============================================================================

pub(crate) use self::core::TabServices;
pub use self::core::Tab;
pub use self::events::TabEventOutcome;
pub use self::zoom::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

// ============================================================================
// Test Support
// ============================================================================

#[cfg(test)]
pub(crate) fn test_services(
    config: crate::context::ContextConfig,
) -> (
    std::sync::Arc<TabServices>,
    tokio::sync::mpsc::UnboundedReceiver<(crate::identifiers::TabId, crate::context::ResourceEvent)>,
    crate::context::MemoryContextFactory,
) {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let factory = crate::context::MemoryContextFactory::new();
    let services = std::sync::Arc::new(TabServices {
        factory: Box::new(factory.clone()),
        favicons: Box::new(crate::browser::favicon::DefaultFaviconResolver),
        events: tx,
        config,
    });
    (services, rx, factory)
}
