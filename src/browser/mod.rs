//! Browser chrome entities.
//!
//! This module provides the tab-level types a browser shell drives:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TabTree`] | Ordered tree of tabs with a single selection |
//! | [`Tab`] | One tab wrapping a browsing context |
//! | [`Keymap`] | Platform key bindings mapped to [`Action`]s |
//! | [`FaviconResolver`] | Icon-selection policy |
//!
//! # Example
//!
//! ```
//! use browser_tabtree::{AddTab, MemoryContextFactory, Result, TabTree};
//!
//! # fn example() -> Result<()> {
//! let mut tree = TabTree::builder()
//!     .context_factory(MemoryContextFactory::new())
//!     .empty()
//!     .build()?;
//!
//! let docs = tree.add_tab(AddTab::new().url("https://docs.rs/"))?;
//! tree.add_tab(AddTab::new().url("https://docs.rs/tokio").parent(docs))?;
//! tree.process_pending_events();
//!
//! assert_eq!(tree.selected_tab(), Some(docs));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Favicon selection.
pub mod favicon;

/// Key bindings and chrome actions.
pub mod keybindings;

/// A single tab.
pub mod tab;

/// The tab tree controller.
pub mod tab_tree;

/// URL-bar input resolution.
pub mod url_input;

// ============================================================================
// Re-exports
// ============================================================================

pub use favicon::{BestIcon, DEFAULT_FAVICON, DefaultFaviconResolver, FaviconResolver};
pub use keybindings::{Action, Key, KeyChord, Keymap, Modifiers};
pub use tab::{Tab, TabEventOutcome};
pub use tab_tree::{
    AddTab, HistoryProbe, HistoryState, Session, SessionEntry, TabRow, TabTree, TabTreeBuilder,
    TreeEvent,
};
pub use url_input::resolve_user_input;
