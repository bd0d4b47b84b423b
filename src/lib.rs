//! Browser tab tree - Ordered, nested tabs for an embedded browser chrome.
//!
//! This library keeps the tabs of a browser shell in an ordered tree with a
//! single selected tab, and routes the events reported by each tab's
//! browsing context back into that tree.
//!
//! # Architecture
//!
//! The tree follows an owner/pump model:
//!
//! - **Tree (owner)**: Holds every [`Tab`] in an arena, answers structure and
//!   selection queries, emits [`TreeEvent`]s to listeners
//! - **Contexts (producers)**: Queue `(TabId, ResourceEvent)` pairs into a
//!   channel the tree drains on demand
//!
//! Key design principles:
//!
//! - Tabs are addressed by [`TabId`], never by reference
//! - Exactly one tab is selected whenever the tree holds any tab
//! - Context callbacks never borrow the tree, so reentrancy is impossible
//! - Asynchronous history answers are checked for staleness before use
//!
//! # Quick Start
//!
//! ```
//! use browser_tabtree::{AddTab, MemoryContextFactory, Result, TabTree, TreeEvent};
//!
//! # fn example() -> Result<()> {
//! let mut tree = TabTree::builder()
//!     .context_factory(MemoryContextFactory::new())
//!     .empty()
//!     .build()?;
//! let mut events = tree.subscribe();
//!
//! let news = tree.add_tab(AddTab::new().url("https://news.ycombinator.com/"))?;
//! let thread = tree.add_tab(AddTab::new().url("https://example.com/").parent(news))?;
//! tree.select_tab(thread)?;
//!
//! // Apply load events reported by the browsing contexts.
//! tree.process_pending_events();
//!
//! assert_eq!(events.try_recv().ok(), Some(TreeEvent::TreeLayoutChanged));
//! println!("{tree}");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Chrome entities: [`TabTree`], [`Tab`], [`Keymap`] |
//! | [`config`] | Shell options and [`Platform`] |
//! | [`context`] | Browsing-context contract and in-memory implementation |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`tree`] | Generic ordered arena tree |

// ============================================================================
// Modules
// ============================================================================

/// Browser chrome entities: TabTree, Tab, Keymap.
///
/// This module contains the types a shell drives directly:
///
/// - [`TabTree`] - Ordered tab tree with one selection
/// - [`Tab`] - Tab wrapping a browsing context
/// - [`Keymap`] - Key chords mapped to actions
pub mod browser;

/// Shell configuration.
///
/// Use [`ChromeOptions::new()`] and pass it to [`TabTreeBuilder::options`].
pub mod config;

/// Browsing-context contract.
///
/// Implement [`BrowsingContext`] and [`ContextFactory`] to plug a rendering
/// engine in; [`MemoryContext`] serves headless use.
pub mod context;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for tabs, nodes and subscriptions.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Generic ordered tree.
///
/// Arena storage addressed by [`NodeId`], independent of tabs.
pub mod tree;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{
    Action, AddTab, BestIcon, DefaultFaviconResolver, FaviconResolver, HistoryProbe,
    HistoryState, Key, KeyChord, Keymap, Modifiers, Session, SessionEntry, Tab, TabEventOutcome,
    TabRow, TabTree, TabTreeBuilder, TreeEvent,
};

// Configuration types
pub use config::{ChromeOptions, Platform};

// Context types
pub use context::{
    BrowsingContext, ContextConfig, ContextFactory, EventSink, IconDescriptor, MemoryContext,
    MemoryContextFactory, ResourceEvent, SecurityState,
};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{NodeId, SubscriptionId, TabId};

// Tree types
pub use tree::{Tree, TreeNode};
