//! Tab collection controller.
//!
//! A [`TabTree`] owns an ordered tree of [`Tab`](crate::Tab)s, keeps exactly
//! one of them selected, and tells presentation layers what changed through
//! [`TreeEvent`]s.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | TabTree struct, accessors, notifications, rows |
//! | `builder` | [`TabTreeBuilder`] |
//! | `structure` | Add, drop and move tabs |
//! | `selection` | Selection and pre-order neighbours |
//! | `routing` | Resource event queue |
//! | `history` | Back/forward availability |
//! | `actions` | Keyboard actions and URL-bar input |
//! | `session` | Session snapshots |
//!
//! # Example
//!
//! ```
//! use browser_tabtree::{AddTab, MemoryContextFactory, TabTree, TreeEvent};
//!
//! # fn example() -> browser_tabtree::Result<()> {
//! let mut tree = TabTree::builder()
//!     .context_factory(MemoryContextFactory::new())
//!     .empty()
//!     .build()?;
//! let mut events = tree.subscribe();
//!
//! let docs = tree.add_tab(AddTab::new().url("https://docs.rs"))?;
//! let child = tree.add_tab(AddTab::new().url("https://docs.rs/tokio").parent(docs))?;
//!
//! assert_eq!(tree.selected_tab(), Some(docs));
//! assert_eq!(tree.next_tab(docs)?, Some(child));
//! assert_eq!(events.try_recv().ok(), Some(TreeEvent::SelectedTabChanged));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod actions;
mod builder;
mod core;
mod history;
mod routing;
mod selection;
mod session;
mod structure;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::builder::TabTreeBuilder;
pub use self::core::{TabRow, TabTree, TreeEvent};
pub use self::history::{HistoryProbe, HistoryState};
pub use self::session::{Session, SessionEntry};
pub use self::structure::AddTab;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests;
