//! Tree configuration.
//!
//! Provides the options controlling how a [`TabTree`](crate::TabTree) creates
//! browsing contexts, what it opens on startup and which keymap it exposes.
//!
//! # Example
//!
//! ```
//! use browser_tabtree::{ChromeOptions, Platform};
//!
//! let options = ChromeOptions::new()
//!     .with_homepage("https://example.com")
//!     .with_platform(Platform::Mac)
//!     .with_unprivileged();
//!
//! assert!(options.validate().is_ok());
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Options and platform selection.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use options::{ChromeOptions, DEFAULT_HOMEPAGE, DEFAULT_SEARCH_TEMPLATE, Platform, SEARCH_TERMS};
