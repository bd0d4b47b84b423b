//! Error types for the tab tree.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use browser_tabtree::{Result, TabTree};
//!
//! fn close_selected(tree: &mut TabTree) -> Result<()> {
//!     if let Some(tab_id) = tree.selected_tab() {
//!         tree.drop_tab_and_move_children_up(tab_id)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Lookup | [`Error::TabNotFound`], [`Error::NodeNotFound`] |
//! | Structure | [`Error::InvalidOperation`], [`Error::InvalidArgument`] |
//! | Configuration | [`Error::Config`] |
//! | External | [`Error::Json`] |
//!
//! None of these are transient: every error signals a sequencing mistake by
//! the caller and retrying the same call yields the same error.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::{NodeId, TabId};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// Tab not found.
    ///
    /// Returned when a tab handle is stale or never belonged to this tree.
    #[error("Tab not found: {tab_id}")]
    TabNotFound {
        /// The missing tab ID.
        tab_id: TabId,
    },

    /// Tree node not found.
    ///
    /// Returned when a node handle was discarded or belongs to another tree.
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// The missing node ID.
        node_id: NodeId,
    },

    // ========================================================================
    // Structural Errors
    // ========================================================================
    /// Structurally illegal request.
    ///
    /// Returned for cycles, detaching the root, or leaving the tree without
    /// a selection target when that is forbidden.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of the rejected operation.
        message: String,
    },

    /// Malformed call.
    ///
    /// Returned when an argument does not satisfy the call's preconditions.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when tree configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a tab not found error.
    #[inline]
    pub fn tab_not_found(tab_id: TabId) -> Self {
        Self::TabNotFound { tab_id }
    }

    /// Creates a node not found error.
    #[inline]
    pub fn node_not_found(node_id: NodeId) -> Self {
        Self::NodeNotFound { node_id }
    }

    /// Creates an invalid operation error.
    #[inline]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the error refers to a missing tab or node.
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TabNotFound { .. } | Self::NodeNotFound { .. })
    }

    /// Returns `true` if the error rejected a structural change.
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperation { .. } | Self::InvalidArgument { .. }
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Every failure in this crate is a caller sequencing error, so retrying
    /// never helps.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
