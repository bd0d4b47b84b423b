//! Type-safe identifiers for tree entities.
//!
//! Newtype wrappers keep tab, node and subscription handles from being mixed
//! up at compile time.
//!
//! | Type | Backing | Notes |
//! |------|---------|-------|
//! | [`TabId`] | `NonZeroU32` | Allocated by the owning [`TabTree`](crate::TabTree) |
//! | [`NodeId`] | `u64` | `0` is always the tree root |
//! | [`SubscriptionId`] | `Uuid` | Resource event subscriptions |
//!
//! Tab and node IDs are never reused within a tree, so a stale handle can only
//! ever miss, never alias a newer entity.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// TabId
// ============================================================================

/// Identifier of a tab inside a [`TabTree`](crate::TabTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(NonZeroU32);

impl TabId {
    /// Creates a tab ID, returning `None` for zero.
    #[inline]
    #[must_use]
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// NodeId
// ============================================================================

/// Identifier of a node inside a [`Tree`](crate::tree::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Creates a node ID from a raw value.
    #[inline]
    #[must_use]
    pub(crate) const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SubscriptionId
// ============================================================================

/// Identifier of an event subscription on a browsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Generates a new random subscription ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_id_rejects_zero() {
        assert!(TabId::new(0).is_none());
        assert_eq!(TabId::new(5).map(TabId::as_u32), Some(5));
    }

    #[test]
    fn test_tab_id_serializes_as_number() {
        let id = TabId::new(42).expect("non-zero");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "42");
    }

    #[test]
    fn test_node_root_is_zero() {
        assert_eq!(NodeId::ROOT.as_u64(), 0);
        assert_eq!(NodeId::ROOT.to_string(), "0");
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        assert_ne!(SubscriptionId::generate(), SubscriptionId::generate());
    }
}
