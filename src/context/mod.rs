//! Browsing context boundary.
//!
//! A browsing context is the external resource behind a tab (an embedded
//! browser element in the shell). The tree never talks to it directly beyond
//! the [`BrowsingContext`] trait, and receives its lifecycle events through
//! an [`EventSink`].
//!
//! # Event Flow
//!
//! ```text
//! ┌──────────────────┐   EventSink::emit    ┌──────────────────────┐
//! │ BrowsingContext  │ ───────────────────► │ mpsc (TabId, event)  │
//! │ (external)       │                      └──────────┬───────────┘
//! └──────────────────┘                                 │
//!          ▲                                           ▼
//!          │ navigate / reload / set_zoom   ┌──────────────────────┐
//!          └─────────────────────────────── │ TabTree              │
//!                                           │  process_*_events()  │
//!                                           └──────────────────────┘
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | `event` | Typed and raw resource events |
//! | `memory` | Headless in-memory browsing context |

// ============================================================================
// Submodules
// ============================================================================

/// Resource lifecycle events.
pub mod event;

/// In-memory browsing context.
pub mod memory;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::identifiers::{SubscriptionId, TabId};

pub use event::{IconDescriptor, RawEvent, ResourceEvent, SecurityState};
pub use memory::{MemoryContext, MemoryContextFactory};

// ============================================================================
// Constants
// ============================================================================

/// Prefix wrapping navigation targets for unprivileged contexts.
pub const UNPRIVILEGED_PREFIX: &str = "tab:,";

// ============================================================================
// ContextConfig
// ============================================================================

/// Capabilities handed to a browsing context at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Whether the shell grants the privileged browser-element API
    /// (visibility, zoom and raw navigation).
    pub privileged: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::privileged()
    }
}

impl ContextConfig {
    /// Configuration for a privileged shell.
    #[inline]
    #[must_use]
    pub const fn privileged() -> Self {
        Self { privileged: true }
    }

    /// Configuration for a sandboxed shell.
    #[inline]
    #[must_use]
    pub const fn unprivileged() -> Self {
        Self { privileged: false }
    }

    /// Returns the navigation target for `url` under this configuration.
    #[must_use]
    pub fn navigation_target(&self, url: &str) -> String {
        if self.privileged {
            url.to_string()
        } else {
            format!("{UNPRIVILEGED_PREFIX}{url}")
        }
    }
}

// ============================================================================
// EventSink
// ============================================================================

/// Channel endpoint a browsing context reports its events to.
///
/// Each sink is bound to one tab; events are queued until the owning
/// [`TabTree`](crate::TabTree) processes them.
#[derive(Clone)]
pub struct EventSink {
    tab_id: TabId,
    tx: mpsc::UnboundedSender<(TabId, ResourceEvent)>,
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink")
            .field("tab_id", &self.tab_id)
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl EventSink {
    /// Creates a sink bound to `tab_id`.
    pub(crate) fn new(tab_id: TabId, tx: mpsc::UnboundedSender<(TabId, ResourceEvent)>) -> Self {
        Self { tab_id, tx }
    }

    /// Returns the tab this sink reports to.
    #[inline]
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    /// Queues an event. Returns `false` if the tree is gone.
    pub fn emit(&self, event: ResourceEvent) -> bool {
        self.tx.send((self.tab_id, event)).is_ok()
    }

    /// Returns `true` if the receiving tree has been dropped.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ============================================================================
// BrowsingContext
// ============================================================================

/// Handle to one embedded browsing context.
///
/// Methods take `&self`; implementations are handles onto shared state owned
/// by the shell.
pub trait BrowsingContext: Send {
    /// Starts navigating to `url`.
    fn navigate(&self, url: &str);

    /// Reloads the current document.
    fn reload(&self);

    /// Stops loading.
    fn stop(&self);

    /// Goes back one history entry.
    fn go_back(&self);

    /// Goes forward one history entry.
    fn go_forward(&self);

    /// Asks whether a back entry exists. Resolves later on the event loop.
    fn query_can_go_back(&self) -> BoxFuture<'static, bool>;

    /// Asks whether a forward entry exists. Resolves later on the event loop.
    fn query_can_go_forward(&self) -> BoxFuture<'static, bool>;

    /// Sets the zoom factor.
    fn set_zoom(&self, factor: f64);

    /// Shows or hides the context.
    fn set_visible(&self, visible: bool);

    /// Gives keyboard focus to the context.
    fn focus(&self);

    /// Starts reporting lifecycle events to `sink`.
    fn subscribe(&self, sink: EventSink) -> SubscriptionId;

    /// Stops reporting to a previous subscription. Unknown IDs are ignored.
    fn unsubscribe(&self, subscription: SubscriptionId);
}

// ============================================================================
// ContextFactory
// ============================================================================

/// Creates browsing contexts for tabs that navigate before having one.
pub trait ContextFactory: Send + Sync {
    /// Creates a new, blank browsing context.
    fn create(&self, config: &ContextConfig) -> Box<dyn BrowsingContext>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_target_privileged() {
        let config = ContextConfig::privileged();
        assert_eq!(config.navigation_target("http://a.com"), "http://a.com");
    }

    #[test]
    fn test_navigation_target_unprivileged() {
        let config = ContextConfig::unprivileged();
        assert_eq!(config.navigation_target("http://a.com"), "tab:,http://a.com");
    }

    #[test]
    fn test_sink_reports_tab_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tab_id = TabId::new(3).expect("non-zero");
        let sink = EventSink::new(tab_id, tx);

        assert!(sink.emit(ResourceEvent::LoadEnd));
        let (received_id, event) = rx.try_recv().expect("queued event");
        assert_eq!(received_id, tab_id);
        assert!(matches!(event, ResourceEvent::LoadEnd));
    }

    #[test]
    fn test_sink_closed_after_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = EventSink::new(TabId::new(1).expect("non-zero"), tx);
        drop(rx);
        assert!(sink.is_closed());
        assert!(!sink.emit(ResourceEvent::LoadStart));
    }
}
