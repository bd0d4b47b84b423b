//! Headless in-memory browsing context.
//!
//! [`MemoryContext`] keeps a real history stack and the presentation state a
//! shell would hold (zoom, visibility, focus), and reports lifecycle events
//! the way an embedded browser element does. It backs tests, benchmarks and
//! demos where no rendering surface exists.
//!
//! # Example
//!
//! ```
//! use browser_tabtree::context::{BrowsingContext, ContextConfig, MemoryContext};
//!
//! let context = MemoryContext::new(ContextConfig::privileged());
//! context.navigate("https://a.com");
//! context.navigate("https://b.com");
//! context.go_back();
//! assert_eq!(context.current_url().as_deref(), Some("https://a.com"));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::identifiers::SubscriptionId;

use super::{
    BrowsingContext, ContextConfig, ContextFactory, EventSink, ResourceEvent, UNPRIVILEGED_PREFIX,
};

// ============================================================================
// Types
// ============================================================================

/// Shared state behind a [`MemoryContext`] handle.
struct MemoryState {
    /// Capabilities given at creation.
    config: ContextConfig,
    /// Visited URLs.
    history: Vec<String>,
    /// Index of the current entry in `history`.
    index: usize,
    /// Target of the last `navigate` call, exactly as received.
    last_target: Option<String>,
    /// Current zoom factor.
    zoom: f64,
    /// Whether the context is shown.
    visible: bool,
    /// Whether the context holds keyboard focus.
    focused: bool,
    /// Whether a load is in progress.
    loading: bool,
    /// Number of reloads requested.
    reloads: usize,
    /// Active event subscriptions.
    subscribers: FxHashMap<SubscriptionId, EventSink>,
}

// ============================================================================
// MemoryContext
// ============================================================================

/// A cloneable handle to an in-memory browsing context.
///
/// Navigation completes synchronously: `navigate` queues `load-start`,
/// `location-change` and `load-end` to every subscriber.
#[derive(Clone)]
pub struct MemoryContext {
    inner: Arc<Mutex<MemoryState>>,
}

impl fmt::Debug for MemoryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("MemoryContext")
            .field("privileged", &state.config.privileged)
            .field("history_len", &state.history.len())
            .field("index", &state.index)
            .field("subscribers", &state.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryContext {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}

impl MemoryContext {
    /// Creates a blank context.
    #[must_use]
    pub fn new(config: ContextConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryState {
                config,
                history: Vec::new(),
                index: 0,
                last_target: None,
                zoom: 1.0,
                visible: false,
                focused: false,
                loading: false,
                reloads: 0,
                subscribers: FxHashMap::default(),
            })),
        }
    }
}

// ============================================================================
// MemoryContext - Accessors
// ============================================================================

impl MemoryContext {
    /// Returns the configuration given at creation.
    #[must_use]
    pub fn config(&self) -> ContextConfig {
        self.inner.lock().config
    }

    /// Returns the current history entry.
    #[must_use]
    pub fn current_url(&self) -> Option<String> {
        let state = self.inner.lock();
        state.history.get(state.index).cloned()
    }

    /// Returns the last navigation target as received, prefix included.
    #[must_use]
    pub fn last_target(&self) -> Option<String> {
        self.inner.lock().last_target.clone()
    }

    /// Returns every history entry.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.inner.lock().history.clone()
    }

    /// Returns the zoom factor last applied.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.inner.lock().zoom
    }

    /// Returns `true` if the context is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.inner.lock().visible
    }

    /// Returns `true` if the context holds focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.inner.lock().focused
    }

    /// Returns `true` while a load is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.lock().loading
    }

    /// Returns the number of reloads requested.
    #[must_use]
    pub fn reload_count(&self) -> usize {
        self.inner.lock().reloads
    }

    /// Returns the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}

// ============================================================================
// MemoryContext - Events
// ============================================================================

impl MemoryContext {
    /// Reports an event to every subscriber.
    ///
    /// An event carrying a child context can only be delivered once; it goes
    /// to a single subscriber. Returns the number of sinks that accepted it.
    pub fn emit(&self, event: ResourceEvent) -> usize {
        let sinks: Vec<EventSink> = self.inner.lock().subscribers.values().cloned().collect();
        let Some((last, rest)) = sinks.split_last() else {
            trace!(event = event.name(), "No subscriber for event");
            return 0;
        };

        let mut delivered = 0;
        for sink in rest {
            if let Some(copy) = event.try_clone()
                && sink.emit(copy)
            {
                delivered += 1;
            }
        }
        if last.emit(event) {
            delivered += 1;
        }
        delivered
    }

    /// Reports a completed load of the current entry.
    fn emit_load(&self, url: String) {
        self.emit(ResourceEvent::LoadStart);
        self.emit(ResourceEvent::LocationChange(url));
        self.inner.lock().loading = false;
        self.emit(ResourceEvent::LoadEnd);
    }

    /// Moves `delta` entries through history and reports the load.
    fn traverse(&self, delta: isize) {
        let url = {
            let mut state = self.inner.lock();
            let Some(target) = state.index.checked_add_signed(delta) else {
                return;
            };
            if target >= state.history.len() {
                return;
            }
            state.index = target;
            state.loading = true;
            state.history[target].clone()
        };
        debug!(url = %url, delta, "Traversing history");
        self.emit_load(url);
    }
}

// ============================================================================
// BrowsingContext Implementation
// ============================================================================

impl BrowsingContext for MemoryContext {
    fn navigate(&self, target: &str) {
        let url = target
            .strip_prefix(UNPRIVILEGED_PREFIX)
            .unwrap_or(target)
            .to_string();
        {
            let mut state = self.inner.lock();
            state.last_target = Some(target.to_string());
            if !state.history.is_empty() {
                let keep = state.index + 1;
                state.history.truncate(keep);
            }
            state.history.push(url.clone());
            state.index = state.history.len() - 1;
            state.loading = true;
        }
        debug!(url = %url, "Navigating in-memory context");
        self.emit_load(url);
    }

    fn reload(&self) {
        let url = {
            let mut state = self.inner.lock();
            state.reloads += 1;
            let current = state.history.get(state.index).cloned();
            state.loading = current.is_some();
            current
        };
        if let Some(url) = url {
            self.emit_load(url);
        }
    }

    fn stop(&self) {
        let was_loading = std::mem::replace(&mut self.inner.lock().loading, false);
        if was_loading {
            self.emit(ResourceEvent::LoadEnd);
        }
    }

    fn go_back(&self) {
        self.traverse(-1);
    }

    fn go_forward(&self) {
        self.traverse(1);
    }

    fn query_can_go_back(&self) -> BoxFuture<'static, bool> {
        let can_go_back = self.inner.lock().index > 0;
        future::ready(can_go_back).boxed()
    }

    fn query_can_go_forward(&self) -> BoxFuture<'static, bool> {
        let state = self.inner.lock();
        let can_go_forward = state.index + 1 < state.history.len();
        future::ready(can_go_forward).boxed()
    }

    fn set_zoom(&self, factor: f64) {
        self.inner.lock().zoom = factor;
    }

    fn set_visible(&self, visible: bool) {
        self.inner.lock().visible = visible;
    }

    fn focus(&self) {
        self.inner.lock().focused = true;
    }

    fn subscribe(&self, sink: EventSink) -> SubscriptionId {
        let id = SubscriptionId::generate();
        trace!(subscription = %id, tab_id = %sink.tab_id(), "Context subscribed");
        self.inner.lock().subscribers.insert(id, sink);
        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        if self.inner.lock().subscribers.remove(&subscription).is_some() {
            trace!(subscription = %subscription, "Context unsubscribed");
        }
    }
}

// ============================================================================
// MemoryContextFactory
// ============================================================================

/// Factory producing [`MemoryContext`]s and remembering each one.
#[derive(Clone, Default)]
pub struct MemoryContextFactory {
    created: Arc<Mutex<Vec<MemoryContext>>>,
}

impl fmt::Debug for MemoryContextFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryContextFactory")
            .field("created", &self.created.lock().len())
            .finish()
    }
}

impl MemoryContextFactory {
    /// Creates a factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns handles to every context created so far.
    #[must_use]
    pub fn contexts(&self) -> Vec<MemoryContext> {
        self.created.lock().clone()
    }

    /// Returns the most recently created context.
    #[must_use]
    pub fn last(&self) -> Option<MemoryContext> {
        self.created.lock().last().cloned()
    }
}

impl ContextFactory for MemoryContextFactory {
    fn create(&self, config: &ContextConfig) -> Box<dyn BrowsingContext> {
        let context = MemoryContext::new(*config);
        self.created.lock().push(context.clone());
        Box::new(context)
    }
}

// ============================================================================
// Tests
// ============================================================================
