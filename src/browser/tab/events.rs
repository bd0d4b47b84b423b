//! Resource event handling.
//!
//! | Event | Effect |
//! |-------|--------|
//! | `load-start` | Clears page state, sets loading |
//! | `load-end` | Clears loading |
//! | `title-change` | Sets title |
//! | `location-change` | Sets location, clears the URL-bar draft |
//! | `icon-change` | Re-runs icon selection |
//! | `security-change` | Sets security state |
//! | `error` | Clears loading |
//! | `open-window`, `open-tab` | Handed to the tree |

use std::fmt;

use tracing::trace;

use crate::context::{BrowsingContext, ResourceEvent};

use super::Tab;
use super::core::PageState;

// ============================================================================
// TabEventOutcome
// ============================================================================

/// What a tab did with a resource event.
pub enum TabEventOutcome {
    /// Unrecognized event; nothing changed.
    Ignored,

    /// Observable tab state changed.
    Updated,

    /// The document asked for a new, selected child tab.
    OpenWindow {
        /// Requested URL.
        url: String,
        /// Context already created for it.
        context: Option<Box<dyn BrowsingContext>>,
    },

    /// The document asked for a new, background child tab.
    OpenTab {
        /// Requested URL.
        url: String,
        /// Context already created for it.
        context: Option<Box<dyn BrowsingContext>>,
    },
}

impl fmt::Debug for TabEventOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => f.write_str("Ignored"),
            Self::Updated => f.write_str("Updated"),
            Self::OpenWindow { url, context } => f
                .debug_struct("OpenWindow")
                .field("url", url)
                .field("has_context", &context.is_some())
                .finish(),
            Self::OpenTab { url, context } => f
                .debug_struct("OpenTab")
                .field("url", url)
                .field("has_context", &context.is_some())
                .finish(),
        }
    }
}

// ============================================================================
// Tab - Events
// ============================================================================

impl Tab {
    /// Applies a resource event to the tab state.
    pub fn handle_event(&mut self, event: ResourceEvent) -> TabEventOutcome {
        trace!(tab_id = %self.id, event = event.name(), "Tab event");

        match event {
            ResourceEvent::LoadStart => {
                self.page = PageState {
                    loading: true,
                    ..PageState::default()
                };
            }
            ResourceEvent::LoadEnd | ResourceEvent::Error => {
                self.page.loading = false;
            }
            ResourceEvent::TitleChange(title) => {
                self.page.title = title;
            }
            ResourceEvent::LocationChange(url) => {
                self.user_input.clear();
                self.url.clone_from(&url);
                self.page.location = url;
            }
            ResourceEvent::IconChange(icon) => {
                let best = self
                    .services
                    .favicons
                    .best_icon(&[Some(&icon), self.page.best_icon.as_ref()]);
                self.page.favicon_url = best.favicon_url;
                self.page.best_icon = best.best_icon;
            }
            ResourceEvent::SecurityChange {
                state,
                extended_validation,
            } => {
                self.page.security_state = state;
                self.page.extended_validation = extended_validation;
            }
            ResourceEvent::OpenWindow { url, context } => {
                return TabEventOutcome::OpenWindow { url, context };
            }
            ResourceEvent::OpenTab { url, context } => {
                return TabEventOutcome::OpenTab { url, context };
            }
            ResourceEvent::Other(_) => return TabEventOutcome::Ignored,
        }

        TabEventOutcome::Updated
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::browser::tab::test_services;
    use crate::context::{ContextConfig, IconDescriptor, MemoryContext, SecurityState};
    use crate::identifiers::TabId;

    fn tab() -> Tab {
        let (services, _rx, _) = test_services(ContextConfig::privileged());
        Tab::new(TabId::new(1).expect("non-zero"), services, None)
    }

    #[test]
    fn test_location_change_clears_user_input() {
        let mut tab = tab();
        tab.set_user_input("goog");

        let outcome = tab.handle_event(ResourceEvent::LocationChange("https://google.com/".into()));
        assert!(matches!(outcome, TabEventOutcome::Updated));
        assert_eq!(tab.user_input(), "");
        assert_eq!(tab.location(), "https://google.com/");
    }

    #[test]
    fn test_load_start_clears_page_state() {
        let mut tab = tab();
        tab.handle_event(ResourceEvent::TitleChange("Old".into()));
        tab.handle_event(ResourceEvent::LocationChange("https://a.com/".into()));
        tab.handle_event(ResourceEvent::IconChange(IconDescriptor::new("https://a.com/i.png")));
        tab.handle_event(ResourceEvent::SecurityChange {
            state: SecurityState::Secure,
            extended_validation: true,
        });
        tab.set_user_input("draft");

        tab.handle_event(ResourceEvent::LoadStart);
        assert!(tab.is_loading());
        assert_eq!(tab.title(), "");
        assert_eq!(tab.location(), "");
        assert_eq!(tab.url(), "https://a.com/");
        assert_eq!(tab.security_state(), SecurityState::Insecure);
        assert!(!tab.security_extended_validation());
        assert!(tab.page.best_icon.is_none());
        assert_eq!(tab.user_input(), "draft");

        tab.handle_event(ResourceEvent::LoadEnd);
        assert!(!tab.is_loading());
    }

    #[test]
    fn test_error_stops_loading() {
        let mut tab = tab();
        tab.handle_event(ResourceEvent::LoadStart);
        tab.handle_event(ResourceEvent::Error);
        assert!(!tab.is_loading());
    }

    #[test]
    fn test_icon_selection_keeps_larger() {
        let mut tab = tab();
        tab.handle_event(ResourceEvent::LocationChange("https://a.com/page".into()));
        assert_eq!(tab.favicon(), "https://a.com/favicon.ico");

        let large = IconDescriptor::new("https://a.com/64.png").with_sizes("64x64");
        let small = IconDescriptor::new("https://a.com/16.png").with_sizes("16x16");
        tab.handle_event(ResourceEvent::IconChange(large));
        tab.handle_event(ResourceEvent::IconChange(small));
        assert_eq!(tab.favicon(), "https://a.com/64.png");
    }

    #[test]
    fn test_newer_icon_wins_tie() {
        let mut tab = tab();
        tab.handle_event(ResourceEvent::IconChange(IconDescriptor::new("https://a.com/1.ico")));
        tab.handle_event(ResourceEvent::IconChange(IconDescriptor::new("https://a.com/2.ico")));
        assert_eq!(tab.favicon(), "https://a.com/2.ico");
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        let mut tab = tab();
        let outcome = tab.handle_event(ResourceEvent::Other("scroll".into()));
        assert!(matches!(outcome, TabEventOutcome::Ignored));
    }

    #[test]
    fn test_open_requests_are_forwarded() {
        let mut tab = tab();
        let outcome = tab.handle_event(ResourceEvent::OpenTab {
            url: "https://b.com/".into(),
            context: Some(Box::new(MemoryContext::default())),
        });
        match outcome {
            TabEventOutcome::OpenTab { url, context } => {
                assert_eq!(url, "https://b.com/");
                assert!(context.is_some());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let outcome = tab.handle_event(ResourceEvent::OpenWindow {
            url: "https://c.com/".into(),
            context: None,
        });
        assert!(matches!(outcome, TabEventOutcome::OpenWindow { .. }));
    }

    #[test]
    fn test_display_title_fallbacks() {
        let mut tab = tab();
        tab.set_location("https://a.com/");
        tab.handle_event(ResourceEvent::LoadStart);
        assert_eq!(tab.display_title(), "Loading…");

        tab.handle_event(ResourceEvent::LocationChange("https://a.com/".into()));
        tab.handle_event(ResourceEvent::LoadEnd);
        assert_eq!(tab.display_title(), "https://a.com/");

        tab.handle_event(ResourceEvent::TitleChange("A".into()));
        assert_eq!(tab.display_title(), "A");
    }
}
