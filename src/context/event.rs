//! Resource lifecycle events.
//!
//! Browsing contexts report activity as [`ResourceEvent`]s. Shells that only
//! see untyped DOM events can build a [`RawEvent`] from the event name and
//! its JSON `detail` and parse it.
//!
//! # Event Types
//!
//! | Name | Detail |
//! |------|--------|
//! | `load-start` | - |
//! | `load-end` | - |
//! | `title-change` | title string |
//! | `location-change` | URL string |
//! | `icon-change` | `{ href, sizes?, rel? }` |
//! | `security-change` | `{ state, extendedValidation }` |
//! | `error` | - |
//! | `open-window` | `{ url }` |
//! | `open-tab` | `{ url }` |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

use super::BrowsingContext;

// ============================================================================
// Constants
// ============================================================================

const LOAD_START: &str = "load-start";
const LOAD_END: &str = "load-end";
const TITLE_CHANGE: &str = "title-change";
const LOCATION_CHANGE: &str = "location-change";
const ICON_CHANGE: &str = "icon-change";
const SECURITY_CHANGE: &str = "security-change";
const ERROR: &str = "error";
const OPEN_WINDOW: &str = "open-window";
const OPEN_TAB: &str = "open-tab";

// ============================================================================
// SecurityState
// ============================================================================

/// Transport security of the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityState {
    /// Plain or broken transport.
    #[default]
    Insecure,

    /// Valid secure transport.
    Secure,
}

impl SecurityState {
    /// Returns the string representation.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insecure => "insecure",
            Self::Secure => "secure",
        }
    }

    /// Parses a reported state. Anything but `secure` counts as insecure.
    #[inline]
    #[must_use]
    pub fn from_reported(state: &str) -> Self {
        if state.eq_ignore_ascii_case("secure") {
            Self::Secure
        } else {
            Self::Insecure
        }
    }
}

// ============================================================================
// IconDescriptor
// ============================================================================

/// A favicon candidate reported by a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDescriptor {
    /// Icon URL.
    pub href: String,

    /// Declared sizes, e.g. `"16x16 32x32"` or `"any"`.
    #[serde(default)]
    pub sizes: Option<String>,

    /// Link relation, e.g. `"icon"` or `"apple-touch-icon"`.
    #[serde(default)]
    pub rel: Option<String>,
}

impl IconDescriptor {
    /// Creates a descriptor with no declared size.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            sizes: None,
            rel: None,
        }
    }

    /// Sets the declared sizes.
    #[must_use]
    pub fn with_sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    /// Returns the largest declared edge in pixels.
    ///
    /// `any` (scalable) counts as the largest possible size.
    #[must_use]
    pub fn largest_size(&self) -> Option<u32> {
        self.sizes
            .as_deref()?
            .split_whitespace()
            .filter_map(|size| {
                if size.eq_ignore_ascii_case("any") {
                    return Some(u32::MAX);
                }
                let (width, height) = size.split_once(['x', 'X'])?;
                let width: u32 = width.parse().ok()?;
                let height: u32 = height.parse().ok()?;
                Some(width.max(height))
            })
            .max()
    }
}

// ============================================================================
// ResourceEvent
// ============================================================================

/// Lifecycle event reported by a browsing context.
pub enum ResourceEvent {
    /// Navigation started.
    LoadStart,

    /// Navigation finished.
    LoadEnd,

    /// Document title changed.
    TitleChange(String),

    /// Committed location changed.
    LocationChange(String),

    /// A favicon candidate was found.
    IconChange(IconDescriptor),

    /// Transport security changed.
    SecurityChange {
        /// New security state.
        state: SecurityState,
        /// Whether the certificate has extended validation.
        extended_validation: bool,
    },

    /// Loading failed.
    Error,

    /// The document asked for a new window.
    OpenWindow {
        /// Requested URL.
        url: String,
        /// Context already created by the shell for the new window.
        context: Option<Box<dyn BrowsingContext>>,
    },

    /// The document asked for a new tab.
    OpenTab {
        /// Requested URL.
        url: String,
        /// Context already created by the shell for the new tab.
        context: Option<Box<dyn BrowsingContext>>,
    },

    /// Any event the tree does not react to.
    Other(String),
}

impl fmt::Debug for ResourceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadStart => f.write_str("LoadStart"),
            Self::LoadEnd => f.write_str("LoadEnd"),
            Self::TitleChange(title) => f.debug_tuple("TitleChange").field(title).finish(),
            Self::LocationChange(url) => f.debug_tuple("LocationChange").field(url).finish(),
            Self::IconChange(icon) => f.debug_tuple("IconChange").field(icon).finish(),
            Self::SecurityChange {
                state,
                extended_validation,
            } => f
                .debug_struct("SecurityChange")
                .field("state", state)
                .field("extended_validation", extended_validation)
                .finish(),
            Self::Error => f.write_str("Error"),
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
            Self::Other(name) => f.debug_tuple("Other").field(name).finish(),
        }
    }
}

impl ResourceEvent {
    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::LoadStart => LOAD_START,
            Self::LoadEnd => LOAD_END,
            Self::TitleChange(_) => TITLE_CHANGE,
            Self::LocationChange(_) => LOCATION_CHANGE,
            Self::IconChange(_) => ICON_CHANGE,
            Self::SecurityChange { .. } => SECURITY_CHANGE,
            Self::Error => ERROR,
            Self::OpenWindow { .. } => OPEN_WINDOW,
            Self::OpenTab { .. } => OPEN_TAB,
            Self::Other(name) => name,
        }
    }

    /// Copies the event, unless it carries an owned child context.
    #[must_use]
    pub fn try_clone(&self) -> Option<Self> {
        let copy = match self {
            Self::LoadStart => Self::LoadStart,
            Self::LoadEnd => Self::LoadEnd,
            Self::TitleChange(title) => Self::TitleChange(title.clone()),
            Self::LocationChange(url) => Self::LocationChange(url.clone()),
            Self::IconChange(icon) => Self::IconChange(icon.clone()),
            Self::SecurityChange {
                state,
                extended_validation,
            } => Self::SecurityChange {
                state: *state,
                extended_validation: *extended_validation,
            },
            Self::Error => Self::Error,
            Self::OpenWindow { url, context: None } => Self::OpenWindow {
                url: url.clone(),
                context: None,
            },
            Self::OpenTab { url, context: None } => Self::OpenTab {
                url: url.clone(),
                context: None,
            },
            Self::OpenWindow { .. } | Self::OpenTab { .. } => return None,
            Self::Other(name) => Self::Other(name.clone()),
        };
        Some(copy)
    }
}

// ============================================================================
// RawEvent
// ============================================================================

/// Untyped event as delivered by a shell.
///
/// # Format
///
/// ```json
/// { "type": "security-change", "detail": { "state": "secure", "extendedValidation": true } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    /// Event name.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Event-specific data.
    #[serde(default)]
    pub detail: Value,
}

impl RawEvent {
    /// Creates a raw event.
    #[must_use]
    pub fn new(event_type: impl Into<String>, detail: Value) -> Self {
        Self {
            event_type: event_type.into(),
            detail,
        }
    }

    /// Deserializes a raw event from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) for malformed input.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses the event into a typed variant.
    ///
    /// Unknown names and malformed details become [`ResourceEvent::Other`].
    #[must_use]
    pub fn parse(&self) -> ResourceEvent {
        match self.event_type.as_str() {
            LOAD_START => ResourceEvent::LoadStart,
            LOAD_END => ResourceEvent::LoadEnd,
            TITLE_CHANGE => ResourceEvent::TitleChange(self.detail_string("title")),
            LOCATION_CHANGE => ResourceEvent::LocationChange(self.detail_string("url")),
            ICON_CHANGE => match serde_json::from_value::<IconDescriptor>(self.detail.clone()) {
                Ok(icon) => ResourceEvent::IconChange(icon),
                Err(_) => ResourceEvent::Other(self.event_type.clone()),
            },
            SECURITY_CHANGE => ResourceEvent::SecurityChange {
                state: SecurityState::from_reported(&self.get_string("state")),
                extended_validation: self.get_bool("extendedValidation"),
            },
            ERROR => ResourceEvent::Error,
            OPEN_WINDOW => ResourceEvent::OpenWindow {
                url: self.detail_string("url"),
                context: None,
            },
            OPEN_TAB => ResourceEvent::OpenTab {
                url: self.detail_string("url"),
                context: None,
            },
            _ => ResourceEvent::Other(self.event_type.clone()),
        }
    }

    /// Gets the detail itself when it is a string, else `detail[key]`.
    #[inline]
    fn detail_string(&self, key: &str) -> String {
        match &self.detail {
            Value::String(value) => value.clone(),
            _ => self.get_string(key),
        }
    }

    /// Gets a string from detail.
    #[inline]
    fn get_string(&self, key: &str) -> String {
        self.detail
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Gets a bool from detail.
    #[inline]
    fn get_bool(&self, key: &str) -> bool {
        self.detail
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_parse_location_change_string_detail() {
        let raw = RawEvent::new("location-change", json!("https://example.com/"));
        match raw.parse() {
            ResourceEvent::LocationChange(url) => assert_eq!(url, "https://example.com/"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_security_change() {
        let raw = RawEvent::from_json(
            r#"{"type":"security-change","detail":{"state":"secure","extendedValidation":true}}"#,
        )
        .expect("parse raw event");

        match raw.parse() {
            ResourceEvent::SecurityChange {
                state,
                extended_validation,
            } => {
                assert_eq!(state, SecurityState::Secure);
                assert!(extended_validation);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_broken_security_is_insecure() {
        let raw = RawEvent::new("security-change", json!({ "state": "broken" }));
        assert!(matches!(
            raw.parse(),
            ResourceEvent::SecurityChange {
                state: SecurityState::Insecure,
                extended_validation: false
            }
        ));
    }

    #[test]
    fn test_parse_icon_change() {
        let raw = RawEvent::new(
            "icon-change",
            json!({ "href": "https://a.com/icon.png", "sizes": "32x32" }),
        );
        match raw.parse() {
            ResourceEvent::IconChange(icon) => {
                assert_eq!(icon.href, "https://a.com/icon.png");
                assert_eq!(icon.largest_size(), Some(32));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_icon_is_other() {
        let raw = RawEvent::new("icon-change", json!(42));
        assert!(matches!(raw.parse(), ResourceEvent::Other(name) if name == "icon-change"));
    }

    #[test]
    fn test_parse_open_tab() {
        let raw = RawEvent::new("open-tab", json!({ "url": "https://b.com" }));
        match raw.parse() {
            ResourceEvent::OpenTab { url, context } => {
                assert_eq!(url, "https://b.com");
                assert!(context.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event() {
        let raw = RawEvent::new("asyncscroll", Value::Null);
        let event = raw.parse();
        assert_eq!(event.name(), "asyncscroll");
        assert!(matches!(event, ResourceEvent::Other(_)));
    }

    #[test]
    fn test_largest_size() {
        let icon = IconDescriptor::new("a").with_sizes("16x16 48x48 32x32");
        assert_eq!(icon.largest_size(), Some(48));
        assert_eq!(IconDescriptor::new("a").with_sizes("any").largest_size(), Some(u32::MAX));
        assert_eq!(IconDescriptor::new("a").largest_size(), None);
        assert_eq!(IconDescriptor::new("a").with_sizes("huge").largest_size(), None);
    }

    #[test]
    fn test_try_clone_refuses_owned_context() {
        let event = ResourceEvent::OpenWindow {
            url: "https://a.com".into(),
            context: Some(Box::new(crate::context::MemoryContext::default())),
        };
        assert!(event.try_clone().is_none());
        assert!(ResourceEvent::TitleChange("t".into()).try_clone().is_some());
    }
}
