//! Chrome options and configuration.
//!
//! Provides a type-safe, serializable set of options for a tab tree:
//! the privileged capability flag, homepage, search template, keymap
//! platform and whether the tree may be emptied.
//!
//! # Example
//!
//! ```ignore
//! use browser_tabtree::ChromeOptions;
//!
//! let options = ChromeOptions::new()
//!     .with_search_template("https://duckduckgo.com/?q={searchTerms}")
//!     .with_keep_last_tab();
//!
//! let json = serde_json::to_string(&options)?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use url::Url;

use crate::context::ContextConfig;

// ============================================================================
// Constants
// ============================================================================

/// Page opened by the startup tab.
pub const DEFAULT_HOMEPAGE: &str = "http://mozilla.com";

/// Search engine used for URL-bar input that is not a URL.
pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://search.yahoo.com/search?p={searchTerms}";

/// Placeholder replaced by the encoded query in a search template.
pub const SEARCH_TERMS: &str = "{searchTerms}";

// ============================================================================
// Platform
// ============================================================================

/// Keymap flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux and other X11 desktops.
    X11,

    /// Windows.
    Windows,

    /// macOS.
    Mac,

    /// Anything else; only the platform-neutral bindings apply.
    Other,
}

impl Platform {
    /// Returns the platform this crate was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd"
        )) {
            Self::X11
        } else {
            Self::Other
        }
    }

    /// Returns the string representation.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X11 => "x11",
            Self::Windows => "windows",
            Self::Mac => "mac",
            Self::Other => "other",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// ChromeOptions
// ============================================================================

/// Tab tree configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChromeOptions {
    /// Whether the shell grants the privileged browser-element API.
    pub privileged: bool,

    /// URL opened by the startup tab.
    pub homepage: String,

    /// Search URL with a `{searchTerms}` placeholder.
    pub search_template: String,

    /// Keymap flavour.
    pub platform: Platform,

    /// Whether dropping every remaining tab is allowed.
    pub allow_empty: bool,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ChromeOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            privileged: true,
            homepage: DEFAULT_HOMEPAGE.to_string(),
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
            platform: Platform::current(),
            allow_empty: true,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ChromeOptions {
    /// Marks the shell as sandboxed.
    #[inline]
    #[must_use]
    pub fn with_unprivileged(mut self) -> Self {
        self.privileged = false;
        self
    }

    /// Sets the homepage.
    #[inline]
    #[must_use]
    pub fn with_homepage(mut self, url: impl Into<String>) -> Self {
        self.homepage = url.into();
        self
    }

    /// Sets the search template.
    #[inline]
    #[must_use]
    pub fn with_search_template(mut self, template: impl Into<String>) -> Self {
        self.search_template = template.into();
        self
    }

    /// Sets the keymap platform.
    #[inline]
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Forbids dropping the last remaining tabs.
    #[inline]
    #[must_use]
    pub fn with_keep_last_tab(mut self) -> Self {
        self.allow_empty = false;
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl ChromeOptions {
    /// Returns the capabilities handed to new browsing contexts.
    #[inline]
    #[must_use]
    pub fn context_config(&self) -> ContextConfig {
        ContextConfig {
            privileged: self.privileged,
        }
    }

    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if let Err(e) = Url::parse(&self.homepage) {
            return Err(format!("Homepage '{}' is not a valid URL: {e}", self.homepage));
        }

        if !self.search_template.contains(SEARCH_TERMS) {
            return Err(format!(
                "Search template '{}' has no {SEARCH_TERMS} placeholder",
                self.search_template
            ));
        }

        let probe = self.search_template.replace(SEARCH_TERMS, "probe");
        if let Err(e) = Url::parse(&probe) {
            return Err(format!(
                "Search template '{}' is not a valid URL: {e}",
                self.search_template
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
