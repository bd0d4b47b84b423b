//! URL-bar input resolution.
//!
//! Turns what a user typed into the URL bar into something navigable:
//! a URL (with `http://` added when no scheme was typed) or a search query
//! expanded into the configured search template.
//!
//! # Example
//!
//! ```
//! use browser_tabtree::browser::url_input::resolve_user_input;
//! use browser_tabtree::config::DEFAULT_SEARCH_TEMPLATE;
//!
//! assert_eq!(resolve_user_input("mozilla.org", DEFAULT_SEARCH_TEMPLATE), "http://mozilla.org");
//! assert_eq!(
//!     resolve_user_input("rust tab tree", DEFAULT_SEARCH_TEMPLATE),
//!     "https://search.yahoo.com/search?p=rust%20tab%20tree"
//! );
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::SEARCH_TERMS;

// ============================================================================
// Patterns
// ============================================================================

/// `?abc` or `a? b`: explicit search queries.
static QUERY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\?|\?.+\s").expect("static regex pattern is valid")
});

/// Input without any of `?`, `.`, whitespace or `:` is a bare word.
static URL_HINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?.\s:]").expect("static regex pattern is valid")
});

/// Data URIs navigate as typed.
static DATA_URI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:").expect("static regex pattern is valid")
});

/// A scheme such as `http:` or `about:`.
static SCHEME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z\x{00E0}-\x{00FC}0-9+\-.]+:")
        .expect("static regex pattern is valid")
});

// ============================================================================
// Functions
// ============================================================================

/// Returns `true` if `input` starts with a URL scheme.
#[must_use]
pub fn has_scheme(input: &str) -> bool {
    SCHEME_PATTERN.is_match(input)
}

/// Returns `true` if `input` should be treated as a search query.
#[must_use]
pub fn is_not_url(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() || QUERY_PATTERN.is_match(input) || !URL_HINT_PATTERN.is_match(input) {
        return true;
    }
    if DATA_URI_PATTERN.is_match(input) {
        return false;
    }

    let candidate = if has_scheme(input) {
        input.to_string()
    } else {
        format!("http://{input}")
    };

    Url::parse(&candidate).is_err()
}

/// Resolves URL-bar text into a navigation target.
///
/// Search queries are percent-encoded into `search_template`'s
/// `{searchTerms}` placeholder; anything else gets `http://` when it has no
/// scheme.
#[must_use]
pub fn resolve_user_input(input: &str, search_template: &str) -> String {
    let input = input.trim();
    if is_not_url(input) {
        return search_template.replace(SEARCH_TERMS, &urlencoding::encode(input));
    }
    if has_scheme(input) {
        input.to_string()
    } else {
        format!("http://{input}")
    }
}

// ============================================================================
// Tests
// ============================================================================
