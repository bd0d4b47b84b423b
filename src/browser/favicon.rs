//! Favicon selection.
//!
//! Documents may report several icon candidates while loading. A
//! [`FaviconResolver`] decides which one a tab keeps and what to show before
//! any candidate arrives.
//!
//! # Example
//!
//! ```
//! use browser_tabtree::{DefaultFaviconResolver, FaviconResolver};
//!
//! let resolver = DefaultFaviconResolver;
//! assert_eq!(
//!     resolver.fallback("https://example.com:8443/page"),
//!     "https://example.com:8443/favicon.ico"
//! );
//! ```

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use crate::context::IconDescriptor;

// ============================================================================
// Constants
// ============================================================================

/// Icon shown for locations without a domain.
pub const DEFAULT_FAVICON: &str = "chrome://global/skin/icons/defaultFavicon.svg";

// ============================================================================
// BestIcon
// ============================================================================

/// Outcome of an icon selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BestIcon {
    /// Winning candidate, kept to compare against later candidates.
    pub best_icon: Option<IconDescriptor>,
    /// URL to display.
    pub favicon_url: Option<String>,
}

// ============================================================================
// FaviconResolver
// ============================================================================

/// Icon-selection policy.
pub trait FaviconResolver: Send + Sync {
    /// Picks the best of `candidates`. `None` entries are skipped.
    fn best_icon(&self, candidates: &[Option<&IconDescriptor>]) -> BestIcon;

    /// Returns the icon to show for `location` when none was reported.
    fn fallback(&self, location: &str) -> String;
}

// ============================================================================
// DefaultFaviconResolver
// ============================================================================

/// Prefers the largest declared size; earlier candidates win ties.
///
/// Falls back to `/favicon.ico` on the location's origin for http(s)
/// locations, and to [`DEFAULT_FAVICON`] otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFaviconResolver;

impl FaviconResolver for DefaultFaviconResolver {
    fn best_icon(&self, candidates: &[Option<&IconDescriptor>]) -> BestIcon {
        let mut best: Option<&IconDescriptor> = None;
        for candidate in candidates.iter().flatten() {
            let size = candidate.largest_size().unwrap_or(0);
            let best_size = best.and_then(IconDescriptor::largest_size).unwrap_or(0);
            if best.is_none() || size > best_size {
                best = Some(candidate);
            }
        }

        BestIcon {
            favicon_url: best.map(|icon| icon.href.clone()),
            best_icon: best.cloned(),
        }
    }

    fn fallback(&self, location: &str) -> String {
        Url::parse(location)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .and_then(|url| url.join("/favicon.ico").ok())
            .map(String::from)
            .unwrap_or_else(|| DEFAULT_FAVICON.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_larger_icon_wins() {
        let small = IconDescriptor::new("https://a.com/16.png").with_sizes("16x16");
        let large = IconDescriptor::new("https://a.com/64.png").with_sizes("64x64");

        let best = DefaultFaviconResolver.best_icon(&[Some(&small), Some(&large)]);
        assert_eq!(best.favicon_url.as_deref(), Some("https://a.com/64.png"));
        assert_eq!(best.best_icon, Some(large));
    }

    #[test]
    fn test_first_candidate_wins_tie() {
        let new = IconDescriptor::new("https://a.com/new.ico");
        let old = IconDescriptor::new("https://a.com/old.ico");

        let best = DefaultFaviconResolver.best_icon(&[Some(&new), Some(&old)]);
        assert_eq!(best.favicon_url.as_deref(), Some("https://a.com/new.ico"));
    }

    #[test]
    fn test_missing_candidates_skipped() {
        let icon = IconDescriptor::new("https://a.com/icon.png");
        let best = DefaultFaviconResolver.best_icon(&[None, Some(&icon)]);
        assert_eq!(best.best_icon, Some(icon));

        assert_eq!(DefaultFaviconResolver.best_icon(&[None, None]), BestIcon::default());
    }

    #[test]
    fn test_fallback_uses_origin() {
        assert_eq!(
            DefaultFaviconResolver.fallback("http://mozilla.com/en-US/firefox/"),
            "http://mozilla.com/favicon.ico"
        );
    }

    #[test]
    fn test_fallback_default() {
        assert_eq!(DefaultFaviconResolver.fallback(""), DEFAULT_FAVICON);
        assert_eq!(DefaultFaviconResolver.fallback("about:blank"), DEFAULT_FAVICON);
        assert_eq!(DefaultFaviconResolver.fallback("file:///tmp/a.html"), DEFAULT_FAVICON);
    }
}
