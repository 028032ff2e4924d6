//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Strip the query string from an apply link.
///
/// Listing sites append tracking parameters that would change the content
/// fingerprint of an otherwise identical posting.
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
