// src/pipeline/filter.rs

//! Location allow/block filtering.

use crate::config::FilterConfig;

/// Case-insensitive substring filter over posting locations.
///
/// Blocklist takes precedence over the allowlist; an empty allowlist accepts
/// everything not blocked. Matching is substring, not whole-word: a blocked
/// "Europe" rejects "Eastern Europe Remote" even though "Remote" is allowed.
#[derive(Debug, Clone)]
pub struct LocationFilter {
    allowed: Vec<String>,
    blocked: Vec<String>,
}

impl LocationFilter {
    /// Build a filter from configuration, pre-lowering the keyword lists.
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            allowed: config
                .allowed_locations
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            blocked: config
                .blocked_locations
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Whether a posting with this location should pass the filter.
    pub fn is_allowed(&self, location: &str) -> bool {
        if location.trim().is_empty() {
            return false;
        }

        let normalized = location.to_lowercase();

        if let Some(blocked) = self.blocked.iter().find(|b| normalized.contains(*b)) {
            log::debug!("Location '{}' rejected (blocked keyword '{}')", location, blocked);
            return false;
        }

        if self.allowed.is_empty() {
            return true;
        }

        if self.allowed.iter().any(|a| normalized.contains(a)) {
            return true;
        }

        log::debug!("Location '{}' rejected (not in allowlist)", location);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_filter() -> LocationFilter {
        LocationFilter::new(&FilterConfig::default())
    }

    #[test]
    fn test_allowlisted_location_accepted() {
        assert!(default_filter().is_allowed("Bengaluru"));
        assert!(default_filter().is_allowed("Remote"));
    }

    #[test]
    fn test_blocklist_wins_over_allowlist() {
        // "Remote" is allowed but "Europe" is blocked; blocklist wins
        // regardless of position.
        assert!(!default_filter().is_allowed("Remote - Europe"));
        assert!(!default_filter().is_allowed("Eastern Europe Remote"));
    }

    #[test]
    fn test_empty_location_rejected() {
        assert!(!default_filter().is_allowed(""));
        assert!(!default_filter().is_allowed("   "));
    }

    #[test]
    fn test_case_insensitive_matching() {
        assert!(default_filter().is_allowed("BENGALURU, india"));
        assert!(!default_filter().is_allowed("london"));
    }

    #[test]
    fn test_empty_allowlist_accepts_unblocked() {
        let filter = LocationFilter::new(&FilterConfig {
            allowed_locations: vec![],
            blocked_locations: vec!["Mars".into()],
        });
        assert!(filter.is_allowed("Anywhere on Earth"));
        assert!(!filter.is_allowed("Mars Colony 7"));
    }

    #[test]
    fn test_unlisted_location_rejected_with_allowlist() {
        assert!(!default_filter().is_allowed("Singapore"));
    }
}
