//! # Location Matching
//!
//! The access guard asks a [`LocationMatcher`] whether a node's path pattern
//! matches the live location. [`RouteMatcher`] is the stock implementation,
//! with segment-wise patterns:
//!
//! - literal segments: `/checkout/address`
//! - parameters: `/orders/:id` matches any single non-empty segment
//! - splat: `/files/*` matches the remainder, including nothing
//!
//! Without `exact`, a pattern matches any location it is a segment prefix
//! of (`/orders` matches `/orders/42`). Trailing and doubled slashes are
//! ignored on both sides.

use crate::config::RoutingConfig;
use crate::history::Location;

/// Decides whether a path pattern matches a location.
pub trait LocationMatcher: Send + Sync {
    /// `true` if `pattern` matches `location`.
    fn matches(&self, pattern: &str, location: &Location) -> bool;
}

/// Segment-based route matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMatcher {
    exact: bool,
    case_sensitive: bool,
}

impl RouteMatcher {
    /// Prefix-matching, case-insensitive matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher configured from [`RoutingConfig`].
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            exact: config.exact,
            case_sensitive: config.case_sensitive,
        }
    }

    /// Require full-length matches.
    #[must_use]
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Compare literal segments case-sensitively.
    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Match a pattern against a bare pathname.
    pub fn matches_path(&self, pattern: &str, pathname: &str) -> bool {
        let mut path = segments(pathname);
        for expected in segments(pattern) {
            if expected == "*" {
                return true;
            }
            let Some(actual) = path.next() else {
                return false;
            };
            if expected.starts_with(':') {
                continue;
            }
            let same = if self.case_sensitive {
                expected == actual
            } else {
                expected.eq_ignore_ascii_case(actual)
            };
            if !same {
                return false;
            }
        }
        !self.exact || path.next().is_none()
    }
}

impl LocationMatcher for RouteMatcher {
    fn matches(&self, pattern: &str, location: &Location) -> bool {
        self.matches_path(pattern, &location.pathname)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
