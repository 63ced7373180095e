//! Pagination types

use std::fmt;

/// One-based page number sent as the `page` query parameter.
///
/// Tokens only exist for pages after the first; the first request of a sync
/// carries the implicit page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageToken(u32);

impl PageToken {
    /// The implicit first page
    pub const FIRST: PageToken = PageToken(1);

    /// Create a token for the given page number (clamped to 1)
    pub fn new(page: u32) -> Self {
        Self(page.max(1))
    }

    /// Page number
    pub fn get(self) -> u32 {
        self.0
    }

    /// Token for the following page
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PageToken {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PageToken> for u32 {
    fn from(token: PageToken) -> Self {
        token.0
    }
}
