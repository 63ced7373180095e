//! Page cursor controller

use super::types::PageToken;
use tracing::debug;

/// Decide which page to fetch after the one just fetched.
///
/// `previous_token` is the token used for that page, `None` meaning the
/// implicit page 1. Returns `None` once a page comes back empty.
pub fn next_token(
    previous_token: Option<PageToken>,
    last_page_record_count: usize,
) -> Option<PageToken> {
    if last_page_record_count == 0 {
        return None;
    }
    Some(previous_token.unwrap_or(PageToken::FIRST).next())
}

/// Pagination progress for a single stream sync.
///
/// Owned by the sync loop of one stream and dropped with it, so nothing
/// carries over between streams or runs. Once terminal it stays terminal.
#[derive(Debug, Clone, Default)]
pub struct PageCursor {
    token: Option<PageToken>,
    pages_fetched: u32,
    records_fetched: u64,
    done: bool,
}

impl PageCursor {
    /// Create a cursor positioned on the implicit first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for the next request (`None` = implicit page 1)
    pub fn token(&self) -> Option<PageToken> {
        self.token
    }

    /// Page number the next request will ask for
    pub fn page(&self) -> u32 {
        self.token.unwrap_or(PageToken::FIRST).get()
    }

    /// Pages fetched so far, including the terminating empty page
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Records seen across all fetched pages
    pub fn records_fetched(&self) -> u64 {
        self.records_fetched
    }

    /// Whether pagination has ended
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Record the outcome of the current page and move to the next one.
    ///
    /// Returns the new token, or `None` when pagination has ended.
    pub fn advance(&mut self, record_count: usize) -> Option<PageToken> {
        if self.done {
            return None;
        }

        self.pages_fetched += 1;
        self.records_fetched += record_count as u64;

        match next_token(self.token, record_count) {
            Some(next) => {
                debug!(
                    page = self.page(),
                    next = next.get(),
                    record_count,
                    "advancing page cursor"
                );
                self.token = Some(next);
                Some(next)
            }
            None => {
                debug!(page = self.page(), "empty page, pagination complete");
                self.done = true;
                None
            }
        }
    }
}
