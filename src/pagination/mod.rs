//! Pagination module
//!
//! Page-number pagination for an API that reports neither a total count nor
//! a page count. The only end-of-data signal is a page with zero records.
//!
//! # Overview
//!
//! - [`next_token`] - pure controller deciding the next page after a fetch
//! - [`PageCursor`] - stream-scoped cursor threading the token through a sync
//! - [`PageToken`] - one-based page number for the `page` query parameter

mod cursor;
mod types;

pub use cursor::{next_token, PageCursor};
pub use types::PageToken;

#[cfg(test)]
mod tests;
