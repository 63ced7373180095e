//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs.

use crate::error::Result;
use crate::incremental::{format_timestamp, parse_timestamp};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete state for the tap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream state
    #[serde(default)]
    pub streams: BTreeMap<String, StreamState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.streams.get(stream)
    }

    /// Get mutable state for a stream, creating if needed
    pub fn get_stream_mut(&mut self, stream: &str) -> &mut StreamState {
        self.streams.entry(stream.to_string()).or_default()
    }

    /// Get the raw cursor for a stream
    pub fn get_cursor(&self, stream: &str) -> Option<&str> {
        self.streams.get(stream)?.cursor.as_deref()
    }

    /// Parsed high-water mark for a stream
    pub fn watermark(&self, stream: &str) -> Result<Option<DateTime<Utc>>> {
        self.get_cursor(stream).map(parse_timestamp).transpose()
    }

    /// Move a stream's cursor to `candidate` if it is later than the current one.
    ///
    /// Returns whether the cursor changed. Cursors keep whole seconds; an
    /// unreadable stored cursor is replaced.
    pub fn advance_cursor(&mut self, stream: &str, candidate: DateTime<Utc>) -> bool {
        let candidate = candidate.trunc_subsecs(0);
        let current = self.watermark(stream).ok().flatten();
        if current.is_some_and(|c| c >= candidate) {
            return false;
        }
        self.get_stream_mut(stream).cursor = Some(format_timestamp(&candidate));
        true
    }
}

/// State for a single stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamState {
    /// Latest replication value seen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}
