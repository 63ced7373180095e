//! Engine types
//!
//! Configuration, statistics and reporting for the sync engine.

use serde::Serialize;

/// Configuration for sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Configured lower bound for streams without a stored cursor
    pub start_date: Option<String>,
    /// Whether to emit state after each page
    pub emit_state_per_page: bool,
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configured start date
    #[must_use]
    pub fn with_start_date(mut self, start_date: Option<String>) -> Self {
        self.start_date = start_date;
        self
    }

    /// Emit state after each page
    #[must_use]
    pub fn with_state_per_page(mut self, emit: bool) -> Self {
        self.emit_state_per_page = emit;
        self
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Total records synced
    pub records_synced: usize,
    /// Total pages fetched, empty terminating pages included
    pub pages_fetched: usize,
    /// Streams that completed
    pub streams_synced: usize,
    /// Streams that failed
    pub errors: usize,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records_synced += count;
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add a stream
    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    /// Add an error
    pub fn add_error(&mut self) {
        self.errors += 1;
    }
}

/// Outcome of one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamStatus {
    Success,
    Failed,
}

/// Per-stream entry of the sync summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamResult {
    pub stream: String,
    pub status: StreamStatus,
    pub records_synced: usize,
    pub pages_fetched: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StreamResult {
    /// Whether the stream finished without error
    pub fn is_success(&self) -> bool {
        self.status == StreamStatus::Success
    }
}

/// Overall outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummaryStatus {
    Succeeded,
    Partial,
    Failed,
}

/// Report emitted at the end of `read`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub status: SummaryStatus,
    pub total_records: usize,
    pub total_streams: usize,
    pub successful_streams: usize,
    pub failed_streams: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<String>,
    pub streams: Vec<StreamResult>,
}

impl SyncSummary {
    /// Summarize per-stream results
    pub fn from_results(streams: Vec<StreamResult>, duration_ms: u64) -> Self {
        let successful_streams = streams.iter().filter(|r| r.is_success()).count();
        let failed_streams = streams.len() - successful_streams;
        let status = if failed_streams == 0 {
            SummaryStatus::Succeeded
        } else if successful_streams == 0 {
            SummaryStatus::Failed
        } else {
            SummaryStatus::Partial
        };

        Self {
            status,
            total_records: streams.iter().map(|r| r.records_synced).sum(),
            total_streams: streams.len(),
            successful_streams,
            failed_streams,
            duration_ms,
            state_file: None,
            streams,
        }
    }

    /// Attach the path the final state was written to
    #[must_use]
    pub fn with_state_file(mut self, path: Option<String>) -> Self {
        self.state_file = path;
        self
    }
}
