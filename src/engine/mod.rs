//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - pages through each stream and checkpoints state
//! - `SyncConfig` - configuration for sync operations
//! - `SyncSummary` - per-stream results of a run
//!
//! Streams run one after another in catalog order with a single request in
//! flight. A failing stream is reported and the next one starts.

mod types;

pub use types::{
    StreamResult, StreamStatus, SummaryStatus, SyncConfig, SyncStats, SyncSummary,
};

use crate::error::Result;
use crate::http::HttpClient;
use crate::incremental::resolve_start;
use crate::output::{Message, MessageSink};
use crate::pagination::PageCursor;
use crate::state::StateManager;
use crate::streams::StreamDefinition;
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{debug, error, info};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// State manager
    state: StateManager,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient, state: StateManager) -> Self {
        Self {
            client,
            state,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync every stream in order and report the outcome of each.
    ///
    /// Stream failures end up in the summary; only sink failures are
    /// returned as errors.
    pub async fn run(
        &mut self,
        streams: &[&StreamDefinition],
        sink: &mut dyn MessageSink,
    ) -> Result<SyncSummary> {
        let started = Instant::now();
        let mut results = Vec::with_capacity(streams.len());

        for stream in streams {
            let stream_start = Instant::now();
            let records_before = self.stats.records_synced;
            let pages_before = self.stats.pages_fetched;

            let outcome = self.sync_stream(stream, sink).await;

            let mut result = StreamResult {
                stream: stream.name.to_string(),
                status: StreamStatus::Success,
                records_synced: self.stats.records_synced - records_before,
                pages_fetched: self.stats.pages_fetched - pages_before,
                duration_ms: stream_start.elapsed().as_millis() as u64,
                cursor: self.state.get_cursor(stream.name).await,
                error: None,
            };

            match outcome {
                Ok(()) => self.stats.add_stream(),
                Err(e) => {
                    self.stats.add_error();
                    error!(stream = stream.name, error = %e, "stream sync failed");
                    sink.emit(Message::error(format!(
                        "Error syncing stream {}: {e}",
                        stream.name
                    )))?;
                    result.status = StreamStatus::Failed;
                    result.error = Some(e.to_string());
                }
            }

            results.push(result);
        }

        Ok(SyncSummary::from_results(
            results,
            started.elapsed().as_millis() as u64,
        ))
    }

    /// Sync a single stream.
    ///
    /// Emits SCHEMA, then the records of each page as it arrives, then STATE.
    /// Pagination ends at the first empty page. The stream's cursor moves to
    /// the latest replication value seen once the stream completes, or after
    /// every page when per-page state is enabled.
    pub async fn sync_stream(
        &mut self,
        stream: &StreamDefinition,
        sink: &mut dyn MessageSink,
    ) -> Result<()> {
        let name = stream.name;

        let start = match stream.replication_key {
            Some(_) => {
                let watermark = self.state.watermark(name).await?;
                resolve_start(self.config.start_date.as_deref(), watermark)?
            }
            None => None,
        };

        info!(stream = name, start = ?start, "starting stream sync");
        sink.emit(Message::info(format!("Starting sync for stream: {name}")))?;
        sink.emit(Message::schema(stream))?;

        let mut cursor = PageCursor::new();
        let mut high_water: Option<DateTime<Utc>> = None;

        loop {
            let params = stream.request_params(cursor.token(), start);
            let records = self.client.get_records(stream.path, &params).await?;
            let record_count = records.len();

            self.stats.add_page();
            self.stats.add_records(record_count);
            debug!(stream = name, page = cursor.page(), record_count, "page received");

            for record in records {
                if let Some(ts) = stream.replication_value(&record) {
                    high_water = high_water.max(Some(ts));
                }
                sink.emit(Message::record(name, record))?;
            }

            if cursor.advance(record_count).is_none() {
                break;
            }

            if self.config.emit_state_per_page {
                if let Some(ts) = high_water {
                    if self.state.advance_cursor(name, ts).await? {
                        sink.emit(Message::state(self.state.snapshot().await))?;
                    }
                }
            }
        }

        if let Some(ts) = high_water {
            self.state.advance_cursor(name, ts).await?;
        }
        sink.emit(Message::state(self.state.snapshot().await))?;

        info!(
            stream = name,
            records = cursor.records_fetched(),
            pages = cursor.pages_fetched(),
            "stream sync complete"
        );
        sink.emit(Message::info(format!(
            "Completed sync for {name}: {} records in {} pages",
            cursor.records_fetched(),
            cursor.pages_fetched()
        )))?;

        Ok(())
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
