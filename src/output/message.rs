//! Protocol messages

use crate::config::config_spec;
use crate::engine::SyncSummary;
use crate::schema::JsonSchema;
use crate::state::State;
use crate::streams::{Catalog, StreamDefinition};
use crate::types::{JsonValue, LogLevel};
use serde::Serialize;
use serde_json::json;

/// A message written to stdout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Record layout of a stream, sent before its records
    Schema {
        stream: String,
        schema: JsonSchema,
        key_properties: Vec<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        bookmark_properties: Vec<String>,
    },
    /// A single record
    Record { record: RecordMessage },
    /// Full state snapshot
    State { state: State },
    /// Human-readable progress
    Log { log: LogMessage },
    /// Result of `check`
    ConnectionStatus {
        #[serde(rename = "connectionStatus")]
        connection_status: ConnectionStatus,
    },
    /// Result of `discover`
    Catalog { catalog: Catalog },
    /// Result of `spec`
    Spec { spec: JsonValue },
    /// Final report of `read`
    SyncSummary { summary: SyncSummary },
}

/// Payload of a RECORD message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordMessage {
    pub stream: String,
    pub data: JsonValue,
    pub emitted_at: i64,
}

/// Payload of a LOG message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

/// Payload of a CONNECTION_STATUS message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionStatus {
    pub status: Status,
    pub message: String,
}

/// Outcome of a connection check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Succeeded,
    Failed,
}

impl Message {
    /// SCHEMA message for a stream
    pub fn schema(stream: &StreamDefinition) -> Self {
        Self::Schema {
            stream: stream.name.to_string(),
            schema: stream.schema(),
            key_properties: stream.primary_keys.iter().map(ToString::to_string).collect(),
            bookmark_properties: stream
                .replication_key
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// RECORD message stamped with the current time
    pub fn record(stream: impl Into<String>, data: JsonValue) -> Self {
        Self::Record {
            record: RecordMessage {
                stream: stream.into(),
                data,
                emitted_at: chrono::Utc::now().timestamp_millis(),
            },
        }
    }

    /// STATE message
    pub fn state(state: State) -> Self {
        Self::State { state }
    }

    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            log: LogMessage {
                level,
                message: message.into(),
            },
        }
    }

    /// Create an info log
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a warning log
    pub fn warn(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Warn, message)
    }

    /// Create an error log
    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }

    /// CONNECTION_STATUS message
    pub fn connection_status(status: Status, message: impl Into<String>) -> Self {
        Self::ConnectionStatus {
            connection_status: ConnectionStatus {
                status,
                message: message.into(),
            },
        }
    }

    /// CATALOG message
    pub fn catalog(catalog: Catalog) -> Self {
        Self::Catalog { catalog }
    }

    /// SPEC message carrying the config schema
    pub fn spec() -> Self {
        Self::Spec {
            spec: json!({
                "documentationUrl": "https://api.cin7.com/API/Help",
                "connectionSpecification": config_spec()
            }),
        }
    }

    /// SYNC_SUMMARY message
    pub fn summary(summary: SyncSummary) -> Self {
        Self::SyncSummary { summary }
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a state message
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }

    /// Check if this is a log message
    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log { .. })
    }
}
