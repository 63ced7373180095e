//! Error types for tap-cin7
//!
//! This module defines the error hierarchy for the whole tap.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Request failures are split three ways: permanent (client-side, 4xx),
//! transient (server-side or transport-level, eligible for retry) and
//! exhausted (retry bounds hit). See [`Error::is_transient`].

use thiserror::Error;

/// The main error type for tap-cin7
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Request rejected with HTTP {status}: {body}")]
    PermanentRequest { status: u16, body: String },

    #[error("Transient request failure: {message}")]
    TransientRequest {
        status: Option<u16>,
        message: String,
    },

    #[error("Giving up after {attempts} attempts: {last_error}")]
    ExhaustedRetry {
        attempts: u32,
        last_error: Box<Error>,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid timestamp '{value}': {message}")]
    Timestamp { value: String, message: String },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // Sync Errors
    // ============================================================================
    #[error("Stream '{stream}' not found in catalog")]
    StreamNotFound { stream: String },

    #[error("Sync finished with {failed} failed stream(s)")]
    SyncFailed { failed: usize },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a permanent request error
    pub fn permanent(status: u16, body: impl Into<String>) -> Self {
        Self::PermanentRequest {
            status,
            body: body.into(),
        }
    }

    /// Create a transient request error
    pub fn transient(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::TransientRequest {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a timestamp parse error
    pub fn timestamp(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timestamp {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Check if this error may succeed on a later attempt
    pub fn is_transient(&self) -> bool {
        match self {
            Error::TransientRequest { .. } => true,
            Error::Http(e) => is_transient_transport(e),
            _ => false,
        }
    }

    /// HTTP status attached to a request failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::PermanentRequest { status, .. } => Some(*status),
            Error::TransientRequest { status, .. } => *status,
            Error::ExhaustedRetry { last_error, .. } => last_error.status(),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Classify a non-success HTTP status into a request error.
///
/// Server errors (5xx) are transient; everything else, client errors (4xx)
/// included, is permanent.
pub fn classify_failure(status: u16, body: impl Into<String>) -> Error {
    match status {
        500..=599 => Error::transient(Some(status), format!("HTTP {status}: {}", body.into())),
        _ => Error::permanent(status, body),
    }
}

/// Timeouts, refused connections and redirect loops are worth retrying.
fn is_transient_transport(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect() || e.is_redirect()
}

/// Result type alias for tap-cin7
pub type Result<T> = std::result::Result<T, Error>;
