//! Tap configuration
//!
//! The config is a flat JSON object supplied with `--config <file>` or
//! `--config-json '<json>'`. Only the credentials are required; every other
//! key has a default.

use crate::auth::BasicCredentials;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, RetryPolicy};
use crate::incremental::parse_timestamp;
use crate::types::{JsonValue, OptionStringExt};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;

/// API root used when `base_url` is not configured
pub const DEFAULT_BASE_URL: &str = "https://api.cin7.com/api";

// ============================================================================
// TapConfig
// ============================================================================

/// Complete tap configuration
#[derive(Clone, Deserialize)]
pub struct TapConfig {
    /// API key (basic-auth username)
    #[serde(default)]
    pub api_key: String,

    /// API password (basic-auth password)
    #[serde(default)]
    pub api_password: String,

    /// Lower bound for the first incremental sync
    #[serde(default)]
    pub start_date: Option<String>,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Pause after each successful page in milliseconds
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Optional cap on requests per second
    #[serde(default)]
    pub rate_limit_rps: Option<u32>,

    /// Attempts per request, the first one included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First backoff delay in milliseconds
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Largest single backoff delay in milliseconds
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,

    /// Time budget for retrying one request in seconds
    #[serde(default = "default_max_elapsed_secs")]
    pub max_elapsed_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

fn default_request_timeout_secs() -> u64 {
    300
}

fn default_page_delay_ms() -> u64 {
    1000
}

fn default_max_attempts() -> u32 {
    10
}

fn default_backoff_base_ms() -> u64 {
    1000
}

fn default_backoff_max_ms() -> u64 {
    600_000
}

fn default_max_elapsed_secs() -> u64 {
    600
}

impl TapConfig {
    /// Config with the given credentials and defaults for everything else
    pub fn new(api_key: impl Into<String>, api_password: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_password: api_password.into(),
            start_date: None,
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            page_delay_ms: default_page_delay_ms(),
            rate_limit_rps: None,
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_max_ms: default_backoff_max_ms(),
            max_elapsed_secs: default_max_elapsed_secs(),
        }
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validated()
    }

    /// Read, parse and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Normalize and check the config
    pub fn validated(mut self) -> Result<Self> {
        self.start_date = self.start_date.none_if_empty();
        self.validate()?;
        Ok(self)
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.api_password.trim().is_empty() {
            return Err(Error::missing_field("api_password"));
        }

        if let Some(start) = &self.start_date {
            parse_timestamp(start).map_err(|e| Error::invalid_value("start_date", e.to_string()))?;
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.max_attempts == 0 {
            return Err(Error::invalid_value("max_attempts", "must be at least 1"));
        }
        if self.rate_limit_rps == Some(0) {
            return Err(Error::invalid_value("rate_limit_rps", "must be at least 1"));
        }

        Ok(())
    }

    /// Basic-auth credentials for every request
    pub fn credentials(&self) -> BasicCredentials {
        BasicCredentials::new(&self.api_key, &self.api_password)
    }

    /// Retry bounds for transient failures
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_attempts(self.max_attempts)
            .with_delays(
                Duration::from_millis(self.backoff_base_ms),
                Duration::from_millis(self.backoff_max_ms),
            )
            .with_max_elapsed(Duration::from_secs(self.max_elapsed_secs))
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .retry(self.retry_policy())
            .page_delay(Duration::from_millis(self.page_delay_ms))
            .user_agent(&self.user_agent);

        if let Some(rps) = self.rate_limit_rps {
            builder = builder.rate_limit(RateLimiterConfig::new(rps, 1));
        }

        builder.build()
    }
}

impl std::fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapConfig")
            .field("api_key", &self.api_key)
            .field("api_password", &"<redacted>")
            .field("start_date", &self.start_date)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("rate_limit_rps", &self.rate_limit_rps)
            .field("max_attempts", &self.max_attempts)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .field("backoff_max_ms", &self.backoff_max_ms)
            .field("max_elapsed_secs", &self.max_elapsed_secs)
            .finish()
    }
}

// ============================================================================
// Config Spec
// ============================================================================

/// JSON-Schema describing the accepted config keys
pub fn config_spec() -> JsonValue {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "CIN7 tap configuration",
        "type": "object",
        "required": ["api_key", "api_password"],
        "additionalProperties": true,
        "properties": {
            "api_key": {
                "type": "string",
                "title": "API Key",
                "description": "CIN7 API username"
            },
            "api_password": {
                "type": "string",
                "title": "API Password",
                "description": "CIN7 API key secret",
                "secret": true
            },
            "start_date": {
                "type": "string",
                "title": "Start Date",
                "description": "Records modified after this date are synced on the first run",
                "format": "date-time"
            },
            "base_url": {
                "type": "string",
                "format": "uri",
                "default": DEFAULT_BASE_URL
            },
            "user_agent": {
                "type": "string",
                "default": default_user_agent()
            },
            "request_timeout_secs": {
                "type": "integer",
                "minimum": 1,
                "default": default_request_timeout_secs()
            },
            "page_delay_ms": {
                "type": "integer",
                "minimum": 0,
                "default": default_page_delay_ms()
            },
            "rate_limit_rps": {
                "type": "integer",
                "minimum": 1
            },
            "max_attempts": {
                "type": "integer",
                "minimum": 1,
                "default": default_max_attempts()
            },
            "backoff_base_ms": {
                "type": "integer",
                "minimum": 0,
                "default": default_backoff_base_ms()
            },
            "backoff_max_ms": {
                "type": "integer",
                "minimum": 0,
                "default": default_backoff_max_ms()
            },
            "max_elapsed_secs": {
                "type": "integer",
                "minimum": 0,
                "default": default_max_elapsed_secs()
            }
        }
    })
}
