//! HTTP client with failure classification, retry and throttling
//!
//! Every page request goes through [`HttpClient::get_records`]:
//! - the request is sent with basic auth and the page's query parameters
//! - the status is classified (4xx permanent, 5xx transient)
//! - transient failures are retried by [`with_retry`]
//! - the body is decoded as a top-level JSON array of records
//! - a fixed delay follows every successful page

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::retry::{with_retry, RetryPolicy};
use crate::auth::BasicCredentials;
use crate::error::{classify_failure, Error, Result};
use crate::incremental::RequestParams;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest response body kept in an error message
const MAX_ERROR_BODY: usize = 512;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL all paths are relative to
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Retry bounds for transient failures
    pub retry: RetryPolicy,
    /// Pause after each successful response
    pub page_delay: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(300),
            retry: RetryPolicy::default(),
            page_delay: Duration::from_secs(1),
            rate_limit: None,
            user_agent: format!("tap-cin7/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Set the post-response delay
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.config.page_delay = delay;
        self
    }

    /// Disable the post-response delay
    pub fn no_page_delay(mut self) -> Self {
        self.config.page_delay = Duration::ZERO;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client for the API
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    credentials: Option<BasicCredentials>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            credentials: None,
            rate_limiter,
        })
    }

    /// Attach basic-auth credentials to every request
    #[must_use]
    pub fn with_credentials(mut self, credentials: BasicCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Fetch one page of records, retrying transient failures.
    ///
    /// Either the whole page is returned or an error; records of a page that
    /// fails to decode are never handed out.
    pub async fn get_records(&self, path: &str, params: &RequestParams) -> Result<Vec<Value>> {
        let url = self.build_url(path);
        let url = url.as_str();

        let records = with_retry(&self.config.retry, || self.fetch_once(url, params)).await?;

        if !self.config.page_delay.is_zero() {
            tokio::time::sleep(self.config.page_delay).await;
        }

        Ok(records)
    }

    /// Single attempt: send, classify, decode
    async fn fetch_once(&self, url: &str, params: &RequestParams) -> Result<Vec<Value>> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.get(url).query(params);
        if let Some(ref credentials) = self.credentials {
            req = credentials.apply(req);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), truncate(&body)));
        }

        let body = response.text().await?;
        let records = decode_records(&body)?;
        debug!(
            url,
            page = params.get("page").map(String::as_str),
            records = records.len(),
            "fetched page"
        );
        Ok(records)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Decode a response body into records.
///
/// The API answers with a JSON array at the top level; anything else is a
/// decode error for the whole page.
pub fn decode_records(body: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(Error::decode(format!(
            "Expected a JSON array of records, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
