//! HTTP client module
//!
//! Provides the HTTP client used for every API call, with failure
//! classification, bounded retry and throttling.
//!
//! # Features
//!
//! - **Failure Classification**: 4xx is permanent, 5xx and transport errors are transient
//! - **Retry Combinator**: exponential backoff bounded by attempts and elapsed time
//! - **Throttling**: fixed post-response delay and optional token bucket via governor
//! - **Authentication**: Basic credentials on every request

mod client;
mod rate_limit;
mod retry;

pub use client::{decode_records, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::{with_retry, RetryPolicy};

#[cfg(test)]
mod tests;
