//! Incremental window calculation

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Timestamp layout understood by the API's `where` grammar
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SSZ` (UTC, whole seconds)
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp in any of the forms found in config, state or records.
///
/// Accepts RFC 3339, a naive datetime (taken as UTC) or a bare date
/// (midnight UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(Error::timestamp(
        value,
        "expected an ISO-8601 date or datetime",
    ))
}

/// Effective lower bound for a stream sync.
///
/// A persisted high-water mark wins over the configured start date; with
/// neither the sync is unbounded.
pub fn resolve_start(
    configured_start_date: Option<&str>,
    persisted_high_watermark: Option<DateTime<Utc>>,
) -> Result<Option<DateTime<Utc>>> {
    if let Some(watermark) = persisted_high_watermark {
        return Ok(Some(watermark));
    }

    configured_start_date
        .filter(|s| !s.trim().is_empty())
        .map(parse_timestamp)
        .transpose()
}
