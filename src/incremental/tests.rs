//! Tests for incremental module

use super::*;
use crate::pagination::PageToken;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn params(pairs: &[(&str, &str)]) -> RequestParams {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ============================================================================
// Timestamp Tests
// ============================================================================

#[test_case("2023-01-01T00:00:00Z", ts(2023, 1, 1, 0, 0, 0) ; "rfc3339 utc")]
#[test_case("2023-01-01T02:30:00+02:00", ts(2023, 1, 1, 0, 30, 0) ; "rfc3339 offset")]
#[test_case("2023-03-04T05:06:07.890Z", ts(2023, 3, 4, 5, 6, 7) + chrono::Duration::milliseconds(890) ; "fractional")]
#[test_case("2023-03-04T05:06:07", ts(2023, 3, 4, 5, 6, 7) ; "naive datetime")]
#[test_case("2023-03-04 05:06:07", ts(2023, 3, 4, 5, 6, 7) ; "naive with space")]
#[test_case("2023-03-04", ts(2023, 3, 4, 0, 0, 0) ; "bare date")]
#[test_case(" 2023-03-04 ", ts(2023, 3, 4, 0, 0, 0) ; "surrounding whitespace")]
fn test_parse_timestamp(input: &str, expected: chrono::DateTime<Utc>) {
    assert_eq!(parse_timestamp(input).unwrap(), expected);
}

#[test_case("" ; "empty")]
#[test_case("yesterday" ; "word")]
#[test_case("2023-13-01" ; "bad month")]
#[test_case("01/02/2023" ; "slashes")]
fn test_parse_timestamp_rejects(input: &str) {
    let err = parse_timestamp(input).unwrap_err();
    assert!(matches!(err, crate::Error::Timestamp { .. }));
}

#[test]
fn test_format_timestamp_second_precision() {
    let value = ts(2023, 6, 1, 12, 5, 9) + chrono::Duration::milliseconds(999);
    assert_eq!(format_timestamp(&value), "2023-06-01T12:05:09Z");
}

// ============================================================================
// resolve_start Tests
// ============================================================================

#[test]
fn test_resolve_start_from_config() {
    let start = resolve_start(Some("2023-01-01T00:00:00Z"), None).unwrap();
    assert_eq!(start, Some(ts(2023, 1, 1, 0, 0, 0)));
}

#[test]
fn test_resolve_start_prefers_watermark() {
    let watermark = ts(2023, 6, 1, 0, 0, 0);
    let start = resolve_start(Some("2023-01-01T00:00:00Z"), Some(watermark)).unwrap();
    assert_eq!(start, Some(watermark));
}

#[test]
fn test_resolve_start_watermark_only() {
    let watermark = ts(2024, 2, 29, 8, 0, 0);
    assert_eq!(resolve_start(None, Some(watermark)).unwrap(), Some(watermark));
}

#[test]
fn test_resolve_start_unbounded() {
    assert_eq!(resolve_start(None, None).unwrap(), None);
    assert_eq!(resolve_start(Some("  "), None).unwrap(), None);
}

#[test]
fn test_resolve_start_invalid_config() {
    assert!(resolve_start(Some("not a date"), None).is_err());
}

// ============================================================================
// build_params Tests
// ============================================================================

#[test]
fn test_build_params_first_page_without_replication() {
    assert_eq!(build_params(None, None, None), params(&[("page", "1")]));
}

#[test]
fn test_build_params_ignores_start_without_replication() {
    let start = Some(ts(2023, 1, 1, 0, 0, 0));
    assert_eq!(
        build_params(Some(PageToken::new(4)), None, start),
        params(&[("page", "4")])
    );
}

#[test]
fn test_build_params_with_replication_no_start() {
    assert_eq!(
        build_params(Some(PageToken::new(2)), Some("modifiedDate"), None),
        params(&[("page", "2"), ("sort", "asc"), ("order_by", "modifiedDate")])
    );
}

#[test]
fn test_build_params_with_filter() {
    let start = Some(ts(2023, 1, 1, 0, 0, 0));
    assert_eq!(
        build_params(None, Some("modifiedDate"), start),
        params(&[
            ("page", "1"),
            ("sort", "asc"),
            ("order_by", "modifiedDate"),
            ("where", "modifiedDate>'2023-01-01T00:00:00Z'"),
        ])
    );
}

#[test]
fn test_build_params_is_deterministic() {
    let start = Some(ts(2023, 5, 6, 7, 8, 9));
    let first = build_params(Some(PageToken::new(3)), Some("modifiedDate"), start);
    for _ in 0..5 {
        assert_eq!(
            build_params(Some(PageToken::new(3)), Some("modifiedDate"), start),
            first
        );
    }
}

// ============================================================================
// merge_static_params Tests
// ============================================================================

#[test]
fn test_merge_static_adds_missing_keys() {
    let mut built = build_params(None, None, None);
    merge_static_params(&mut built, &[("rows", "250")]);
    assert_eq!(built, params(&[("page", "1"), ("rows", "250")]));
}

#[test]
fn test_merge_static_combines_where() {
    let start = Some(ts(2023, 1, 1, 0, 0, 0));
    let mut built = build_params(None, Some("modifiedDate"), start);
    merge_static_params(&mut built, &[("where", "type='Supplier'"), ("rows", "250")]);
    assert_eq!(
        built.get("where").map(String::as_str),
        Some("type='Supplier' AND modifiedDate>'2023-01-01T00:00:00Z'")
    );
}

#[test]
fn test_merge_static_keeps_built_page() {
    let mut built = build_params(Some(PageToken::new(5)), None, None);
    merge_static_params(&mut built, &[("page", "1")]);
    assert_eq!(built.get("page").map(String::as_str), Some("5"));
}
