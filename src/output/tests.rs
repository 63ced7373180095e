//! Tests for output messages and sinks

use super::*;
use crate::state::State;
use crate::streams::{catalog, find_stream};
use crate::types::LogLevel;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn to_json(message: &Message) -> Value {
    serde_json::to_value(message).unwrap()
}

#[test]
fn test_record_message() {
    let msg = Message::record("products", json!({"id": 1}));
    assert!(msg.is_record());
    assert!(!msg.is_state());

    let value = to_json(&msg);
    assert_eq!(value["type"], "RECORD");
    assert_eq!(value["record"]["stream"], "products");
    assert_eq!(value["record"]["data"], json!({"id": 1}));
    assert!(value["record"]["emitted_at"].as_i64().unwrap() > 0);
}

#[test]
fn test_schema_message() {
    let msg = Message::schema(find_stream("stockstream").unwrap());
    let value = to_json(&msg);

    assert_eq!(value["type"], "SCHEMA");
    assert_eq!(value["stream"], "stockstream");
    assert_eq!(
        value["key_properties"],
        json!(["productId", "productOptionId", "branchId"])
    );
    assert_eq!(value["bookmark_properties"], json!(["modifiedDate"]));
    assert_eq!(value["schema"]["type"], "object");

    let voucher = to_json(&Message::schema(find_stream("voucher").unwrap()));
    assert!(voucher.get("bookmark_properties").is_none());
}

#[test]
fn test_state_message() {
    let mut state = State::new();
    state.advance_cursor("products", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

    assert_eq!(
        to_json(&Message::state(state)),
        json!({
            "type": "STATE",
            "state": {"streams": {"products": {"cursor": "2024-01-01T00:00:00Z"}}}
        })
    );
}

#[test]
fn test_log_messages() {
    assert_eq!(
        to_json(&Message::warn("slow")),
        json!({"type": "LOG", "log": {"level": "WARN", "message": "slow"}})
    );
    assert!(Message::info("x").is_log());
    assert!(Message::error("x").is_log());
    assert_eq!(
        to_json(&Message::log(LogLevel::Debug, "d"))["log"]["level"],
        "DEBUG"
    );
}

#[test]
fn test_connection_status_message() {
    assert_eq!(
        to_json(&Message::connection_status(Status::Failed, "nope")),
        json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {"status": "FAILED", "message": "nope"}
        })
    );
}

#[test]
fn test_catalog_and_spec_messages() {
    let value = to_json(&Message::catalog(catalog()));
    assert_eq!(value["type"], "CATALOG");
    assert_eq!(value["catalog"]["streams"].as_array().unwrap().len(), 7);

    let spec = to_json(&Message::spec());
    assert_eq!(spec["type"], "SPEC");
    assert_eq!(
        spec["spec"]["connectionSpecification"]["required"],
        json!(["api_key", "api_password"])
    );
}

#[test]
fn test_vec_sink_collects() {
    let mut sink: Vec<Message> = Vec::new();
    sink.emit(Message::info("one")).unwrap();
    sink.emit(Message::info("two")).unwrap();
    assert_eq!(sink.len(), 2);
}

#[test]
fn test_json_lines_writer() {
    let mut buf = Vec::new();
    let mut writer = JsonLinesWriter::new(&mut buf, OutputFormat::Json);
    writer.emit(Message::info("hello")).unwrap();
    writer.emit(Message::state(State::new())).unwrap();
    writer.flush().unwrap();

    let output = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"type":"LOG","log":{"level":"INFO","message":"hello"}}"#,
            r#"{"type":"STATE","state":{"streams":{}}}"#,
        ]
    );
}

#[test]
fn test_pretty_writer() {
    let mut buf = Vec::new();
    let mut writer = JsonLinesWriter::new(&mut buf, OutputFormat::Pretty);
    writer.emit(Message::info("hello")).unwrap();
    writer.flush().unwrap();

    let output = String::from_utf8(buf).unwrap();
    assert!(output.contains("\n  \"type\": \"LOG\""));
    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["log"]["message"], "hello");
}
