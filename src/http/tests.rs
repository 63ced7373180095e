//! Tests for the HTTP client module

use super::*;
use crate::auth::BasicCredentials;
use crate::error::Error;
use crate::incremental::RequestParams;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(base_url)
        .no_page_delay()
        .retry(RetryPolicy::new().with_delays(Duration::from_millis(1), Duration::from_millis(5)))
        .build();
    HttpClient::with_config(config).unwrap()
}

fn page(n: u32) -> RequestParams {
    let mut params = RequestParams::new();
    params.insert("page".to_string(), n.to_string());
    params
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.base_url, "https://api.cin7.com/api");
    assert_eq!(config.timeout, Duration::from_secs(300));
    assert_eq!(config.page_delay, Duration::from_secs(1));
    assert_eq!(config.retry, RetryPolicy::default());
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("tap-cin7/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://example.test/api")
        .timeout(Duration::from_secs(60))
        .page_delay(Duration::from_millis(250))
        .rate_limit(RateLimiterConfig::new(2, 2))
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, "https://example.test/api");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.page_delay, Duration::from_millis(250));
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 2)));
    assert_eq!(config.user_agent, "test-agent/1.0");

    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());
}

#[tokio::test]
async fn test_get_records_sends_params_and_auth() {
    let mock_server = MockServer::start().await;
    let creds = BasicCredentials::new("key", "secret");

    Mock::given(method("GET"))
        .and(path("/api/v1/Products"))
        .and(query_param("page", "2"))
        .and(query_param("rows", "250"))
        .and(basic_auth("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Widget"},
            {"id": 2, "name": "Gadget"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&format!("{}/api", mock_server.uri())).with_credentials(creds);
    let mut params = page(2);
    params.insert("rows".to_string(), "250".to_string());

    let records = client.get_records("/v1/Products", &params).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["name"], "Gadget");
}

#[tokio::test]
async fn test_empty_array_is_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Stock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let records = client.get_records("v1/Stock", &page(1)).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_retry_on_503_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Voucher"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/Voucher"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"customerID": 7}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let records = client.get_records("/v1/Voucher", &page(1)).await.unwrap();
    assert_eq!(records, vec![json!({"customerID": 7})]);
}

#[tokio::test]
async fn test_503_exhausts_after_ten_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/SalesOrders"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(10)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .get_records("/v1/SalesOrders", &page(1))
        .await
        .unwrap_err();

    match err {
        Error::ExhaustedRetry {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 10);
            assert_eq!(last_error.status(), Some(503));
            assert!(last_error.to_string().contains("maintenance"));
        }
        other => panic!("Expected ExhaustedRetry, got {other:?}"),
    }

    mock_server.verify().await;
    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 10);
}

#[tokio::test]
async fn test_404_fails_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such resource"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .get_records("/v1/Missing", &page(1))
        .await
        .unwrap_err();

    match err {
        Error::PermanentRequest { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such resource");
        }
        other => panic!("Expected PermanentRequest, got {other:?}"),
    }

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_401_is_permanent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client.get_records("/v1/Branches", &page(1)).await.unwrap_err();
    assert!(matches!(err, Error::PermanentRequest { status: 401, .. }));
}

#[tokio::test]
async fn test_malformed_json_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": 1},"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client.get_records("/v1/Products", &page(1)).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_retried() {
    // Bind and drop a listener so the port is closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = HttpClientConfig::builder()
        .base_url(format!("http://{addr}"))
        .no_page_delay()
        .retry(
            RetryPolicy::new()
                .with_max_attempts(3)
                .with_delays(Duration::from_millis(1), Duration::from_millis(1)),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.get_records("/v1/Products", &page(1)).await.unwrap_err();
    match err {
        Error::ExhaustedRetry { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("Expected ExhaustedRetry, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .no_page_delay()
        .retry(
            RetryPolicy::new()
                .with_max_attempts(3)
                .with_delays(Duration::from_millis(1), Duration::from_millis(1)),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.get_records("/v1/Products", &page(1)).await.unwrap_err();
    match err {
        Error::ExhaustedRetry {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last_error, Error::Http(ref e) if e.is_timeout()));
        }
        other => panic!("Expected ExhaustedRetry, got {other:?}"),
    }
}

#[tokio::test]
async fn test_redirect_loop_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Branches"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/v1/Branches"))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_page_delay()
        .retry(
            RetryPolicy::new()
                .with_max_attempts(2)
                .with_delays(Duration::from_millis(1), Duration::from_millis(1)),
        )
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client.get_records("/v1/Branches", &page(1)).await.unwrap_err();
    match err {
        Error::ExhaustedRetry {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 2);
            assert!(matches!(*last_error, Error::Http(ref e) if e.is_redirect()));
        }
        other => panic!("Expected ExhaustedRetry, got {other:?}"),
    }
}

#[test]
fn test_decode_records_array() {
    let records = decode_records(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_decode_records_rejects_object() {
    let err = decode_records(r#"{"id": 1}"#).unwrap_err();
    assert!(err.to_string().contains("got an object"));
}

#[test]
fn test_decode_records_rejects_invalid_json() {
    assert!(matches!(
        decode_records("not json"),
        Err(Error::Decode { .. })
    ));
}
