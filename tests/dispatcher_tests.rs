//! Integration tests for the request dispatcher.
//!
//! These tests cover the authentication guard, alert handling, date revival,
//! and error categories as seen from outside the crate.

use std::sync::{Arc, Mutex};

use serde::Deserialize;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use traffic_ops::{
    AlertLogger, ApiDate, ApiVersion, BaseUrl, ClientConfig, DateKeySpec, Envelope, HttpClient,
    HttpError, HttpMethod, HttpRequest, LoginRequest,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collects alerts per channel.
#[derive(Debug, Default)]
struct CollectingLogger {
    lines: Mutex<Vec<String>>,
}

impl CollectingLogger {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn push(&self, channel: &str, text: &str) {
        self.lines.lock().unwrap().push(format!("{channel}: {text}"));
    }
}

impl AlertLogger for CollectingLogger {
    fn error(&self, text: &str) {
        self.push("error", text);
    }
    fn warn(&self, text: &str) {
        self.push("warn", text);
    }
    fn info(&self, text: &str) {
        self.push("info", text);
    }
    fn success(&self, text: &str) {
        self.push("success", text);
    }
}

async fn mount_login(server: &MockServer, version: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/api/{version}/user/login")))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "mojolicious=s3ss10n"))
        .mount(server)
        .await;
}

async fn logged_in(server: &MockServer, config: ClientConfig) -> HttpClient {
    let client = HttpClient::new(config).unwrap();
    assert_ok!(client.login(&LoginRequest::password("admin", "twelve12")).await);
    client
}

fn config_with_logger(server: &MockServer, logger: Arc<CollectingLogger>, raise: bool) -> ClientConfig {
    ClientConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .logger(logger)
        .raise_error_alerts(raise)
        .build()
        .unwrap()
}

// === Authentication Guard ===

/// Test 1: Requests before login fail locally and send nothing
#[tokio::test]
async fn test_unauthenticated_request_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": []})))
        .expect(0)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let client = HttpClient::new(config).unwrap();

    let request = HttpRequest::builder(HttpMethod::Get, "cdns").build().unwrap();
    let error = assert_err!(client.request(request).await);
    assert!(matches!(error, HttpError::InvalidCall(_)));

    assert!(matches!(
        client.dump_database().await,
        Err(HttpError::InvalidCall(_))
    ));
}

// === Alerts ===

/// Test 2: Error alerts raise with the joined error texts
#[tokio::test]
async fn test_error_alerts_raise_after_logging() {
    let server = MockServer::start().await;
    mount_login(&server, "5.0").await;
    Mock::given(method("PUT"))
        .and(path("/api/5.0/servers/12"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "alerts": [
                {"level": "warning", "text": "Profile is deprecated"},
                {"level": "error", "text": "hostName cannot be blank"},
                {"level": "error", "text": "ipAddress is required"}
            ]
        })))
        .mount(&server)
        .await;

    let logger = Arc::new(CollectingLogger::default());
    let client = logged_in(&server, config_with_logger(&server, logger.clone(), true)).await;

    let request = HttpRequest::builder(HttpMethod::Put, "servers/12")
        .body(json!({"hostName": ""}))
        .build()
        .unwrap();

    match client.request(request).await {
        Err(HttpError::Api(e)) => {
            assert_eq!(e.message, "hostName cannot be blank; ipAddress is required");
            assert_eq!(e.response_code, 400);
            assert_eq!(e.alerts.len(), 3);
        }
        other => panic!("Expected API error, got: {other:?}"),
    }

    assert_eq!(
        logger.lines(),
        vec![
            "warn: Profile is deprecated",
            "error: hostName cannot be blank",
            "error: ipAddress is required",
        ]
    );
}

/// Test 3: Unknown severities are logged on the success channel
#[tokio::test]
async fn test_unknown_severity_uses_success_channel() {
    let server = MockServer::start().await;
    mount_login(&server, "5.0").await;
    Mock::given(method("POST"))
        .and(path("/api/5.0/cdns"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "response": {"name": "cdn1"},
            "alerts": [
                {"level": "success", "text": "cdn was created."},
                {"level": "notice", "text": "something new"}
            ]
        })))
        .mount(&server)
        .await;

    let logger = Arc::new(CollectingLogger::default());
    let client = logged_in(&server, config_with_logger(&server, logger.clone(), true)).await;

    let request = HttpRequest::builder(HttpMethod::Post, "cdns")
        .body(json!({"name": "cdn1"}))
        .build()
        .unwrap();
    let response = assert_ok!(client.request(request).await);
    assert_eq!(response.code, 201);

    assert_eq!(
        logger.lines(),
        vec!["success: cdn was created.", "success: something new"]
    );
}

/// Test 4: With raising disabled, failed responses are returned to the caller
#[tokio::test]
async fn test_raise_disabled_returns_failed_response() {
    let server = MockServer::start().await;
    mount_login(&server, "5.0").await;
    Mock::given(method("GET"))
        .and(path("/api/5.0/cdns/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "alerts": [{"level": "error", "text": "Resource not found."}]
        })))
        .mount(&server)
        .await;

    let logger = Arc::new(CollectingLogger::default());
    let client = logged_in(&server, config_with_logger(&server, logger.clone(), false)).await;

    let request = HttpRequest::builder(HttpMethod::Get, "cdns/999").build().unwrap();
    let response = assert_ok!(client.request(request).await);

    assert!(!response.is_ok());
    assert_eq!(response.alerts()[0].text, "Resource not found.");
    assert_eq!(logger.lines(), vec!["error: Resource not found."]);
}

// === Dates ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Job {
    id: u32,
    start_time: ApiDate,
    last_updated: ApiDate,
}

/// Test 5: Request-specific date keys are revived into parseable dates
#[tokio::test]
async fn test_custom_date_keys_are_revived() {
    let server = MockServer::start().await;
    mount_login(&server, "4.0").await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/jobs"))
        .and(header("cookie", "mojolicious=s3ss10n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [{
                "id": 1,
                "startTime": "2022-07-18 12:30:00.5+00",
                "lastUpdated": 1_658_102_400
            }]
        })))
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .api_version(ApiVersion::V4_0)
        .alert_logging(false)
        .build()
        .unwrap();
    let client = logged_in(&server, config).await;

    let request = HttpRequest::builder(HttpMethod::Get, "jobs")
        .date_keys(
            DateKeySpec::new()
                .date_string("startTime")
                .unix("lastUpdated"),
        )
        .build()
        .unwrap();
    let response = assert_ok!(client.request(request).await);
    let envelope: Envelope<Vec<Job>> = assert_ok!(response.envelope());

    let job = &envelope.response[0];
    assert_eq!(job.id, 1);
    assert_eq!(job.start_time.raw(), "2022-07-18T12:30:00.500Z");
    assert_eq!(job.last_updated.raw(), "2022-07-18T00:00:00.000Z");
    assert!(job.start_time.is_valid() && job.last_updated.is_valid());
}

/// Test 6: Unparseable dates stay raw and deserialize as invalid
#[tokio::test]
async fn test_unparseable_dates_stay_raw() {
    let server = MockServer::start().await;
    mount_login(&server, "5.0").await;
    Mock::given(method("GET"))
        .and(path("/api/5.0/types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": [{"name": "EDGE", "lastUpdated": "last tuesday"}]
        })))
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .alert_logging(false)
        .build()
        .unwrap();
    let client = logged_in(&server, config).await;

    let request = HttpRequest::builder(HttpMethod::Get, "types").build().unwrap();
    let response = assert_ok!(client.request(request).await);
    assert_eq!(response.body["response"][0]["lastUpdated"], "last tuesday");

    let date: ApiDate =
        serde_json::from_value(response.body["response"][0]["lastUpdated"].clone()).unwrap();
    assert!(!date.is_valid());
}

// === Transport ===

/// Test 7: Transport failures pass through as network errors
#[tokio::test]
async fn test_transport_failure_is_a_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(format!("http://127.0.0.1:{port}")).unwrap())
        .build()
        .unwrap();
    let client = HttpClient::new(config).unwrap();

    let error = assert_err!(client.ping().await);
    assert!(matches!(error, HttpError::Network(_)), "got: {error:?}");
}
