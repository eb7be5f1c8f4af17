//! Retry behaviour of the backend API client against a simulated backend.

use std::time::{Duration, Instant};

use reqwest::Url;
use rstest::rstest;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webapi::domain::ports::{BackendApi, BackendApiError, BackendRequest};
use webapi::domain::{Error, ErrorCode, RetryPolicy, TRACE_ID_HEADER, TraceId};
use webapi::outbound::backend_api::{BackendApiConfig, retrying_backend_api};

const REPORT_PATH: &str = "/reports/7";

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(10),
    }
}

fn client(server: &MockServer, timeout: Duration, retry: RetryPolicy) -> std::sync::Arc<dyn BackendApi> {
    let base_url = Url::parse(&format!("{}/", server.uri())).expect("mock server url");
    retrying_backend_api(BackendApiConfig {
        base_url,
        timeout,
        retry,
    })
    .expect("client builds")
}

fn report_request() -> BackendRequest {
    BackendRequest::get(REPORT_PATH)
}

#[tokio::test]
async fn recovers_after_two_transient_failures_with_default_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":7}"))
        .expect(1)
        .mount(&server)
        .await;
    let backend = client(&server, Duration::from_secs(5), RetryPolicy::default());
    let started = Instant::now();

    let response = backend.send(&report_request()).await.expect("third attempt succeeds");

    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"{\"id\":7}");
    assert!(
        started.elapsed() >= Duration::from_millis(1500),
        "backoff waits of 500ms and 1000ms must elapse, took {:?}",
        started.elapsed()
    );
}

#[rstest]
#[case::internal(500)]
#[case::bad_gateway(502)]
#[case::unavailable(503)]
#[case::request_timeout(408)]
#[tokio::test]
async fn persistent_transient_failures_use_exactly_four_attempts(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .respond_with(ResponseTemplate::new(status))
        .expect(4)
        .mount(&server)
        .await;
    let backend = client(&server, Duration::from_secs(5), fast_policy());

    let error = backend.send(&report_request()).await.expect_err("retries exhausted");

    assert!(error.is_retryable(), "{error}");
    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 4);
    assert_eq!(Error::from(error).code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[case::bad_request(400)]
#[case::not_found(404)]
#[case::conflict(409)]
#[case::too_many_requests(429)]
#[tokio::test]
async fn client_errors_fail_immediately_without_backoff(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .expect(1)
        .mount(&server)
        .await;
    let backend = client(&server, Duration::from_secs(5), RetryPolicy::default());
    let started = Instant::now();

    let error = backend.send(&report_request()).await.expect_err("client error");

    assert!(
        started.elapsed() < Duration::from_millis(500),
        "no backoff expected, took {:?}",
        started.elapsed()
    );
    assert_eq!(
        error,
        BackendApiError::rejected(status, format!("status {status}: nope"))
    );
    assert_eq!(Error::from(error).code(), ErrorCode::BadGateway);
}

#[tokio::test]
async fn slow_responses_time_out_and_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(4)
        .mount(&server)
        .await;
    let backend = client(&server, Duration::from_millis(50), fast_policy());

    let error = backend.send(&report_request()).await.expect_err("every attempt times out");

    assert!(matches!(error, BackendApiError::Timeout { .. }), "{error}");
}

#[tokio::test]
async fn unreachable_backends_surface_transport_failures() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let address = listener.local_addr().expect("local address");
    drop(listener);
    let backend = retrying_backend_api(BackendApiConfig {
        base_url: Url::parse(&format!("http://{address}/")).expect("url"),
        timeout: Duration::from_secs(1),
        retry: fast_policy(),
    })
    .expect("client builds");

    let error = backend.send(&report_request()).await.expect_err("connection refused");

    assert!(matches!(error, BackendApiError::Transport { .. }), "{error}");
}

#[tokio::test]
async fn forwards_the_active_trace_id() {
    let server = MockServer::start().await;
    let trace_id: TraceId = "6f9619ff-8b86-4d01-b42d-00c04fc964ff"
        .parse()
        .expect("valid trace id");
    Mock::given(method("GET"))
        .and(path(REPORT_PATH))
        .and(header(TRACE_ID_HEADER, "6f9619ff-8b86-4d01-b42d-00c04fc964ff"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let backend = client(&server, Duration::from_secs(5), fast_policy());

    let response = TraceId::scope(trace_id, async { backend.send(&report_request()).await })
        .await
        .expect("matching request succeeds");

    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn base_url_path_prefix_is_kept_without_a_trailing_slash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let backend = retrying_backend_api(BackendApiConfig {
        base_url: Url::parse(&format!("{}/api", server.uri())).expect("mock server url"),
        timeout: Duration::from_secs(5),
        retry: fast_policy(),
    })
    .expect("client builds");

    let response = backend
        .send(&BackendRequest::get("reports/7"))
        .await
        .expect("prefixed path reaches the backend");

    assert_eq!(response.status, 200);
}
