//! HTTP transport tests
//!
//! Runs the real reqwest transport against a wiremock server.

mod common;

use std::time::Duration;

use common::{blocking, sandwich_json, unreachable_base_url, HEALTHY};
use macroai::analysis::{
    AnalysisClient, AnalysisOutcome, FailureCause, HttpTransport, SyncTransport, TransportError,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base_url: &str) -> AnalysisClient {
    AnalysisClient::new(HttpTransport::new().unwrap(), base_url)
}

/// Analyze `query` against `base_url` on a blocking thread
async fn analyze(base_url: String, query: &'static str) -> AnalysisOutcome {
    blocking(move || client_for(&base_url).analyze(query)).await
}

#[tokio::test]
async fn test_analyze_request_wire_format() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "query": " grilled chicken sandwich " })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sandwich_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = analyze(mock_server.uri(), " grilled chicken sandwich ").await;

    match outcome {
        AnalysisOutcome::Success(record) => {
            assert_eq!(record.item_name, "Grilled Chicken Sandwich");
            assert_eq!(record.calories, 520.0);
            assert_eq!(record.health_tip, "Pair with a vegetable side.");
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_base_url_trailing_slash() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sandwich_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = analyze(format!("{}/", mock_server.uri()), "soup").await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_rate_limited_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "detail": "Traffic is high. Please wait 10s and try again."
        })))
        .mount(&mock_server)
        .await;

    let outcome = analyze(mock_server.uri(), "soup").await;
    assert_eq!(outcome, AnalysisOutcome::RateLimited);
}

#[tokio::test]
async fn test_server_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .mount(&mock_server)
        .await;

    let outcome = analyze(mock_server.uri(), "soup").await;
    assert_eq!(
        outcome,
        AnalysisOutcome::ConnectivityFailure(FailureCause::Status(500))
    );
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "item_name": "Soup" })))
        .mount(&mock_server)
        .await;

    let outcome = analyze(mock_server.uri(), "soup").await;
    assert!(matches!(
        outcome,
        AnalysisOutcome::ConnectivityFailure(FailureCause::MalformedBody(_))
    ));
}

#[tokio::test]
async fn test_connection_refused() {
    let outcome = analyze(unreachable_base_url(), "soup").await;
    assert!(matches!(
        outcome,
        AnalysisOutcome::ConnectivityFailure(FailureCause::Transport(_))
    ));
}

#[tokio::test]
async fn test_timeout_is_transport_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sandwich_json())
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/analyze", mock_server.uri());
    let result = blocking(move || {
        let transport = HttpTransport::with_timeout(Some(Duration::from_millis(200))).unwrap();
        transport.post_json(
            &url,
            &[("Content-Type", "application/json")],
            r#"{"query":"soup"}"#,
        )
    })
    .await;

    assert!(matches!(result, Err(TransportError::Network(_))));
}

#[tokio::test]
async fn test_health_endpoint() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HEALTHY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let status = blocking(move || client_for(&base_url).health().unwrap()).await;

    assert_eq!(status.status.as_deref(), Some("MacroAI is running"));
    assert_eq!(status.model.as_deref(), Some("models/gemini-flash-latest"));
}
