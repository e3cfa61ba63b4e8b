use std::time::Duration;

use serde_json::json;
use shortlink_client::{HttpClientSettings, HttpShortenClient, Outcome, RequestFailure, ShortenClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpShortenClient {
    HttpShortenClient::new(HttpClientSettings::builder().base_url(server.uri()).build()).unwrap()
}

#[tokio::test]
async fn successful_response_is_shortened() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "original_url": "https://example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "original_url": "https://example.com",
            "short_url": "abc123",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server).shorten("https://example.com").await;

    assert_eq!(
        outcome,
        Outcome::Shortened {
            original_url: "https://example.com".to_string(),
            short_url: "abc123".to_string(),
        }
    );
}

#[tokio::test]
async fn missing_echo_falls_back_to_submitted_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "short_url": "xyz" })))
        .mount(&server)
        .await;

    let outcome = client_for(&server).shorten("https://rust-lang.org").await;

    assert_eq!(
        outcome,
        Outcome::Shortened {
            original_url: "https://rust-lang.org".to_string(),
            short_url: "xyz".to_string(),
        }
    );
}

#[tokio::test]
async fn error_status_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "detail": "bad url" })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server).shorten("https://example.com").await;

    match outcome {
        Outcome::Failed {
            reason: RequestFailure::Status { status, body },
        } => {
            assert_eq!(status, 422);
            assert!(body.contains("bad url"));
        }
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let outcome = client_for(&server).shorten("https://example.com").await;

    assert!(matches!(
        outcome,
        Outcome::Failed {
            reason: RequestFailure::Decode(_)
        }
    ));
}

#[tokio::test]
async fn empty_short_url_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "short_url": "" })))
        .mount(&server)
        .await;

    let outcome = client_for(&server).shorten("https://example.com").await;

    assert_eq!(outcome, Outcome::failed(RequestFailure::EmptyShortUrl));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "short_url": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = HttpShortenClient::new(
        HttpClientSettings::builder()
            .base_url(server.uri())
            .timeout(Duration::from_millis(200))
            .build(),
    )
    .unwrap();

    let outcome = client.shorten("https://example.com").await;

    assert_eq!(outcome, Outcome::failed(RequestFailure::Timeout));
}

#[tokio::test]
async fn unreachable_service_is_transport_failure() {
    // nothing listens on the discard port
    let client = HttpShortenClient::new(
        HttpClientSettings::builder()
            .base_url("http://127.0.0.1:9")
            .timeout(Duration::from_secs(2))
            .build(),
    )
    .unwrap();

    let outcome = client.shorten("https://example.com").await;

    assert!(matches!(
        outcome,
        Outcome::Failed {
            reason: RequestFailure::Transport(_) | RequestFailure::Timeout
        }
    ));
}
