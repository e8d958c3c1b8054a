//! Tests for the HTTP transport

use super::*;
use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_returns_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .mount(&server)
        .await;

    let client = HttpClient::new();
    let response = client
        .fetch(&format!("{}/search", server.uri()), None)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.message, "OK");
    assert!(response.is_success());
    assert_eq!(response.body, "{\"ok\":true}");
}

#[tokio::test]
async fn test_fetch_non_200_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = HttpClient::new();
    let response = client
        .fetch(&format!("{}/missing", server.uri()), None)
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.message, "Not Found");
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_fetch_sends_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(basic_auth("client-id", ""))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = HttpClient::new();
    let auth = BasicAuth::new("client-id", "");
    let response = client
        .fetch(&format!("{}/protected", server.uri()), Some(&auth))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_fetch_sends_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/with-header"))
        .and(header("x-app", "jobhub-test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .header("x-app", "jobhub-test")
        .user_agent("jobhub-test/0.0")
        .build();
    let client = HttpClient::with_config(config);
    let response = client
        .fetch(&format!("{}/with-header", server.uri()), None)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_fetch_connection_error_is_err() {
    // nothing listens on this port
    let client = HttpClient::new();
    let result = client.fetch("http://127.0.0.1:1/unreachable", None).await;
    assert!(result.is_err());
}
