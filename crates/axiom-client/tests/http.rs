//! `ReqwestTransport` against a local mock server.

mod common;

use std::time::Duration;

use axiom_canonical::{Nonce, TransactionRequest, Value, ValueMap};
use axiom_client::{AxiomClient, ClientConfig, ReqwestTransport, SIGNATURE_HEADER};
use axiom_core::{sign, ApiKey, AxiomError, TransportError};
use chrono::Utc;
use common::response_json;
use wiremock::matchers::{body_bytes, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: format!("{}/v1/", server.uri()),
        timeout_secs: 5,
        ..ClientConfig::default()
    }
}

fn request() -> TransactionRequest {
    let mut params = ValueMap::new();
    params.insert("x".into(), Value::Int(1));
    TransactionRequest::new("predict", params).with_nonce(Nonce::new("n1".into()))
}

#[tokio::test]
async fn execute_posts_signed_body() {
    let server = MockServer::start().await;
    let client = AxiomClient::from_config(&config(&server), ApiKey::new("secret")).unwrap();
    let request = request();
    let signed = client.sign_request(&request).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/execute"))
        .and(header("Authorization", "Bearer secret"))
        .and(header("Content-Type", "application/json"))
        .and(header(SIGNATURE_HEADER, sign(&signed.body, b"secret").as_str()))
        .and(body_bytes(signed.body.clone()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(response_json("n1", "HMAC-SHA256", Utc::now())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client.execute_transaction(&request).await.unwrap();
    assert_eq!(response.proof.nonce, "n1");
}

#[tokio::test]
async fn status_query_uses_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/status/req-1"))
        .and(header_exists("Authorization"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(response_json("n1", "HMAC-SHA256", Utc::now())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = AxiomClient::from_config(&config(&server), ApiKey::new("secret")).unwrap();
    let response = client.query_status("req-1").await.unwrap();
    assert_eq!(response.metadata.region, "eu-west-1");
}

#[tokio::test]
async fn rate_limit_response_maps_to_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = AxiomClient::from_config(&config(&server), ApiKey::new("secret")).unwrap();
    let err = client.execute_transaction(&request()).await.unwrap_err();
    assert!(matches!(err, AxiomError::RateLimitExceeded));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(Duration::from_millis(200)).unwrap();
    let client = AxiomClient::new(&config(&server), ApiKey::new("secret"), transport);
    let err = client.execute_transaction(&request()).await.unwrap_err();
    assert!(matches!(err, AxiomError::NetworkError(TransportError::Timeout)));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let config = ClientConfig {
        base_url: "http://127.0.0.1:1".into(),
        ..ClientConfig::default()
    };
    let client = AxiomClient::from_config(&config, ApiKey::new("secret")).unwrap();
    let err = client.execute_transaction(&request()).await.unwrap_err();
    assert!(matches!(err, AxiomError::NetworkError(_)));
}
