use crate::core::client::gateway::pix::PixGatewayClient;
use crate::core::client::gateway::{FeeField, GatewayClient, GatewayError};
use crate::types::order::OrderStatus;
use crate::types::params::gateway::GatewayParams;
use httpmock::prelude::*;
use serde_json::json;
use std::time::{Duration, Instant};
use url::Url;

fn gateway_params(server: &MockServer) -> GatewayParams {
    GatewayParams {
        base_url: Url::parse(&server.base_url()).unwrap(),
        api_key: "test-key".to_string(),
        api_timeout: Duration::from_millis(500),
        throttle_delay: Duration::from_millis(1),
    }
}

#[tokio::test]
async fn paid_charge_is_normalized_at_the_boundary() {
    let server = MockServer::start();
    let charge_mock = server.mock(|when, then| {
        when.method(GET).path("/v1/charges/chg_1").header("authorization", "Bearer test-key");
        then.status(200).json_body(json!({
            "status": "paid_out",
            "amount": 9000,
            "payment": { "fee": 80 },
        }));
    });

    let client = PixGatewayClient::new(&gateway_params(&server)).unwrap();
    let charge = client.query_status("chg_1").await.unwrap();

    assert_eq!(charge.status, OrderStatus::Paid);
    assert_eq!(charge.raw_status, "paid_out");
    assert_eq!(charge.amount, 9000);
    assert_eq!(charge.fee, FeeField::Recognized(80));
    charge_mock.assert();
}

#[tokio::test]
async fn unknown_reference_classifies_as_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/charges/chg_missing");
        then.status(404).json_body(json!({ "error": "charge not found" }));
    });

    let client = PixGatewayClient::new(&gateway_params(&server)).unwrap();
    let error = client.query_status("chg_missing").await.unwrap_err();

    assert!(matches!(error, GatewayError::NotFound));
}

#[tokio::test]
async fn five_xx_classifies_as_server_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/charges/chg_1");
        then.status(503);
    });

    let client = PixGatewayClient::new(&gateway_params(&server)).unwrap();
    let error = client.query_status("chg_1").await.unwrap_err();

    assert!(matches!(error, GatewayError::ServerError { status: 503 }));
}

#[tokio::test]
async fn unexpected_four_xx_is_permanent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/charges/chg_1");
        then.status(401);
    });

    let client = PixGatewayClient::new(&gateway_params(&server)).unwrap();
    let error = client.query_status("chg_1").await.unwrap_err();

    assert!(matches!(error, GatewayError::InvalidResponse(_)));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn slow_gateway_classifies_as_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/charges/chg_slow");
        then.status(200).delay(Duration::from_millis(2000)).json_body(json!({ "status": "paid", "amount": 1 }));
    });

    let mut params = gateway_params(&server);
    params.api_timeout = Duration::from_millis(100);
    let client = PixGatewayClient::new(&params).unwrap();
    let error = client.query_status("chg_slow").await.unwrap_err();

    assert!(matches!(error, GatewayError::Timeout));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn unreachable_gateway_classifies_as_transport() {
    let params = GatewayParams {
        base_url: Url::parse("http://127.0.0.1:1").unwrap(),
        api_key: "test-key".to_string(),
        api_timeout: Duration::from_millis(500),
        throttle_delay: Duration::from_millis(1),
    };

    let client = PixGatewayClient::new(&params).unwrap();
    let error = client.query_status("chg_1").await.unwrap_err();

    assert!(matches!(error, GatewayError::Transport(_)));
    assert!(error.is_retryable());
}

/// The throttle is pacing between every pair of consecutive calls, so two
/// back-to-back queries never start closer than the configured delay.
#[tokio::test]
async fn consecutive_calls_are_paced_by_the_throttle() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/charges/chg_1");
        then.status(200).json_body(json!({ "status": "paid", "amount": 1 }));
    });

    let mut params = gateway_params(&server);
    params.throttle_delay = Duration::from_millis(200);
    let client = PixGatewayClient::new(&params).unwrap();

    let started = Instant::now();
    client.query_status("chg_1").await.unwrap();
    client.query_status("chg_1").await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(200));
}
