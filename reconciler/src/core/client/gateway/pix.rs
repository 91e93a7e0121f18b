use super::error::GatewayError;
use super::{FeeField, GatewayCharge, GatewayClient};
use crate::types::order::OrderStatus;
use crate::types::params::gateway::GatewayParams;
use crate::utils::metrics::RECONCILER_METRICS;
use async_trait::async_trait;
use opentelemetry::KeyValue;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// REST client for the PIX billing gateway.
///
/// Every call is paced: a fixed minimum delay is enforced between
/// consecutive outbound requests, including retries, so a batch never
/// exceeds the upstream rate limit. The per-call timeout lives on the
/// underlying HTTP client.
pub struct PixGatewayClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    throttle_delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl PixGatewayClient {
    pub fn new(params: &GatewayParams) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(params.api_timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: params.base_url.as_str().trim_end_matches('/').to_string(),
            api_key: params.api_key.clone(),
            throttle_delay: params.throttle_delay,
            last_call: Mutex::new(None),
        })
    }

    /// Sleep until the throttle window since the previous call has
    /// passed, then claim the current slot.
    async fn pace(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(last) = *last_call {
            tokio::time::sleep_until(last + self.throttle_delay).await;
        }
        *last_call = Some(Instant::now());
    }

    fn classify_transport(error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl GatewayClient for PixGatewayClient {
    async fn query_status(&self, payment_reference: &str) -> Result<GatewayCharge, GatewayError> {
        self.pace().await;

        let url = format!("{}/v1/charges/{}", self.base_url, payment_reference);
        let start = Instant::now();
        let result = self.client.get(&url).bearer_auth(&self.api_key).send().await;
        RECONCILER_METRICS
            .gateway_response_time
            .record(start.elapsed().as_secs_f64(), &[KeyValue::new("call", "query_status")]);

        let response = result.map_err(Self::classify_transport)?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Err(GatewayError::NotFound);
        }
        if status.is_server_error() {
            return Err(GatewayError::ServerError { status: status.as_u16() });
        }
        if !status.is_success() {
            return Err(GatewayError::InvalidResponse(format!("unexpected status {}", status.as_u16())));
        }

        let payload: Value = response.json().await.map_err(Self::classify_transport)?;
        debug!(payment_reference, "Gateway charge fetched");
        normalize_charge(payload)
    }
}

/// Fixed mapping from the gateway's status vocabulary to the local one.
/// Unknown strings deliberately map to `Pending` - the reconciler then
/// leaves the order alone until the gateway settles.
pub fn normalize_status(raw: &str) -> OrderStatus {
    match raw {
        "confirmed" | "paid" | "paid_out" | "received" => OrderStatus::Paid,
        "refunded" | "cancelled" => OrderStatus::Cancelled,
        "expired" => OrderStatus::Expired,
        _ => OrderStatus::Pending,
    }
}

/// Fee lookup over the gateway's historically unstable payload shapes.
/// The priority order is load-bearing: newer shapes first.
pub fn extract_fee(payload: &Value) -> FeeField {
    let candidates = [
        payload.pointer("/payment/fee"),
        payload.pointer("/data/payment/fee"),
        payload.pointer("/fee"),
    ];
    for candidate in candidates.into_iter().flatten() {
        if let Some(fee) = candidate.as_i64() {
            return FeeField::Recognized(fee);
        }
    }
    FeeField::Unrecognized
}

/// Normalize a raw gateway payload into a [`GatewayCharge`]. Status and
/// amount are read from the top level with a fallback under `data`, the
/// same two shapes the gateway has shipped over time.
pub fn normalize_charge(payload: Value) -> Result<GatewayCharge, GatewayError> {
    let raw_status = payload
        .pointer("/status")
        .or_else(|| payload.pointer("/data/status"))
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::InvalidResponse("payload carries no status field".to_string()))?
        .to_string();

    let amount = payload
        .pointer("/amount")
        .or_else(|| payload.pointer("/data/amount"))
        .and_then(Value::as_i64)
        .ok_or_else(|| GatewayError::InvalidResponse("payload carries no integer amount field".to_string()))?;

    Ok(GatewayCharge {
        status: normalize_status(&raw_status),
        fee: extract_fee(&payload),
        amount,
        raw_status,
        raw_payload: payload,
    })
}
