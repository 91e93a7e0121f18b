use crate::core::client::gateway::{GatewayCharge, GatewayError};
use crate::core::config::Config;
use crate::types::order::Order;
use crate::types::outcome::{OutcomeKind, ReconciliationOutcome};
use std::time::Duration;
use tracing::{debug, warn};

/// Per-order reconciliation: compare local state against the gateway's
/// ground truth and compute the required local update, if any. Every
/// failure path is converted into an audit outcome here - nothing a
/// single order does can abort the rest of the batch.
pub struct ReconciliationService;

impl ReconciliationService {
    /// reconcile_one - Reconcile a single order against the gateway.
    pub async fn reconcile_one(config: &Config, order: &Order) -> ReconciliationOutcome {
        let Some(reference) = order.payment_reference.as_deref() else {
            // Never submitted for payment; nothing to ask the gateway.
            debug!(order_id = %order.id, "Order carries no payment reference, skipping");
            return ReconciliationOutcome::new(order, OutcomeKind::Skipped, 0).with_error_kind("no-reference");
        };

        let (charge, attempts) = match Self::query_with_retry(config, reference).await {
            Ok(success) => success,
            Err((error, attempts)) => {
                warn!(order_id = %order.id, attempts, error = %error, "Gateway lookup failed, leaving order untouched");
                return ReconciliationOutcome::new(order, OutcomeKind::Failed, attempts)
                    .with_error_kind(error.kind());
            }
        };

        Self::apply_charge(config, order, &charge, attempts).await
    }

    /// Query the gateway with bounded retries. Only transient
    /// classifications are retried; the backoff grows exponentially per
    /// attempt. Returns the number of calls actually made alongside the
    /// result.
    async fn query_with_retry(config: &Config, reference: &str) -> Result<(GatewayCharge, u64), (GatewayError, u64)> {
        let params = config.service_params();
        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            match config.gateway().query_status(reference).await {
                Ok(charge) => return Ok((charge, attempt)),
                Err(error) if error.is_retryable() && attempt < params.max_retries => {
                    let delay = Self::backoff_delay(params.retry_delay, params.backoff_multiplier, attempt);
                    let delay_ms = delay.as_millis() as u64;
                    debug!(reference, attempt, delay_ms, error = %error, "Retrying gateway lookup");
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err((error, attempt)),
            }
        }
    }

    /// Delay before the retry following `attempt` completed calls:
    /// `retry_delay * backoff_multiplier^attempt`. The exponent is capped
    /// so a misconfigured multiplier cannot overflow the duration.
    fn backoff_delay(base: Duration, multiplier: f64, attempt: u64) -> Duration {
        base.mul_f64(multiplier.powi(attempt.min(16) as i32))
    }

    /// Decide the local update for a successfully fetched charge.
    async fn apply_charge(
        config: &Config,
        order: &Order,
        charge: &GatewayCharge,
        attempts: u64,
    ) -> ReconciliationOutcome {
        let params = config.service_params();
        let amount_matches = Self::amount_within_tolerance(order.amount, charge.amount, params.amount_tolerance);

        let outcome = if charge.status == order.status {
            // Gateway agrees; write nothing so updated_at stays put.
            ReconciliationOutcome::new(order, OutcomeKind::Unchanged, attempts)
        } else if order.status.is_terminal() {
            // Never regress or silently rewrite a terminal status. The
            // disagreeing gateway status is surfaced for external review.
            warn!(
                order_id = %order.id,
                local_status = %order.status,
                gateway_status = %charge.status,
                raw_status = %charge.raw_status,
                "Terminal status disagrees with gateway, flagging conflict"
            );
            ReconciliationOutcome::new(order, OutcomeKind::Conflict, attempts).with_new_status(charge.status)
        } else {
            match config.database().update_order_status(order, charge.status).await {
                Ok(_) => ReconciliationOutcome::new(order, OutcomeKind::Updated, attempts)
                    .with_new_status(charge.status),
                Err(error) => {
                    warn!(order_id = %order.id, error = %error, "Status write failed, order left untouched");
                    return ReconciliationOutcome::new(order, OutcomeKind::Failed, attempts)
                        .with_error_kind("database");
                }
            }
        };

        if amount_matches {
            outcome
        } else {
            // The mismatch takes precedence in the recorded kind so it is
            // never masked by a routine update; the status decision above
            // has already been applied.
            warn!(
                order_id = %order.id,
                expected = order.amount,
                charged = charge.amount,
                "Charged amount deviates beyond tolerance"
            );
            ReconciliationOutcome { kind: OutcomeKind::AmountMismatch, ..outcome }
        }
    }

    /// Allowed deviation is a fraction of the order amount; exact equality
    /// always passes, including at zero tolerance.
    fn amount_within_tolerance(expected: i64, charged: i64, tolerance: f64) -> bool {
        let deviation = (charged as i128 - expected as i128).unsigned_abs() as f64;
        deviation <= expected.unsigned_abs() as f64 * tolerance
    }
}
