use crate::core::client::lock::LockResult;
use crate::core::config::Config;
use crate::types::constant::RECONCILIATION_LOCK_KEY;
use crate::types::outcome::OutcomeKind;
use crate::utils::metrics::RECONCILER_METRICS;
use crate::worker::event_handler::service::ReconciliationService;
use crate::worker::event_handler::triggers::JobTrigger;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{error, info, instrument, trace, warn};

pub struct ReconciliationTrigger;

/// Per-kind outcome counts for one cycle, logged at completion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub selected: u64,
    pub updated: u64,
    pub unchanged: u64,
    pub failed: u64,
    pub conflict: u64,
    pub amount_mismatch: u64,
    pub skipped: u64,
    /// Orders left unprocessed because the execution budget ran out
    pub not_started: u64,
}

impl CycleSummary {
    pub fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Updated => self.updated += 1,
            OutcomeKind::Unchanged => self.unchanged += 1,
            OutcomeKind::Failed => self.failed += 1,
            OutcomeKind::Conflict => self.conflict += 1,
            OutcomeKind::AmountMismatch => self.amount_mismatch += 1,
            OutcomeKind::Skipped => self.skipped += 1,
        }
    }
}

#[async_trait::async_trait]
impl JobTrigger for ReconciliationTrigger {
    /// 1. Take the cluster-wide lease, or skip the whole cycle
    /// 2. Select a bounded batch of aged pending orders
    /// 3. Reconcile each order sequentially under the execution budget
    /// 4. Release the lease
    #[instrument(skip_all, fields(category = "ReconciliationWorker"), err)]
    async fn run_worker(&self, config: Arc<Config>) -> color_eyre::Result<()> {
        info!(log_type = "starting", "ReconciliationWorker started");
        let params = config.service_params();

        match config.lock().try_acquire(RECONCILIATION_LOCK_KEY, config.instance_id(), params.lock_lease).await {
            Ok(LockResult::Acquired) => {
                info!("ReconciliationWorker acquired lock");
            }
            Ok(LockResult::Busy { holder }) => {
                // Another instance is mid-cycle; not an error condition.
                info!(holder, "ReconciliationWorker lease is busy, skipping cycle");
                RECONCILER_METRICS.cycles_skipped.add(1, &[KeyValue::new("reason", "lock-busy")]);
                return Ok(());
            }
            Ok(other) => {
                warn!(result = ?other, "Unexpected lock acquisition result, skipping cycle");
                RECONCILER_METRICS.cycles_skipped.add(1, &[KeyValue::new("reason", "lock-unexpected")]);
                return Ok(());
            }
            Err(err) => {
                // Transient lock storage failure: skip this cycle, never
                // crash the scheduler. The next tick retries independently.
                warn!(error = %err, "Lease acquisition failed, skipping cycle");
                RECONCILER_METRICS.cycles_skipped.add(1, &[KeyValue::new("reason", "lock-error")]);
                return Ok(());
            }
        }

        let result = self.run_cycle(&config).await;

        // Always release the lease, whatever the cycle did.
        if let Err(e) = config.lock().release(RECONCILIATION_LOCK_KEY, config.instance_id()).await {
            error!(error = %e, "Failed to release ReconciliationWorker lease");
            if result.is_ok() {
                return Err(e.into());
            }
        }

        result.map(|_| ())
    }
}

impl ReconciliationTrigger {
    async fn run_cycle(&self, config: &Arc<Config>) -> color_eyre::Result<CycleSummary> {
        let params = config.service_params();
        let started = Instant::now();
        // Cooperative budget: checked between orders, so an in-flight
        // retry sequence is never interrupted beyond its own timeouts.
        let deadline = started + params.execution_timeout;

        let orders = config
            .database()
            .get_pending_orders(params.batch_size, params.min_pending_age, params.max_pending_age)
            .await?;
        RECONCILER_METRICS.orders_selected.add(orders.len() as u64, &[]);

        let mut summary = CycleSummary { selected: orders.len() as u64, ..Default::default() };

        for (index, order) in orders.iter().enumerate() {
            if Instant::now() >= deadline {
                summary.not_started = (orders.len() - index) as u64;
                warn!(remaining = summary.not_started, "Execution budget exhausted, stopping cycle early");
                break;
            }

            let outcome = ReconciliationService::reconcile_one(config, order).await;
            summary.record(outcome.kind);
            RECONCILER_METRICS.reconciliation_outcomes.add(1, &[KeyValue::new("kind", outcome.kind.to_string())]);

            // Audit-write failures are isolated per order, like every other
            // per-order failure.
            if let Err(error) = config.database().create_outcome(outcome).await {
                error!(order_id = %order.id, error = %error, "Failed to record reconciliation outcome");
            }
        }

        RECONCILER_METRICS.cycle_duration.record(started.elapsed().as_secs_f64(), &[]);
        info!(summary = ?summary, log_type = "completed", "ReconciliationWorker completed");
        trace!(duration_ms = started.elapsed().as_millis() as u64, "Cycle timing");
        Ok(summary)
    }
}
