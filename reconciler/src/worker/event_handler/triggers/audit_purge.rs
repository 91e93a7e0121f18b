use crate::core::client::lock::LockResult;
use crate::core::config::Config;
use crate::types::constant::AUDIT_PURGE_LOCK_KEY;
use crate::utils::metrics::RECONCILER_METRICS;
use crate::worker::event_handler::triggers::JobTrigger;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Lease duration for the purge run (5 minutes)
const PURGE_LOCK_LEASE: Duration = Duration::from_secs(300);

/// Removes reconciliation outcomes older than the retention window.
/// Deliberately its own trigger so retention never sits on the hot path
/// of the reconciliation cycle.
pub struct AuditPurgeTrigger;

#[async_trait]
impl JobTrigger for AuditPurgeTrigger {
    async fn run_worker(&self, config: Arc<Config>) -> color_eyre::Result<()> {
        match config.lock().try_acquire(AUDIT_PURGE_LOCK_KEY, config.instance_id(), PURGE_LOCK_LEASE).await {
            Ok(LockResult::Acquired) => {
                debug!("{} acquired lock", AUDIT_PURGE_LOCK_KEY);
            }
            Ok(_) => {
                debug!("{} lease is busy, returning safely", AUDIT_PURGE_LOCK_KEY);
                return Ok(());
            }
            Err(err) => {
                debug!("{} failed to acquire lock, returning safely: {}", AUDIT_PURGE_LOCK_KEY, err);
                return Ok(());
            }
        }

        let result = self.purge(&config).await;

        // Always release the lock
        if let Err(e) = config.lock().release(AUDIT_PURGE_LOCK_KEY, config.instance_id()).await {
            error!("Failed to release {} lock: {}", AUDIT_PURGE_LOCK_KEY, e);
            if result.is_ok() {
                return Err(e.into());
            }
        }

        result
    }
}

impl AuditPurgeTrigger {
    async fn purge(&self, config: &Arc<Config>) -> color_eyre::Result<()> {
        let retention_days = config.service_params().audit_retention_days;
        let purged = config.database().purge_outcomes_older_than(retention_days).await?;
        RECONCILER_METRICS.outcomes_purged.add(purged, &[]);
        info!(purged, retention_days, "Audit purge completed");
        Ok(())
    }
}
