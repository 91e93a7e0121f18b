use crate::core::config::Config;
use crate::error::{ReconcilerError, ReconcilerResult};
use crate::worker::event_handler::triggers::audit_purge::AuditPurgeTrigger;
use crate::worker::event_handler::triggers::reconciliation::ReconciliationTrigger;
use crate::worker::event_handler::triggers::JobTrigger;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, Instrument};

/// Drives every trigger on its own fixed interval under a shared
/// cancellation token. Trigger failures are logged and the loop carries
/// on; the next tick is an independent retry.
pub struct WorkerController {
    config: Arc<Config>,
    cancellation_token: CancellationToken,
    tasks: JoinSet<()>,
}

impl WorkerController {
    /// new - Create a new WorkerController
    /// # Arguments
    /// * `config` - The configuration for the workers
    /// * `cancellation_token` - Token for coordinated shutdown
    pub fn new(config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self { config, cancellation_token, tasks: JoinSet::new() }
    }

    /// start - Spawn one interval loop per trigger.
    pub async fn start(&mut self) -> ReconcilerResult<()> {
        let params = self.config.service_params();
        let schedule: Vec<(Arc<dyn JobTrigger>, Duration, &'static str)> = vec![
            (Arc::new(ReconciliationTrigger), params.cycle_interval, "reconciliation"),
            (Arc::new(AuditPurgeTrigger), params.purge_interval, "audit_purge"),
        ];

        for (trigger, period, name) in schedule {
            let config = self.config.clone();
            let token = self.cancellation_token.child_token();
            let span = info_span!("worker_loop", worker = name);

            self.tasks.spawn(
                async move {
                    let mut interval = tokio::time::interval(period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    info!(period_s = period.as_secs(), "Worker loop started");

                    loop {
                        tokio::select! {
                            _ = token.cancelled() => {
                                info!("Worker loop shutting down");
                                break;
                            }
                            _ = interval.tick() => {
                                if let Err(e) = trigger.run_worker(config.clone()).await {
                                    error!(error = %e, error_chain = ?e, "Worker run failed");
                                }
                            }
                        }
                    }
                }
                .instrument(span),
            );
        }

        Ok(())
    }

    /// shutdown - Cancel every worker loop and wait for them to drain.
    pub async fn shutdown(mut self) -> ReconcilerResult<()> {
        info!("Shutting down worker controller");
        self.cancellation_token.cancel();
        while let Some(result) = self.tasks.join_next().await {
            result.map_err(|e| ReconcilerError::WorkerError(format!("worker task panicked: {}", e)))?;
        }
        info!("Worker controller stopped");
        Ok(())
    }
}
