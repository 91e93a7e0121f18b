pub mod controller;
pub mod event_handler;

use crate::core::config::Config;
use crate::ReconcilerResult;
use controller::WorkerController;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Initializes the workers with the provided configuration
///
/// It starts all worker loops in the background and returns the
/// controller for shutdown management.
///
/// # Arguments
/// * `config` - The configuration for the workers
/// * `shutdown_token` - A cancellation token to signal application shutdown
///
/// # Returns
/// * `ReconcilerResult<WorkerController>` - The worker controller
pub async fn initialize_worker(
    config: Arc<Config>,
    shutdown_token: CancellationToken,
) -> ReconcilerResult<WorkerController> {
    info!("Initializing workers");

    let mut controller = WorkerController::new(config, shutdown_token);
    controller.start().await?;

    info!("Workers initialized and started successfully");
    Ok(controller)
}
