use clap::Parser as _;
use dotenvy::dotenv;
use reconciler::cli::{Cli, Commands, RunCmd, SetupCmd};
use reconciler::core::config::Config;
use reconciler::setup::setup;
use reconciler::types::params::OTELConfig;
use reconciler::utils::instrument::ReconcilerInstrumentation;
use reconciler::utils::logging::init_logging;
use reconciler::worker::initialize_worker;
use reconciler::ReconcilerResult;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[global_allocator]
static A: jemallocator::Jemalloc = jemallocator::Jemalloc;

/// Start the service
#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting reconciler");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => {
            info!("Executing run command");
            match run_reconciler(run_command).await {
                Ok(_) => {
                    info!("Reconciler service stopped cleanly");
                }
                Err(e) => {
                    error!(
                        error = %e,
                        error_chain = ?e,
                        "Failed to run reconciler service"
                    );
                    panic!("Failed to run reconciler service: {}", e);
                }
            }
        }
        Commands::Setup { setup_command } => {
            info!("Executing setup command");
            match setup_reconciler(setup_command).await {
                Ok(_) => {
                    info!("Reconciler setup completed successfully");
                }
                Err(e) => {
                    error!(
                        error = %e,
                        error_chain = ?e,
                        "Failed to setup reconciler"
                    );
                    panic!("Failed to setup reconciler: {}", e);
                }
            }
        }
    }
}

async fn run_reconciler(run_cmd: &RunCmd) -> ReconcilerResult<()> {
    let otel_config = OTELConfig::try_from(run_cmd.instrumentation_args.clone())?;
    let instrumentation = ReconcilerInstrumentation::new(&otel_config)?;
    info!("Starting reconciler service");

    let config = Arc::new(Config::from_run_cmd(run_cmd).await?);
    debug!("Configuration initialized");

    // Initialize workers and keep the controller for shutdown
    let shutdown_token = CancellationToken::new();
    let worker_controller = initialize_worker(config.clone(), shutdown_token.clone()).await?;

    tokio::signal::ctrl_c().await.expect("Failed to listen for ctrl+c");

    // Graceful shutdown for workers
    worker_controller.shutdown().await?;

    // Analytics Shutdown
    instrumentation.shutdown()?;
    info!("Reconciler service shutting down");
    Ok(())
}

/// setup_reconciler - Prepares the database for the provided configuration
async fn setup_reconciler(setup_cmd: &SetupCmd) -> ReconcilerResult<()> {
    setup(setup_cmd).await
}
