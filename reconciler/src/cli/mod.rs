use clap::{Parser, Subcommand};

pub mod database;
pub mod gateway;
pub mod instrumentation;
pub mod service;

#[derive(Parser, Debug)]
#[command(
    name = "reconciler",
    about = "PIX order reconciliation - corrects local order status against the billing gateway",
    long_about = "Reconciles locally recorded orders against the PIX billing gateway's \
    authoritative charge status on a fixed schedule.\n\n\
    Quick Start:\n  \
    reconciler setup\n  \
    reconciler run"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the reconciliation service
    #[command(long_about = "Start the scheduled reconciliation and audit-purge workers.\n\n\
        All tunables are validated before the first cycle may run.")]
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
    /// Prepare the database for the service
    #[command(long_about = "Create the MongoDB indexes used by batch selection and audit retention.")]
    Setup {
        #[command(flatten)]
        setup_command: Box<SetupCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct RunCmd {
    #[clap(flatten)]
    pub mongodb_args: database::MongoDBCliArgs,

    #[clap(flatten)]
    pub gateway_args: gateway::GatewayCliArgs,

    #[clap(flatten)]
    pub service_args: service::ServiceCliArgs,

    #[clap(flatten)]
    pub instrumentation_args: instrumentation::InstrumentationCliArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct SetupCmd {
    #[clap(flatten)]
    pub mongodb_args: database::MongoDBCliArgs,
}
