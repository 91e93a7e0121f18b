use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct InstrumentationCliArgs {
    /// OTLP collector endpoint. Metrics export is skipped when unset.
    #[arg(env = "PIX_RECONCILER_OTEL_COLLECTOR_ENDPOINT", long)]
    pub otel_collector_endpoint: Option<Url>,

    /// Service name attached to exported metrics
    #[arg(env = "PIX_RECONCILER_OTEL_SERVICE_NAME", long, default_value = "pix-reconciler")]
    pub otel_service_name: String,
}
