use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct GatewayCliArgs {
    /// Base URL of the PIX billing gateway API
    #[arg(env = "PIX_RECONCILER_GATEWAY_BASE_URL", long)]
    pub gateway_base_url: Url,

    /// API key sent on every gateway request
    #[arg(env = "PIX_RECONCILER_GATEWAY_API_KEY", long)]
    pub gateway_api_key: String,

    /// Per-call timeout for gateway requests, in milliseconds
    #[arg(env = "PIX_RECONCILER_GATEWAY_TIMEOUT_MS", long, default_value = "10000")]
    pub gateway_timeout_ms: u64,

    /// Minimum delay between consecutive gateway calls, in milliseconds.
    /// This is pacing against the upstream rate limit, applied between
    /// every call regardless of outcome - not a retry delay.
    #[arg(env = "PIX_RECONCILER_GATEWAY_THROTTLE_MS", long, default_value = "500")]
    pub gateway_throttle_ms: u64,
}
