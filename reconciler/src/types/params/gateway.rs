use crate::cli::gateway::GatewayCliArgs;
use crate::error::ReconcilerError;
use crate::types::params::require_positive;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct GatewayParams {
    pub base_url: Url,
    pub api_key: String,
    /// Per-call timeout on every gateway request
    pub api_timeout: Duration,
    /// Minimum delay between consecutive gateway calls (pacing, not retry)
    pub throttle_delay: Duration,
}

impl TryFrom<&GatewayCliArgs> for GatewayParams {
    type Error = ReconcilerError;

    fn try_from(args: &GatewayCliArgs) -> Result<Self, Self::Error> {
        if args.gateway_api_key.trim().is_empty() {
            return Err(ReconcilerError::ConfigurationInvalid("gateway api key must not be empty".to_string()));
        }
        Ok(Self {
            base_url: args.gateway_base_url.clone(),
            api_key: args.gateway_api_key.clone(),
            api_timeout: Duration::from_millis(require_positive(args.gateway_timeout_ms, "gateway timeout")?),
            throttle_delay: Duration::from_millis(require_positive(args.gateway_throttle_ms, "gateway throttle")?),
        })
    }
}
