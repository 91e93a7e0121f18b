use crate::cli::instrumentation::InstrumentationCliArgs;
use crate::error::ReconcilerError;
use url::Url;

#[derive(Debug, Clone)]
pub struct OTELConfig {
    pub endpoint: Option<Url>,
    pub service_name: String,
}

impl TryFrom<InstrumentationCliArgs> for OTELConfig {
    type Error = ReconcilerError;

    fn try_from(args: InstrumentationCliArgs) -> Result<Self, Self::Error> {
        if args.otel_service_name.trim().is_empty() {
            return Err(ReconcilerError::ConfigurationInvalid("otel service name must not be empty".to_string()));
        }
        Ok(Self { endpoint: args.otel_collector_endpoint, service_name: args.otel_service_name })
    }
}
