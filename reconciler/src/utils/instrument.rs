use crate::error::{ReconcilerError, ReconcilerResult};
use crate::types::params::OTELConfig;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::{ExportConfig, WithExportConfig};
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::{runtime, Resource};
use std::time::Duration;
use tracing::warn;
use url::Url;

const METRICS_EXPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Instrumentation for the reconciler.
///
/// Metrics-only: the counters and histograms in
/// [`crate::utils::metrics::RECONCILER_METRICS`] are exported over OTLP
/// when an endpoint is configured, and silently dropped otherwise.
pub struct ReconcilerInstrumentation {
    pub otel_config: OTELConfig,
    pub meter_provider: Option<SdkMeterProvider>,
}

impl ReconcilerInstrumentation {
    pub fn new(config: &OTELConfig) -> ReconcilerResult<Self> {
        match config.endpoint {
            None => {
                warn!("OTEL endpoint is not set. Skipping instrumentation.");
                Ok(Self { otel_config: config.clone(), meter_provider: None })
            }
            Some(ref endpoint) => {
                let meter_provider = Self::instrument_metric_provider(config, endpoint)?;
                Ok(Self { otel_config: config.clone(), meter_provider: Some(meter_provider) })
            }
        }
    }

    fn instrument_metric_provider(config: &OTELConfig, endpoint: &Url) -> ReconcilerResult<SdkMeterProvider> {
        let export_config = ExportConfig { endpoint: endpoint.to_string(), ..ExportConfig::default() };

        let provider = opentelemetry_otlp::new_pipeline()
            .metrics(runtime::Tokio)
            .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_export_config(export_config))
            .with_period(METRICS_EXPORT_INTERVAL)
            .with_resource(Resource::new(vec![KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                format!("{}{}", config.service_name, "_meter_service"),
            )]))
            .build()
            .map_err(|e| ReconcilerError::MetricsError(e.to_string()))?;

        global::set_meter_provider(provider.clone());
        Ok(provider)
    }

    pub fn shutdown(&self) -> ReconcilerResult<()> {
        match self.meter_provider {
            Some(ref meter_provider) => {
                meter_provider.shutdown().map_err(|e| ReconcilerError::MetricsError(e.to_string()))
            }
            None => {
                warn!("OTEL endpoint is not set. Skipping shutdown.");
                Ok(())
            }
        }
    }
}
