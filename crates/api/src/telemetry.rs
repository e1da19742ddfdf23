//! Logging and metrics setup

use crate::settings::{LogFormat, Settings};
use inference_engine::CareerOutlook;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::error::Error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(settings: &Settings) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}

/// Install the global Prometheus recorder
pub fn install_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

pub(crate) fn record_prediction(outlook: CareerOutlook, latency_us: u64) {
    metrics::counter!("career_predictions_total", "outcome" => outlook.as_str()).increment(1);
    metrics::histogram!("career_prediction_latency_seconds").record(latency_us as f64 / 1e6);
}

pub(crate) fn record_failure(kind: &'static str) {
    metrics::counter!("career_prediction_errors_total", "kind" => kind).increment(1);
}
