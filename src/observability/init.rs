//! Tracing subscriber setup.

use super::exporter::{self, SCOPE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "notehub-otlp.json";

/// Installs the global subscriber: an [`EnvFilter`] feeding an OpenTelemetry
/// layer that exports to `<data dir>/notehub-otlp.json`.
///
/// The filter comes from `config.trace_level` and defaults to `"info"`.
/// Nothing is written to the terminal. If the data directory cannot be
/// created tracing stays off; a second call is a no-op.
///
/// # Example
///
/// ```rust,no_run
/// use notehub::observability::init_tracing;
/// use notehub::Config;
///
/// init_tracing(&Config::default());
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());

    let Some(data_dir) = crate::infrastructure::paths::data_dir() else {
        return;
    };
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SCOPE_NAME)]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);

    let tracer = provider.tracer(SCOPE_NAME);
    opentelemetry::global::set_tracer_provider(provider);
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
