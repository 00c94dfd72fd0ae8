//! Tracing initialization and subscriber setup.
//!
//! Configures the tracing subscriber with OpenTelemetry integration, wiring
//! `tracing` macros through to the file-based span exporter.

use super::export;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Level resolution: `config.trace_level` if set, else `"info"`. Creates
/// the data directory if needed and silently skips initialization when that
/// fails; observability is optional. Idempotent: only the first call per
/// process takes effect.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "Bibliofind",
    )]);

    let trace_file = data_dir.join("bibliofind-otlp.json");
    let provider = export::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("Bibliofind");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
