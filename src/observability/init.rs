//! Tracing subscriber setup.

use super::exporter::{self, SCOPE_NAME};
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when `trace_level` is not a valid filter directive.
const FALLBACK_LEVEL: &str = "info";

/// Parses the configured level, falling back to `info` on bad directives.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

/// Installs the global subscriber exporting spans to the plugin data dir.
///
/// Spans go to `/data/covidash-otlp.json` (see [`paths::trace_file`]).
/// Tracing is optional: if the data directory cannot be created nothing is
/// installed, and repeated calls keep the first subscriber.
pub fn init_tracing(config: &Config) {
    if std::fs::create_dir_all(paths::data_dir()).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::create_tracer_provider(paths::trace_file(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let _ = tracing_subscriber::registry()
        .with(env_filter(&config.trace_level))
        .with(otel_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_level_falls_back_to_info() {
        assert_eq!(env_filter("covidash=loud").to_string(), "info");
        assert_eq!(env_filter("debug").to_string(), "debug");
    }
}
