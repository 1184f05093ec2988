//! OpenTelemetry span exporter writing OTLP JSON lines to a rolling file.

use super::otlp::ExportTraceRequest;
use super::rolling::RollingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Instrumentation scope recorded on every exported batch.
pub const SCOPE_NAME: &str = "covidash";

/// Writes each exported batch as one OTLP JSON line.
#[derive(Debug)]
struct OtlpFileExporter {
    file: RollingFile,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl OtlpFileExporter {
    const fn new(file: RollingFile, resource: Resource) -> Self {
        Self {
            file,
            resource,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        let request = ExportTraceRequest::new(&self.resource, SCOPE_NAME, batch);
        let line = serde_json::to_string(&request).map_err(|e| TraceError::from(e.to_string()))?;
        self.file
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown.load(Ordering::SeqCst) {
            Err(TraceError::from("exporter is shut down"))
        } else {
            self.write_batch(&batch)
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider exporting every finished span to `file_path`.
///
/// Spans are exported synchronously as they end; Zellij plugins have no async
/// runtime to drive a batch processor.
#[must_use]
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter::new(RollingFile::new(file_path), resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("covidash-otlp.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "covidash")]);
        let provider = create_tracer_provider(path.clone(), resource);

        provider.tracer("covidash").in_span("fetch_summary", |_cx| {});
        let _ = provider.force_flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().last().unwrap();
        let json: serde_json::Value = serde_json::from_str(line).unwrap();
        let span = &json["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert_eq!(span["name"], "fetch_summary");
        assert_eq!(span["traceId"].as_str().unwrap().len(), 32);
        assert_eq!(span["parentSpanId"], "");
    }

    #[test]
    fn shut_down_exporter_rejects_batches() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = OtlpFileExporter::new(
            RollingFile::new(dir.path().join("trace.json")),
            Resource::empty(),
        );
        exporter.shutdown();
        let result = futures_util::FutureExt::now_or_never(exporter.export(vec![]));
        assert!(matches!(result, Some(Err(_))));
    }
}
