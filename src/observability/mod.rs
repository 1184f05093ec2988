//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → RollingFile
//! ```
//!
//! - Traces are written to `/data/covidash-otlp.json`, one OTLP JSON batch per line
//! - Files rotate at 10 MiB into `.1`, `.2` and `.3` backups
//! - The filter comes from the `trace_level` plugin option (default `info`)
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and tracer provider
//! - [`otlp`]: OTLP JSON document model
//! - [`rolling`]: Size-rotated file writer

mod exporter;
mod init;
mod otlp;
mod rolling;

pub use init::init_tracing;
