//! Worker thread message types for cross-thread communication.
//!
//! Defines the request/response protocol between the plugin thread and the
//! background sort worker, plus trace context propagation so worker spans are
//! parented to the plugin span that issued the request.

use crate::domain::{Country, SortKey, SortOrder};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid, which is the case in unit tests.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Messages sent from the plugin thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Sort a filtered country list.
    ///
    /// The generation is echoed back so the plugin can discard results of
    /// sorts that a newer interaction has superseded.
    SortCountries {
        generation: u64,
        key: SortKey,
        order: SortOrder,
        countries: Vec<Country>,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `SortCountries` message carrying the current trace context.
    #[must_use]
    pub fn sort_countries(generation: u64, key: SortKey, order: SortOrder, countries: Vec<Country>) -> Self {
        Self::SortCountries {
            generation,
            key,
            order,
            countries,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Trace context attached to the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::SortCountries { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A sort finished.
    CountriesSorted {
        /// Generation of the `SortCountries` request this answers.
        generation: u64,
        /// Sorted countries; empty when the request carried no sort.
        countries: Vec<Country>,
    },

    /// The worker could not process a message.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
