//! Sort worker implementation.
//!
//! Sorting the country list is the only work the plugin defers off its main
//! thread. The worker is stateless: every request carries the list to sort and
//! every response echoes the request generation.
//!
//! The Zellij `ZellijWorker` impl lives in the plugin binary; this type exposes
//! the payload-level entry point it delegates to.

use crate::domain::error::{CovidashError, Result};
use crate::listing::sort_countries;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};

/// Worker thread state.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CovidashWorker {
    /// Number of messages handled since the worker started.
    #[serde(skip)]
    handled: u64,
}

impl CovidashWorker {
    /// Processes a worker message and returns the response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", handled = self.handled);
        let _guard = span.entered();
        self.handled += 1;

        match message {
            WorkerMessage::SortCountries {
                generation,
                key,
                order,
                countries,
                ..
            } => {
                let count = countries.len();
                let countries = sort_countries(countries, key, order);
                tracing::debug!(generation, count, key = ?key, order = ?order, "sort complete");
                WorkerResponse::CountriesSorted { generation, countries }
            }
        }
    }

    /// Decodes a JSON payload, handles it, and encodes the response.
    ///
    /// Malformed payloads produce a serialized [`WorkerResponse::Error`] so
    /// the plugin learns about the failure instead of waiting forever.
    ///
    /// # Errors
    ///
    /// Returns [`CovidashError::Worker`] if the response cannot be serialized.
    pub fn handle_payload(&mut self, payload: &str) -> Result<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("malformed worker message: {e}"),
                }
            }
        };

        serde_json::to_string(&response)
            .map_err(|e| CovidashError::Worker(format!("failed to serialize response: {e}")))
    }

    /// Attaches the parent trace context carried by a message to this thread.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}
