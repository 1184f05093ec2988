//! Request tagging and response translation.
//!
//! Zellij hands back the context map passed to `web_request` untouched, so the
//! plugin stores the request kind and the fetch generation there. The
//! generation lets the state machine drop responses that a newer fetch has
//! superseded.

use crate::api::decode::decode_summary;
use crate::app::Event;
use crate::domain::error::CovidashError;
use std::collections::BTreeMap;

/// Endpoint used when the configuration does not override `api_url`.
pub const DEFAULT_SUMMARY_URL: &str = "https://api.covid19api.com/summary";

const REQUEST_KEY: &str = "request";
const GENERATION_KEY: &str = "generation";
const SUMMARY_REQUEST: &str = "summary";

/// An outgoing summary fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRequest {
    pub generation: u64,
}

impl SummaryRequest {
    /// Encodes the request as a `web_request` context map.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (REQUEST_KEY.to_string(), SUMMARY_REQUEST.to_string()),
            (GENERATION_KEY.to_string(), self.generation.to_string()),
        ])
    }

    /// Recovers a summary request from a response context.
    ///
    /// Returns `None` for contexts that belong to other requests.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        if context.get(REQUEST_KEY).map(String::as_str) != Some(SUMMARY_REQUEST) {
            return None;
        }
        let generation = context.get(GENERATION_KEY)?.parse().ok()?;
        Some(Self { generation })
    }
}

/// Translates a finished web request into an application event.
///
/// Returns `None` if the response does not belong to a summary request.
/// Successful statuses decode the body into [`Event::SummaryFetched`]; decode
/// failures and non-2xx statuses produce [`Event::FetchFailed`].
#[must_use]
pub fn response_event(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
    let Some(request) = SummaryRequest::from_context(context) else {
        tracing::debug!(?context, "ignoring response for unknown request");
        return None;
    };

    tracing::debug!(status, generation = request.generation, body_len = body.len(), "summary response");

    let result = if (200..300).contains(&status) {
        decode_summary(body)
    } else {
        Err(CovidashError::Http { status })
    };

    Some(match result {
        Ok(summary) => Event::SummaryFetched {
            generation: request.generation,
            summary: Box::new(summary),
        },
        Err(e) => {
            tracing::warn!(error = %e, generation = request.generation, "summary fetch failed");
            Event::FetchFailed {
                generation: request.generation,
                error: e.to_string(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trips_generation() {
        let context = SummaryRequest { generation: 7 }.to_context();
        assert_eq!(SummaryRequest::from_context(&context), Some(SummaryRequest { generation: 7 }));
    }

    #[test]
    fn foreign_context_is_ignored() {
        let context = BTreeMap::from([("request".to_string(), "other".to_string())]);
        assert!(response_event(200, b"{}", &context).is_none());
    }

    #[test]
    fn error_status_becomes_fetch_failure() {
        let context = SummaryRequest { generation: 3 }.to_context();
        let event = response_event(429, b"", &context);
        assert_eq!(
            event,
            Some(Event::FetchFailed {
                generation: 3,
                error: "HTTP request failed with status 429".to_string(),
            })
        );
    }

    #[test]
    fn ok_status_decodes_summary() {
        let context = SummaryRequest { generation: 1 }.to_context();
        let body = br#"{"Global": {"TotalConfirmed": 4}, "Countries": []}"#;
        match response_event(200, body, &context) {
            Some(Event::SummaryFetched { generation, summary }) => {
                assert_eq!(generation, 1);
                assert_eq!(summary.global.total_confirmed, 4);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
