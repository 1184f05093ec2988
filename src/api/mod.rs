//! Remote statistics API.
//!
//! The plugin issues requests through Zellij's `web_request` host call and
//! receives the result later as a `WebRequestResult` event. This module owns
//! the pure half of that exchange: the request context that travels with each
//! call, decoding of the response body, and translation of a finished request
//! into an application [`Event`](crate::app::Event).
//!
//! - `request`: request context tagging (request kind + fetch generation)
//! - `decode`: response payload decoding

pub mod decode;
pub mod request;

pub use decode::decode_summary;
pub use request::{response_event, SummaryRequest, DEFAULT_SUMMARY_URL};
