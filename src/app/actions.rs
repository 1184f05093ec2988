//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler is pure: it mutates [`AppState`](crate::app::AppState)
//! and returns a `Vec<Action>` that the plugin shim turns into Zellij host
//! calls (`web_request`, `set_timeout`, `post_message_to`, `hide_self`).

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Requests the statistics summary.
    FetchSummary {
        /// Endpoint to query.
        url: String,
        /// Fetch generation, echoed back in the response context.
        generation: u64,
    },

    /// Schedules a `Timer` event after the given delay.
    ///
    /// Used for search debouncing.
    SetTimeout {
        /// Delay in milliseconds.
        millis: u64,
    },

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),
}
