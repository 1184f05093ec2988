//! Event handling and state transition logic.
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime, the HTTP layer or the worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! The returned flag tells the plugin whether the screen needs a re-render.

use crate::app::modes::{FetchStatus, InputMode, Screen};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{SortKey, Summary};
use crate::worker::WorkerResponse;

/// Events triggered by user input, HTTP responses, timers or the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor down (Countries screen).
    KeyDown,
    /// Moves the cursor up (Countries screen).
    KeyUp,
    /// Opens the Countries screen from Home.
    Confirm,
    /// Returns to Home from the Countries screen.
    Back,
    /// Hides the plugin pane.
    CloseFocus,
    /// Focuses the search input (Countries screen).
    SearchMode,
    /// Applies the typed keyword immediately and leaves the input.
    SubmitSearch,
    /// Clears the keyword and leaves the input.
    ExitSearch,
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character from the search input.
    Backspace,
    /// Presses a sort button (Countries screen).
    Sort(SortKey),
    /// Re-fetches the summary.
    Refresh,

    /// Web access was granted; the first fetch can start.
    PermissionsGranted,
    /// Web access was refused.
    PermissionsDenied,

    /// A debounce timer fired.
    Timer,

    /// A summary response arrived.
    SummaryFetched {
        /// Generation of the request that produced it.
        generation: u64,
        summary: Box<Summary>,
    },

    /// A summary request failed.
    FetchFailed {
        /// Generation of the request that failed.
        generation: u64,
        error: String,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for handlers that touch
/// fallible state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind::from(event)).entered();

    match event {
        Event::KeyDown | Event::KeyUp if state.screen != Screen::Countries => Ok((false, vec![])),
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Confirm => {
            if state.screen == Screen::Countries || state.summary.is_none() {
                return Ok((false, vec![]));
            }
            tracing::debug!("opening countries screen");
            state.screen = Screen::Countries;
            Ok((true, vec![]))
        }
        Event::Back => {
            if state.screen == Screen::Home {
                return Ok((false, vec![]));
            }
            state.screen = Screen::Home;
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            if state.screen != Screen::Countries || state.summary.is_none() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            state.input_mode = InputMode::Normal;
            state.debouncer.flush();
            let keyword = state.search_input.clone();
            state.apply_search(&keyword);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_input, "clearing search");
            state.input_mode = InputMode::Normal;
            state.debouncer.flush();
            state.search_input.clear();
            state.apply_search("");
            Ok((true, vec![]))
        }
        Event::Char(_) | Event::Backspace if state.input_mode != InputMode::Search => {
            Ok((false, vec![]))
        }
        Event::Char(_) | Event::Backspace if state.is_sorting => {
            tracing::debug!("search input ignored while sorting");
            Ok((false, vec![]))
        }
        Event::Char(c) => {
            state.search_input.push(*c);
            tracing::trace!(query = %state.search_input, char = %c, "search input updated");
            let millis = state.debouncer.schedule();
            Ok((true, vec![Action::SetTimeout { millis }]))
        }
        Event::Backspace => {
            if state.search_input.pop().is_none() {
                return Ok((false, vec![]));
            }
            let millis = state.debouncer.schedule();
            Ok((true, vec![Action::SetTimeout { millis }]))
        }
        Event::Sort(key) => {
            if state.screen != Screen::Countries || state.summary.is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, state.toggle_sort(*key)))
        }
        Event::Refresh | Event::PermissionsGranted => Ok((true, vec![state.begin_fetch()])),
        Event::PermissionsDenied => {
            tracing::warn!("web access permission denied");
            state.fetch_status =
                FetchStatus::Failed("Web access permission denied".to_string());
            Ok((true, vec![]))
        }
        Event::Timer => {
            if !state.debouncer.on_timer() {
                return Ok((false, vec![]));
            }
            let keyword = state.search_input.clone();
            state.apply_search(&keyword);
            tracing::debug!(keyword = %keyword, "debounced search applied");
            Ok((true, vec![]))
        }
        Event::SummaryFetched { generation, summary } => {
            if *generation != state.fetch_generation {
                tracing::debug!(
                    generation,
                    current = state.fetch_generation,
                    "discarding stale summary"
                );
                return Ok((false, vec![]));
            }
            tracing::info!(countries = summary.countries.len(), "summary loaded");
            let actions = state.apply_summary(summary.as_ref().clone());
            Ok((true, actions))
        }
        Event::FetchFailed { generation, error } => {
            if *generation != state.fetch_generation {
                tracing::debug!(generation, "discarding stale fetch failure");
                return Ok((false, vec![]));
            }
            state.fail_fetch(error);
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::CountriesSorted {
                generation,
                countries,
            } => Ok((state.finish_sort(*generation, countries), vec![])),
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                state.is_sorting = false;
                Ok((true, vec![]))
            }
        },
    }
}

/// Event discriminant for span fields; summaries are too large to log whole.
#[derive(Debug)]
enum EventKind {
    Input,
    Sort,
    Permissions,
    Timer,
    Fetch,
    Worker,
}

impl From<&Event> for EventKind {
    fn from(event: &Event) -> Self {
        match event {
            Event::Sort(_) => Self::Sort,
            Event::PermissionsGranted | Event::PermissionsDenied => Self::Permissions,
            Event::Timer => Self::Timer,
            Event::Refresh | Event::SummaryFetched { .. } | Event::FetchFailed { .. } => {
                Self::Fetch
            }
            Event::WorkerResponse(_) => Self::Worker,
            _ => Self::Input,
        }
    }
}
