//! Zellij plugin wrapper and entry point.
//!
//! This is the only place that talks to the Zellij host. It implements the
//! `ZellijPlugin` and `ZellijWorker` traits, translates host events into
//! library events, and turns the library's actions into host calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling, web requests
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │    SortWorker    │   │  ← Country sorting
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, `WebRequestResult`, `CustomMessage`, `Timer`, `PermissionRequestResult`
//! 3. **Permissions**: Request `WebAccess`; the first fetch starts once granted
//! 4. **Update**: Translate events, delegate to the library, execute actions
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search and sort events (see keybindings)
//! - `WebRequestResult` → `Event::SummaryFetched` / `Event::FetchFailed`
//! - `Timer` → `Event::Timer` (search debounce)
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//! - `PermissionRequestResult` → `Event::PermissionsGranted` / `Event::PermissionsDenied`
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`/`Down`: Move down
//! - `Ctrl+p`/`Up`: Move up
//!
//! In normal mode:
//! - `j`/`k`: Move down/up
//! - `Enter`/`l`: Open the Countries screen
//! - `Esc`/`h`: Back to Home
//! - `/`: Enter search mode
//! - `1`/`2`/`3`: Sort by active cases, recoveries, deaths
//! - `r`: Refresh
//! - `q`: Close plugin
//!
//! In search mode:
//! - Characters: Type into the search bar
//! - `Enter`: Apply the search now and leave search mode
//! - `Esc`: Clear the search and leave search mode

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
use plugin::{SortWorker, State};

// Register plugin and worker with Zellij
#[cfg(target_family = "wasm")]
register_plugin!(State);
#[cfg(target_family = "wasm")]
register_worker!(SortWorker, covidash_worker, COVIDASH_WORKER);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("covidash is a Zellij plugin; build it with --target wasm32-wasip1 and load the .wasm in Zellij");
}

#[cfg(target_family = "wasm")]
mod plugin {
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;
    use zellij_tile::shim::{post_message_to, post_message_to_plugin};

    use covidash::api::{response_event, SummaryRequest};
    use covidash::worker::{CovidashWorker, WorkerMessage, WorkerResponse};
    use covidash::{handle_event, Action, Config, Event, InputMode, SortKey};

    /// Worker name; `register_worker!` appends `_worker` to get the export.
    const WORKER_NAME: &str = "covidash";

    /// Zellij worker wrapper around the library's sort worker.
    #[derive(Default, Serialize, Deserialize)]
    pub struct SortWorker(CovidashWorker);

    impl<'de> ZellijWorker<'de> for SortWorker {
        fn on_message(&mut self, message: String, payload: String) {
            if message != WORKER_NAME {
                tracing::debug!(message_name = %message, "worker ignoring unknown message");
                return;
            }
            match self.0.handle_payload(&payload) {
                Ok(response) => post_message_to_plugin(PluginMessage::new_to_plugin(WORKER_NAME, &response)),
                Err(e) => tracing::warn!(error = %e, "worker failed to encode response"),
            }
        }
    }

    /// Plugin state wrapper.
    ///
    /// Wraps the library's `AppState` with the worker name used for IPC.
    pub struct State {
        /// Core application state from library layer.
        app: covidash::AppState,

        /// Worker thread identifier for IPC messaging.
        worker_name: String,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: covidash::initialize(&Config::default()),
                worker_name: WORKER_NAME.to_string(),
            }
        }
    }

    impl ZellijPlugin for State {
        /// Parses configuration, initializes tracing and state, then asks
        /// for `WebAccess`. The first fetch waits for the permission result.
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            covidash::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            if let Err(e) = Config::try_from_zellij(&configuration) {
                tracing::warn!(error = %e, "invalid plugin option, using its default");
            }
            tracing::debug!(api_url = %config.api_url, top_countries = config.top_countries, "parsed configuration");
            self.app = covidash::initialize(&config);

            subscribe(&[
                EventType::Key,
                EventType::WebRequestResult,
                EventType::CustomMessage,
                EventType::Timer,
                EventType::PermissionRequestResult,
            ]);
            request_permission(&[PermissionType::WebAccess]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        /// Translates a host event, delegates to `handle_event` and executes
        /// the resulting actions. Returns `true` if the UI should re-render.
        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    match response_event(status, &body, &context) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                    match self.map_custom_message_event(&message, &payload) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
                zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                    PermissionStatus::Granted => Event::PermissionsGranted,
                    PermissionStatus::Denied => {
                        tracing::warn!("web access denied - statistics cannot be fetched");
                        Event::PermissionsDenied
                    }
                },
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render, "event handled successfully");
                    for a in actions {
                        self.execute_action(&a);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::debug!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            covidash::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        /// Gets a string name for a Zellij event for logging purposes.
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
                zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
                _ => "Other".to_string(),
            }
        }

        /// Maps keyboard events to application events.
        fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
            tracing::debug!(bare_key = ?key.bare_key, "key event");

            if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
                return Some(Event::KeyDown);
            }
            if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
                return Some(Event::KeyUp);
            }

            match self.app.input_mode {
                InputMode::Search => Self::map_search_key(key),
                InputMode::Normal => Self::map_normal_key(key),
            }
        }

        fn map_search_key(key: &KeyWithModifier) -> Option<Event> {
            Some(match key.bare_key {
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if key.key_modifiers.is_empty() => Event::Char(c),
                _ => return None,
            })
        }

        fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
            Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter | BareKey::Char('l') => Event::Confirm,
                BareKey::Esc | BareKey::Char('h') => Event::Back,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('1') => Event::Sort(SortKey::TotalConfirmed),
                BareKey::Char('2') => Event::Sort(SortKey::TotalRecovered),
                BareKey::Char('3') => Event::Sort(SortKey::TotalDeaths),
                BareKey::Char('r') => Event::Refresh,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            })
        }

        /// Maps custom message events to application events.
        fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
            tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

            if message != self.worker_name {
                tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
                return None;
            }
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => Some(Event::WorkerResponse(response)),
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        }

        /// Serializes a message as JSON and sends it to the worker.
        ///
        /// Serialization errors are logged, not propagated.
        fn post_worker_message(&self, message: &WorkerMessage) {
            match serde_json::to_string(message) {
                Ok(payload) => {
                    tracing::debug!(payload_len = payload.len(), "posting message to worker");
                    post_message_to(PluginMessage {
                        worker_name: Some(self.worker_name.clone()),
                        name: self.worker_name.clone(),
                        payload,
                    });
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to serialize worker message");
                }
            }
        }

        /// Translates library actions to Zellij API calls.
        #[tracing::instrument(level = "debug", skip(self))]
        fn execute_action(&self, action: &Action) {
            match action {
                Action::CloseFocus => {
                    tracing::debug!("closing plugin focus");
                    hide_self();
                }
                Action::FetchSummary { url, generation } => {
                    tracing::debug!(url = %url, generation, "requesting summary");
                    web_request(
                        url,
                        HttpVerb::Get,
                        BTreeMap::new(),
                        vec![],
                        SummaryRequest { generation: *generation }.to_context(),
                    );
                }
                Action::SetTimeout { millis } => {
                    #[allow(clippy::cast_precision_loss)]
                    set_timeout(*millis as f64 / 1000.0);
                }
                Action::PostToWorker(message) => self.post_worker_message(message),
            }
        }
    }
}
