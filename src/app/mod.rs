//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain, listing, api and
//! worker layers:
//!
//! ```text
//! Key / HTTP / Timer → Events → Event Handler → State Mutations → Actions → Side Effects
//!                                   ↑                                  ↓
//!                                   └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Search debounce on top of uncancellable timers
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Screen, input mode and fetch status types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::Debouncer;
pub use handler::{handle_event, Event};
pub use modes::{FetchStatus, InputMode, Screen};
pub use state::AppState;
