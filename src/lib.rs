//! Covidash: a Zellij plugin dashboard for COVID-19 statistics.
//!
//! Covidash fetches the global summary from a COVID-19 statistics API and
//! shows:
//! - A Home screen with the top countries by confirmed cases and a compound
//!   bar of global deaths, recoveries and confirmed cases
//! - A Countries screen with debounced substring search and tri-state sorting
//!   by active cases, recoveries or deaths
//! - Sorting offloaded to a Zellij worker thread so the UI stays responsive
//!   on large lists
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, debounce, generations            │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - Rendering   │   │ - Request ctx │   │ - Sorting     │
//! │ - Theming     │   │ - Decoding    │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Listing (domain/, listing/)               │
//! │  - Summary model, sort state, errors                │
//! │  - Filtering, sorting, top-N                        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/covidash.wasm" {
//!         api_url "https://api.covid19api.com/summary"
//!         search_debounce_ms "250"
//!         top_countries "5"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use covidash::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(matches!(actions[..], [Action::FetchSummary { generation: 1, .. }]));
//! # Ok::<(), covidash::CovidashError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod listing;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, FetchStatus, InputMode, Screen};
pub use domain::{Country, CovidashError, GlobalStats, Result, SortKey, SortOrder, SortState, Summary};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::str::FromStr;

/// Default search debounce window.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 250;

/// Default number of countries on the Home screen.
pub const DEFAULT_TOP_COUNTRIES: usize = 5;

/// Default built-in theme.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Plugin configuration parsed from Zellij's plugin options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Summary endpoint.
    pub api_url: String,

    /// Quiet period before typed search text is applied.
    pub search_debounce_ms: u64,

    /// Rows in the Home screen's top countries table.
    pub top_countries: usize,

    /// Built-in theme name; ignored when `theme_file` is set.
    pub theme_name: String,

    /// Path to a custom TOML theme. `~` resolves to the host mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `info` or `covidash=debug`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: api::DEFAULT_SUMMARY_URL.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            top_countries: DEFAULT_TOP_COUNTRIES,
            theme_name: DEFAULT_THEME.to_string(),
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

/// Reads an optional, non-blank option.
fn option<'a>(config: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    config
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Parses an optional option, reporting malformed values.
fn parse_option<T: FromStr>(config: &BTreeMap<String, String>, key: &str) -> Result<Option<T>> {
    option(config, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| CovidashError::Config(format!("{key}: cannot parse {raw:?}")))
        })
        .transpose()
}

impl Config {
    /// Parses options, falling back to the default for every missing or
    /// malformed value.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use covidash::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("top_countries".to_string(), "10".to_string());
    /// map.insert("search_debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.top_countries, 10);
    /// assert_eq!(config.search_debounce_ms, 250);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: option(config, "api_url").map_or(defaults.api_url, String::from),
            search_debounce_ms: parse_option(config, "search_debounce_ms")
                .ok()
                .flatten()
                .unwrap_or(defaults.search_debounce_ms),
            top_countries: parse_option(config, "top_countries")
                .ok()
                .flatten()
                .unwrap_or(defaults.top_countries),
            theme_name: option(config, "theme").map_or(defaults.theme_name, String::from),
            theme_file: option(config, "theme_file").map(String::from),
            trace_level: option(config, "trace_level").map_or(defaults.trace_level, String::from),
        }
    }

    /// Parses options strictly.
    ///
    /// # Errors
    ///
    /// Returns [`CovidashError::Config`] for the first malformed numeric
    /// option or an `api_url` that is not an http(s) URL.
    pub fn try_from_zellij(config: &BTreeMap<String, String>) -> Result<Self> {
        parse_option::<u64>(config, "search_debounce_ms")?;
        parse_option::<usize>(config, "top_countries")?;
        if let Some(url) = option(config, "api_url") {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CovidashError::Config(format!("api_url: {url:?} is not an http(s) URL")));
            }
        }
        Ok(Self::from_zellij(config))
    }

    /// Resolves the configured theme, falling back to the default theme.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::resolve_host_path(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                }
            }
        }

        Theme::from_name(&self.theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %self.theme_name, "unknown theme, using default");
            Theme::default()
        })
    }
}

/// Creates the application state for a configuration.
///
/// Nothing is fetched until [`Event::PermissionsGranted`] arrives.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing covidash plugin");
    AppState::new(config, config.load_theme())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_options_give_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
        assert_eq!(Config::default().api_url, "https://api.covid19api.com/summary");
    }

    #[test]
    fn parses_all_options() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "http://localhost:8080/summary"),
            ("search_debounce_ms", "100"),
            ("top_countries", "3"),
            ("theme", "catppuccin-latte"),
            ("theme_file", " "),
            ("trace_level", "debug"),
        ]));
        assert_eq!(config.api_url, "http://localhost:8080/summary");
        assert_eq!(config.search_debounce_ms, 100);
        assert_eq!(config.top_countries, 3);
        assert_eq!(config.theme_name, "catppuccin-latte");
        assert_eq!(config.theme_file, None);
        assert_eq!(config.trace_level, "debug");
    }

    #[test]
    fn strict_parse_reports_bad_values() {
        let err = Config::try_from_zellij(&map(&[("top_countries", "-1")])).unwrap_err();
        assert!(matches!(err, CovidashError::Config(_)));
        assert!(Config::try_from_zellij(&map(&[("api_url", "ftp://x")])).is_err());
        assert!(Config::try_from_zellij(&map(&[("top_countries", "7")])).is_ok());
    }

    #[test]
    fn theme_falls_back_to_default() {
        let config = Config {
            theme_name: "nope".to_string(),
            theme_file: Some("/definitely/missing.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, DEFAULT_THEME);

        let latte = Config {
            theme_name: "catppuccin-latte".to_string(),
            ..Config::default()
        };
        assert_eq!(initialize(&latte).theme.name, "catppuccin-latte");
    }
}
