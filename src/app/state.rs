//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin. It keeps the
//! latest [`Summary`] together with the lists derived from it:
//!
//! - **Top countries**: highest confirmed totals, shown on the Home screen
//! - **Filtered countries**: countries whose name contains the search keyword
//! - **Sorted countries**: the filtered list in the active sort order, produced
//!   by the background worker
//!
//! The visible list is `sorted_countries` when it is non-empty and
//! `filtered_countries` otherwise. Sorting is deferred: the state asks the
//! worker for it and keeps showing the unsorted list until the result arrives.
//! Every request carries a generation number so results that were overtaken by
//! a newer search or sort are discarded.

use super::actions::Action;
use super::debounce::Debouncer;
use super::modes::{FetchStatus, InputMode, Screen};
use crate::domain::{Country, SortKey, SortState, Summary};
use crate::listing::{filter_countries, match_range, top_countries};
use crate::ui::format::{compact_thousands, group_digits, new_count, truncate, updated_label};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CountriesView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, HomeView, ScreenBody,
    SearchBarInfo, SortButton, StatCell, StatKind, StatSegment, UIViewModel,
};
use crate::worker::WorkerMessage;
use crate::Config;

/// Rows taken by the Countries screen chrome: blank line, header, border,
/// search box (3), sort bar, column headers, border, footer.
const COUNTRIES_CHROME_ROWS: usize = 11;

/// Width of the country name column, excluding the flag.
const NAME_WIDTH: usize = 22;

/// Relative widths of the global stats bar segments.
const DECEASED_WEIGHT: f64 = 0.3;
const RECOVERED_WEIGHT: f64 = 0.5;
const CONFIRMED_WEIGHT: f64 = 1.0;

/// Central application state container.
///
/// Mutated by [`handle_event`](crate::app::handle_event); rendered through
/// [`compute_viewmodel`](Self::compute_viewmodel).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Latest successfully fetched summary.
    ///
    /// Kept across failed re-fetches so the previous data stays on screen.
    pub summary: Option<Summary>,

    /// Progress of the most recent fetch.
    pub fetch_status: FetchStatus,

    /// Generation of the most recent fetch request.
    ///
    /// Responses carrying any other generation are stale.
    pub fetch_generation: u64,

    /// Summary endpoint.
    pub api_url: String,

    /// Number of countries shown on the Home screen.
    pub top_count: usize,

    /// Highest-confirmed countries for the Home screen.
    pub top_countries: Vec<Country>,

    /// Countries matching `search_keyword`, in API order.
    pub filtered_countries: Vec<Country>,

    /// `filtered_countries` in `active_sort` order.
    ///
    /// Empty when no sort is active or while a sort is running.
    pub sorted_countries: Vec<Country>,

    /// Active sort column and direction.
    pub active_sort: SortState,

    /// Whether a sort request is waiting for the worker.
    ///
    /// Search input is ignored while set.
    pub is_sorting: bool,

    /// Generation of the most recent sort request.
    pub sort_generation: u64,

    /// Search text as typed.
    pub search_input: String,

    /// Keyword the filtered list was computed from.
    ///
    /// Trails `search_input` by the debounce delay.
    pub search_keyword: String,

    /// Trailing-edge debounce for search input.
    pub debouncer: Debouncer,

    /// Zero-based cursor position within the visible list.
    pub selected_index: usize,

    /// Displayed screen.
    pub screen: Screen,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an empty state for the given configuration.
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            summary: None,
            fetch_status: FetchStatus::Idle,
            fetch_generation: 0,
            api_url: config.api_url.clone(),
            top_count: config.top_countries,
            top_countries: vec![],
            filtered_countries: vec![],
            sorted_countries: vec![],
            active_sort: SortState::NONE,
            is_sorting: false,
            sort_generation: 0,
            search_input: String::new(),
            search_keyword: String::new(),
            debouncer: Debouncer::new(config.search_debounce_ms),
            selected_index: 0,
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            theme,
        }
    }

    /// Countries shown on the Countries screen.
    #[must_use]
    pub fn visible_countries(&self) -> &[Country] {
        if self.sorted_countries.is_empty() {
            &self.filtered_countries
        } else {
            &self.sorted_countries
        }
    }

    /// Country under the cursor, if any.
    #[must_use]
    pub fn selected_country(&self) -> Option<&Country> {
        self.visible_countries().get(self.selected_index)
    }

    /// Moves the cursor down one row, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_countries().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up one row, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_countries().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_countries().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// Starts a new fetch, superseding any fetch still in flight.
    pub fn begin_fetch(&mut self) -> Action {
        self.fetch_generation += 1;
        self.fetch_status = if self.summary.is_some() {
            FetchStatus::Refreshing
        } else {
            FetchStatus::Loading
        };
        tracing::info!(
            generation = self.fetch_generation,
            url = %self.api_url,
            "fetching summary"
        );
        Action::FetchSummary {
            url: self.api_url.clone(),
            generation: self.fetch_generation,
        }
    }

    /// Installs a freshly fetched summary.
    ///
    /// The current keyword is re-applied and the active sort re-requested so
    /// the Countries screen keeps its view across refreshes.
    pub fn apply_summary(&mut self, summary: Summary) -> Vec<Action> {
        let _span = tracing::debug_span!(
            "apply_summary",
            countries = summary.countries.len(),
            date = %summary.date
        )
        .entered();

        self.top_countries = top_countries(&summary.countries, self.top_count);
        self.filtered_countries = filter_countries(&summary.countries, &self.search_keyword);
        self.sorted_countries.clear();
        self.summary = Some(summary);
        self.fetch_status = FetchStatus::Loaded;
        self.clamp_selection();

        self.request_sort_for_current_state()
    }

    /// Records a failed fetch; existing data is kept.
    pub fn fail_fetch(&mut self, error: &str) {
        tracing::warn!(error = %error, had_data = self.summary.is_some(), "summary fetch failed");
        self.fetch_status = FetchStatus::Failed(error.to_string());
    }

    /// Applies a search keyword to the country list.
    ///
    /// Always re-filters the full list and resets the sort to none, cancelling
    /// any running sort, even when the keyword equals the applied one.
    pub fn apply_search(&mut self, keyword: &str) {
        self.search_keyword = keyword.to_string();
        let countries = self
            .summary
            .as_ref()
            .map_or(&[][..], |summary| summary.countries.as_slice());
        self.filtered_countries = filter_countries(countries, keyword);

        self.active_sort = SortState::NONE;
        self.sorted_countries.clear();
        self.is_sorting = false;
        self.sort_generation += 1;
        self.selected_index = 0;
    }

    /// Handles a sort button press.
    pub fn toggle_sort(&mut self, key: SortKey) -> Vec<Action> {
        self.active_sort = self.active_sort.toggle(key);
        self.sorted_countries.clear();
        tracing::debug!(key = ?self.active_sort.key, order = ?self.active_sort.order, "sort toggled");
        let actions = self.request_sort_for_current_state();
        self.clamp_selection();
        actions
    }

    fn request_sort_for_current_state(&mut self) -> Vec<Action> {
        self.sort_generation += 1;
        if !self.active_sort.is_active() || self.filtered_countries.is_empty() {
            self.is_sorting = false;
            return vec![];
        }

        self.is_sorting = true;
        vec![Action::PostToWorker(WorkerMessage::sort_countries(
            self.sort_generation,
            self.active_sort.key,
            self.active_sort.order,
            self.filtered_countries.clone(),
        ))]
    }

    /// Installs a sort result from the worker.
    ///
    /// Returns `false` for results overtaken by a newer request.
    pub fn finish_sort(&mut self, generation: u64, countries: &[Country]) -> bool {
        if generation != self.sort_generation {
            tracing::debug!(
                generation,
                current = self.sort_generation,
                "discarding stale sort result"
            );
            return false;
        }
        self.sorted_countries = countries.to_vec();
        self.is_sorting = false;
        self.clamp_selection();
        true
    }

    /// Computes a renderable UI view model for the given pane size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match (&self.summary, &self.fetch_status) {
            (None, status) => ScreenBody::Empty(Self::compute_loading_state(status)),
            (Some(summary), _) => match self.screen {
                Screen::Home => ScreenBody::Home(self.compute_home(summary)),
                Screen::Countries => ScreenBody::Countries(self.compute_countries(rows, cols)),
            },
        };

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            body,
        }
    }

    fn compute_loading_state(status: &FetchStatus) -> EmptyState {
        match status {
            FetchStatus::Idle => EmptyState {
                message: "Waiting for permissions".to_string(),
                subtitle: "Grant web access to fetch COVID-19 statistics".to_string(),
            },
            FetchStatus::Failed(error) => EmptyState {
                message: error.clone(),
                subtitle: "Press r to retry".to_string(),
            },
            FetchStatus::Loading | FetchStatus::Refreshing | FetchStatus::Loaded => EmptyState {
                message: "Loading statistics...".to_string(),
                subtitle: String::new(),
            },
        }
    }

    fn compute_home(&self, summary: &Summary) -> HomeView {
        let top_countries = self
            .top_countries
            .iter()
            .map(|country| Self::compute_display_item(country, false, None))
            .collect();

        let global = &summary.global;
        let stats = vec![
            StatSegment {
                kind: StatKind::Deceased,
                value: compact_thousands(global.total_deaths),
                weight: DECEASED_WEIGHT,
            },
            StatSegment {
                kind: StatKind::Recovered,
                value: compact_thousands(global.total_recovered),
                weight: RECOVERED_WEIGHT,
            },
            StatSegment {
                kind: StatKind::Confirmed,
                value: compact_thousands(global.total_confirmed),
                weight: CONFIRMED_WEIGHT,
            },
        ];

        HomeView {
            top_countries,
            stats,
        }
    }

    fn compute_countries(&self, rows: usize, _cols: usize) -> CountriesView {
        let countries = self.visible_countries();
        let available_rows = rows.saturating_sub(COUNTRIES_CHROME_ROWS).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(countries.len());
        if visible_end - visible_start < available_rows && countries.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let items = countries[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, country)| {
                let is_selected = visible_start + relative_idx == self.selected_index;
                let highlight = visible_match_range(&country.country, &self.search_keyword);
                Self::compute_display_item(country, is_selected, highlight)
            })
            .collect();

        let no_matches = (countries.is_empty() && !self.search_keyword.is_empty()).then(|| {
            EmptyState {
                message: format!("No countries match \"{}\"", self.search_keyword),
                subtitle: "Press / to edit the search or esc to clear it".to_string(),
            }
        });

        CountriesView {
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                focused: self.input_mode == InputMode::Search,
                editable: !self.is_sorting,
            },
            sort_bar: self.compute_sort_bar(),
            items,
            no_matches,
        }
    }

    fn compute_sort_bar(&self) -> Vec<SortButton> {
        SortKey::BUTTONS
            .iter()
            .zip(['1', '2', '3'])
            .map(|(&key, hotkey)| SortButton {
                hotkey,
                label: key.label(),
                indicator: self.active_sort.indicator(key),
                active: self.active_sort.is_active() && self.active_sort.key == key,
            })
            .collect()
    }

    fn compute_display_item(
        country: &Country,
        is_selected: bool,
        highlight: Option<(usize, usize)>,
    ) -> DisplayItem {
        DisplayItem {
            flag: country.flag_emoji(),
            name: truncate(&country.country, NAME_WIDTH),
            confirmed: StatCell {
                total: group_digits(country.total_confirmed),
                new: new_count(country.new_confirmed),
            },
            deaths: StatCell {
                total: group_digits(country.total_deaths),
                new: new_count(country.new_deaths),
            },
            recovered: StatCell {
                total: group_digits(country.total_recovered),
                new: new_count(country.new_recovered),
            },
            updated: updated_label(country),
            is_selected,
            highlight,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.screen {
            Screen::Home => " COVID-19 Dashboard ".to_string(),
            Screen::Countries => format!(" Countries ({}) ", self.visible_countries().len()),
        };

        let status = match (&self.fetch_status, self.is_sorting) {
            (_, true) => Some("sorting...".to_string()),
            (FetchStatus::Refreshing, false) => Some("refreshing...".to_string()),
            (FetchStatus::Failed(_), false) if self.summary.is_some() => {
                Some("refresh failed".to_string())
            }
            _ => self
                .summary
                .as_ref()
                .filter(|summary| !summary.date.is_empty())
                .map(|summary| format!("as of {}", summary.date)),
        };

        HeaderInfo { title, status }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.screen, self.input_mode) {
            (_, InputMode::Search) => "ESC: clear  Enter: apply  Type to filter",
            (Screen::Home, InputMode::Normal) => "Enter/l: all countries  r: refresh  q: quit",
            (Screen::Countries, InputMode::Normal) => {
                "j/k: navigate  /: search  1/2/3: sort  h/ESC: back  r: refresh  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Match range within the rendered name column, or `None` when the match
/// falls past the visible characters (or into the `...` of a truncated name).
fn visible_match_range(name: &str, keyword: &str) -> Option<(usize, usize)> {
    let shown = if name.chars().count() > NAME_WIDTH {
        NAME_WIDTH - 3
    } else {
        NAME_WIDTH
    };
    match_range(name, keyword).filter(|&(_, end)| end <= shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GlobalStats, SortOrder};

    fn country(name: &str, code: &str, confirmed: u64) -> Country {
        Country {
            country: name.to_string(),
            country_code: code.to_string(),
            total_confirmed: confirmed,
            ..Country::default()
        }
    }

    fn summary() -> Summary {
        Summary {
            global: GlobalStats {
                total_confirmed: 512_345,
                total_deaths: 12_000,
                total_recovered: 300_060,
                ..GlobalStats::default()
            },
            countries: vec![
                country("Germany", "DE", 300),
                country("France", "FR", 500),
                country("Georgia", "GE", 100),
                country("Ghana", "GH", 200),
            ],
            date: "2022-04-18T10:40:45Z".to_string(),
            ..Summary::default()
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let _ = state.begin_fetch();
        let actions = state.apply_summary(summary());
        assert!(actions.is_empty());
        state
    }

    fn names(countries: &[Country]) -> Vec<&str> {
        countries.iter().map(|c| c.country.as_str()).collect()
    }

    #[test]
    fn first_fetch_is_loading_later_fetches_refresh() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        assert_eq!(
            state.begin_fetch(),
            Action::FetchSummary {
                url: Config::default().api_url,
                generation: 1
            }
        );
        assert_eq!(state.fetch_status, FetchStatus::Loading);

        state.apply_summary(summary());
        let _ = state.begin_fetch();
        assert_eq!(state.fetch_status, FetchStatus::Refreshing);
        assert_eq!(state.fetch_generation, 2);
    }

    #[test]
    fn summary_populates_derived_lists() {
        let state = loaded_state();
        assert_eq!(
            names(&state.top_countries),
            vec!["France", "Germany", "Ghana", "Georgia"]
        );
        assert_eq!(state.filtered_countries.len(), 4);
        assert_eq!(state.fetch_status, FetchStatus::Loaded);
    }

    #[test]
    fn changed_keyword_resets_sort() {
        let mut state = loaded_state();
        state.toggle_sort(SortKey::TotalConfirmed);
        assert!(state.is_sorting);

        state.apply_search("ge");
        assert_eq!(state.active_sort, SortState::NONE);
        assert!(!state.is_sorting);
        assert_eq!(names(state.visible_countries()), vec!["Germany", "Georgia"]);
    }

    #[test]
    fn highlight_stops_before_truncation_ellipsis() {
        let long = "Saint Vincent and the Grenadines";
        assert_eq!(visible_match_range(long, "saint"), Some((0, 5)));
        assert_eq!(visible_match_range(long, "and t"), Some((14, 19)));
        assert_eq!(visible_match_range(long, "the"), None);
        assert_eq!(visible_match_range("Bosnia and Herzegovina", "vina"), Some((18, 22)));
    }

    #[test]
    fn reapplying_same_keyword_resets_sort() {
        let mut state = loaded_state();
        state.apply_search("g");
        let actions = state.toggle_sort(SortKey::TotalDeaths);
        let [Action::PostToWorker(WorkerMessage::SortCountries { generation, .. })] =
            actions.as_slice()
        else {
            panic!("expected a sort request, got {actions:?}");
        };
        let sorted = crate::listing::sort_countries(
            state.filtered_countries.clone(),
            SortKey::TotalDeaths,
            SortOrder::Asc,
        );
        assert!(state.finish_sort(*generation, &sorted));
        let generation = state.sort_generation;

        state.apply_search("g");
        assert_eq!(state.active_sort, SortState::NONE);
        assert!(state.sorted_countries.is_empty());
        assert_eq!(state.sort_generation, generation + 1);
        assert_eq!(state.visible_countries(), state.filtered_countries.as_slice());
    }

    #[test]
    fn sort_result_replaces_visible_list() {
        let mut state = loaded_state();
        let actions = state.toggle_sort(SortKey::TotalConfirmed);
        let [Action::PostToWorker(WorkerMessage::SortCountries { generation, order, .. })] =
            actions.as_slice()
        else {
            panic!("expected a sort request, got {actions:?}");
        };
        assert_eq!(*order, SortOrder::Asc);

        let sorted = crate::listing::sort_countries(
            state.filtered_countries.clone(),
            SortKey::TotalConfirmed,
            SortOrder::Asc,
        );
        assert!(state.finish_sort(*generation, &sorted));
        assert!(!state.is_sorting);
        assert_eq!(state.visible_countries()[0].country, "Georgia");
    }

    #[test]
    fn stale_sort_result_is_discarded() {
        let mut state = loaded_state();
        state.toggle_sort(SortKey::TotalConfirmed);
        let stale = state.sort_generation;
        state.toggle_sort(SortKey::TotalConfirmed);

        assert!(!state.finish_sort(stale, &[country("Nowhere", "", 1)]));
        assert!(state.sorted_countries.is_empty());
        assert!(state.is_sorting);
    }

    #[test]
    fn third_toggle_clears_sort_without_worker_request() {
        let mut state = loaded_state();
        state.toggle_sort(SortKey::TotalRecovered);
        state.toggle_sort(SortKey::TotalRecovered);
        let actions = state.toggle_sort(SortKey::TotalRecovered);
        assert!(actions.is_empty());
        assert!(!state.is_sorting);
        assert_eq!(names(state.visible_countries())[0], "Germany");
    }

    #[test]
    fn refresh_reapplies_keyword_and_sort() {
        let mut state = loaded_state();
        state.apply_search("gh");
        state.toggle_sort(SortKey::TotalConfirmed);

        let _ = state.begin_fetch();
        let actions = state.apply_summary(summary());
        assert_eq!(names(&state.filtered_countries), vec!["Ghana"]);
        assert_eq!(actions.len(), 1);
        assert!(state.is_sorting);
    }

    #[test]
    fn selection_wraps_and_clamps() {
        let mut state = loaded_state();
        state.move_selection_up();
        assert_eq!(state.selected_index, 3);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);

        state.selected_index = 3;
        state.apply_search("fr");
        assert_eq!(state.selected_index, 0);
        assert_eq!(
            state.selected_country().map(|c| c.country.as_str()),
            Some("France")
        );
    }

    #[test]
    fn failed_refresh_keeps_data() {
        let mut state = loaded_state();
        let _ = state.begin_fetch();
        state.fail_fetch("HTTP request failed with status 500");
        assert!(state.summary.is_some());

        let vm = state.compute_viewmodel(24, 120);
        assert!(matches!(vm.body, ScreenBody::Home(_)));
        assert_eq!(vm.header.status.as_deref(), Some("refresh failed"));
    }

    #[test]
    fn viewmodel_before_data_shows_empty_state() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let _ = state.begin_fetch();
        let vm = state.compute_viewmodel(24, 120);
        let ScreenBody::Empty(empty) = vm.body else {
            panic!("expected empty state");
        };
        assert_eq!(empty.message, "Loading statistics...");
    }

    #[test]
    fn home_viewmodel_has_weighted_stats() {
        let state = loaded_state();
        let ScreenBody::Home(home) = state.compute_viewmodel(24, 120).body else {
            panic!("expected home screen");
        };
        let labels: Vec<_> = home.stats.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(labels, vec!["12.0K", "300.1K", "512.3K"]);
        assert_eq!(home.top_countries[0].flag, "🇫🇷");
    }

    #[test]
    fn countries_viewmodel_windows_around_selection() {
        let mut state = loaded_state();
        state.screen = Screen::Countries;
        state.selected_index = 3;

        let ScreenBody::Countries(view) = state.compute_viewmodel(13, 120).body else {
            panic!("expected countries screen");
        };
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[1].name, "Ghana");
        assert!(view.items[1].is_selected);
    }

    #[test]
    fn countries_viewmodel_reports_no_matches() {
        let mut state = loaded_state();
        state.screen = Screen::Countries;
        state.apply_search("atlantis");

        let ScreenBody::Countries(view) = state.compute_viewmodel(24, 120).body else {
            panic!("expected countries screen");
        };
        assert!(view.items.is_empty());
        assert!(view.no_matches.is_some());
    }

    #[test]
    fn search_bar_disabled_while_sorting() {
        let mut state = loaded_state();
        state.screen = Screen::Countries;
        state.toggle_sort(SortKey::TotalDeaths);

        let ScreenBody::Countries(view) = state.compute_viewmodel(24, 120).body else {
            panic!("expected countries screen");
        };
        assert!(!view.search_bar.editable);
        assert_eq!(view.sort_bar[2].indicator, "↑");
        assert!(view.sort_bar[2].active);
    }
}
