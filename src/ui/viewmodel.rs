//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready strings only; all formatting and
//! windowing decisions are made while building them.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// Keybinding hints.
    pub footer: FooterInfo,

    /// Screen-specific content.
    pub body: ScreenBody,
}

/// Screen-specific content of a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenBody {
    /// Centered message (loading, error, waiting for permissions).
    Empty(EmptyState),

    /// Dashboard screen.
    Home(HomeView),

    /// Country list screen.
    Countries(CountriesView),
}

/// Dashboard content.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    /// Highest-confirmed countries, highest first.
    pub top_countries: Vec<DisplayItem>,

    /// Global totals bar.
    pub stats: Vec<StatSegment>,
}

/// Which global total a bar segment shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Deceased,
    Recovered,
    Confirmed,
}

impl StatKind {
    /// Legend label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deceased => "Deceased",
            Self::Recovered => "Recovered",
            Self::Confirmed => "Confirmed",
        }
    }
}

/// One segment of the compound global stats bar.
#[derive(Debug, Clone, PartialEq)]
pub struct StatSegment {
    pub kind: StatKind,

    /// Value label, e.g. `"512.3K"`.
    pub value: String,

    /// Relative width of the segment.
    pub weight: f64,
}

/// Country list content.
#[derive(Debug, Clone, PartialEq)]
pub struct CountriesView {
    /// Search input box.
    pub search_bar: SearchBarInfo,

    /// Sort buttons.
    pub sort_bar: Vec<SortButton>,

    /// Visible window of the list.
    pub items: Vec<DisplayItem>,

    /// Shown instead of rows when the search matches nothing.
    pub no_matches: Option<EmptyState>,
}

/// One row of a country table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Flag emoji, empty when the country code is missing.
    pub flag: String,

    /// Country name, truncated to the name column.
    pub name: String,

    pub confirmed: StatCell,
    pub deaths: StatCell,
    pub recovered: StatCell,

    /// Formatted last-updated timestamp.
    pub updated: String,

    /// Whether this row holds the cursor.
    pub is_selected: bool,

    /// Character range of the search match within `name`.
    pub highlight: Option<(usize, usize)>,
}

/// Total and daily increase of one statistic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCell {
    /// Grouped total, e.g. `"1,234,567"`.
    pub total: String,

    /// `"+123"`; `None` when there was no increase.
    pub new: Option<String>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text.
    pub title: String,

    /// Transient status such as "refreshing" or "sorting".
    pub status: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current query text as typed.
    pub query: String,

    /// Whether keystrokes are routed to the query.
    pub focused: bool,

    /// `false` while a sort is running; input is ignored until it finishes.
    pub editable: bool,
}

/// One button of the sort bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortButton {
    /// Key that presses this button.
    pub hotkey: char,

    pub label: &'static str,

    /// `↑`, `↓` or empty.
    pub indicator: &'static str,

    pub active: bool,
}
