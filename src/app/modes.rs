//! Screen and input mode state types.
//!
//! The plugin shows one of two screens:
//! - **Home**: top countries and global totals
//! - **Countries**: the full searchable, sortable list
//!
//! On the Countries screen the user is either navigating (`Normal`) or typing
//! a search keyword (`Search`).

/// Which screen is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Dashboard with the top countries and the global stats bar.
    ///
    /// Keybindings: enter/l (see more), r (refresh), q (quit).
    Home,

    /// Full country list.
    ///
    /// Keybindings: j/k, / (search), 1/2/3 (sort), h/esc (back), r, q.
    Countries,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands.
    Normal,

    /// Keys edit the search keyword.
    Search,
}

/// Progress of the summary fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Waiting for permissions; nothing requested yet.
    Idle,
    /// First fetch in flight, nothing to show yet.
    Loading,
    /// A re-fetch is in flight; the previous summary stays on screen.
    Refreshing,
    /// The latest fetch succeeded.
    Loaded,
    /// The latest fetch failed.
    Failed(String),
}
