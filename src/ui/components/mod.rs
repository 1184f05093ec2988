//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with transient status
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box
//! - [`sort_bar`]: Sort buttons with direction arrows
//! - [`table`]: Country rows
//! - [`stats`]: Global stats legend and compound bar
//! - [`empty`]: Centered messages
//!
//! # Layouts
//!
//! - [`render_message_screen`]: Header + message + Footer
//! - [`render_home_screen`]: Header + top countries + global stats + Footer
//! - [`render_countries_screen`]: Header + search + sort bar + table + Footer

mod empty;
mod footer;
mod header;
mod search;
mod sort_bar;
pub mod stats;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CountriesView, EmptyState, HomeView, UIViewModel};

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use sort_bar::render_sort_bar;
use stats::{render_bar, render_legend};
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line, returning the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the title line of a section with an optional right-aligned hint.
fn render_section_title(row: usize, title: &str, hint: Option<&str>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(" {title}");
    print!("{}", Theme::reset());

    let used = title.chars().count() + 1;
    if let Some(hint) = hint {
        let hint_len = hint.chars().count();
        print!("{}", " ".repeat(cols.saturating_sub(used + hint_len + 1)));
        print!("{}", Theme::underline());
        print!("{}", Theme::fg(&theme.colors.link));
        print!("{hint}");
        print!("{}", Theme::reset());
    }
    row + 1
}

/// Draws the footer and its border on the last two rows.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.saturating_sub(1);
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

/// Renders a full-screen message (loader, errors, permission prompt).
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Blank lines]
/// [Message]
/// [Subtitle]
/// [Blank padding]
/// [Border]
/// [Footer]
/// ```
pub fn render_message_screen(vm: &UIViewModel, empty: &EmptyState, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let middle = (rows / 2).max(current_row + 1);
    render_empty_state(middle, empty, theme, cols);

    render_bottom(vm, theme, cols, rows);
}

/// Renders the dashboard.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [" Top Countries"             "See more (enter)"]
/// [Table Headers]
/// [Top country rows]
/// [blank line]
/// [" Global Stats"]
/// [Legend]
/// [Compound bar]
/// [Blank padding]
/// [Border]
/// [Footer]
/// ```
pub fn render_home_screen(vm: &UIViewModel, home: &HomeView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    current_row = render_section_title(current_row, "Top Countries", Some("See more (enter)"), theme, cols);
    current_row = render_table_headers(current_row, theme, cols);
    current_row = render_table_rows(current_row, &home.top_countries, theme, cols);

    current_row = render_section_title(current_row + 1, "Global Stats", None, theme, cols);
    current_row = render_legend(current_row, &home.stats, theme);
    let _current_row = render_bar(current_row + 1, &home.stats, theme, cols);

    render_bottom(vm, theme, cols, rows);
}

/// Renders the country list.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Sort Bar]
/// [Table Headers]
/// [Table Rows | no-matches message]
/// [Blank padding]
/// [Border]
/// [Footer]
/// ```
pub fn render_countries_screen(vm: &UIViewModel, view: &CountriesView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &view.search_bar, theme, cols);
    current_row = render_sort_bar(current_row, &view.sort_bar, theme, cols);

    if let Some(empty) = &view.no_matches {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme, cols);
        let _current_row = render_table_rows(current_row, &view.items, theme, cols);
    }

    render_bottom(vm, theme, cols, rows);
}
