//! Country table component renderer.
//!
//! Columns: flag and name, cases, deaths, recovered, last updated. Each stat
//! column shows the total followed by the daily increase when there was one.
//! The updated column is dropped on panes too narrow to hold it.

use crate::ui::format::pad;
use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, StatCell};

/// Flag glyph (two cells) plus a space, then the name.
const NAME_COLUMN_WIDTH: usize = 26;
const STAT_COLUMN_WIDTH: usize = 24;
const UPDATED_COLUMN_WIDTH: usize = 20;

/// Renders the column headers at `row`, returning the next free row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let mut line = format!(
        " {}{}{}{}",
        pad("COUNTRY", NAME_COLUMN_WIDTH - 1),
        pad("CASES", STAT_COLUMN_WIDTH),
        pad("DEATHS", STAT_COLUMN_WIDTH),
        pad("RECOVERED", STAT_COLUMN_WIDTH),
    );
    if shows_updated(cols) {
        line.push_str("UPDATED");
    }

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows starting at `row`, returning the next free row.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

const fn shows_updated(cols: usize) -> bool {
    cols >= NAME_COLUMN_WIDTH + 3 * STAT_COLUMN_WIDTH + UPDATED_COLUMN_WIDTH
}

/// Renders one country row.
///
/// # Styling Precedence
///
/// 1. Selection colors (if `is_selected`)
/// 2. Search match highlight (unless selected)
/// 3. Stat colors for the daily increases
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let row_style = || {
        if item.is_selected {
            format!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else {
            Theme::fg(&theme.colors.text_normal)
        }
    };

    position_cursor(row, 1);
    print!("{}", row_style());

    if item.flag.is_empty() {
        print!("   ");
    } else {
        print!("{} ", item.flag);
    }
    helpers::render_highlighted_text(&item.name, item.highlight, theme, item.is_selected);
    let name_len = item.name.chars().count();
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(3 + name_len)));
    let mut width = NAME_COLUMN_WIDTH;

    for (cell, color) in [
        (&item.confirmed, &theme.colors.confirmed),
        (&item.deaths, &theme.colors.deaths),
        (&item.recovered, &theme.colors.recovered),
    ] {
        width += render_stat_cell(cell, color, item.is_selected, &row_style());
    }

    if shows_updated(cols) {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        if item.is_selected {
            print!("{}", row_style());
        }
        print!("{}", item.updated);
        width += item.updated.chars().count();
    }

    print!("{}", " ".repeat(cols.saturating_sub(width)));
    print!("{}", Theme::reset());
    row + 1
}

fn render_stat_cell(cell: &StatCell, color: &str, is_selected: bool, row_style: &str) -> usize {
    print!("{}", cell.total);
    let mut len = cell.total.chars().count();

    if let Some(new) = &cell.new {
        if !is_selected {
            print!("{}", Theme::fg(color));
        }
        print!(" {new}");
        print!("{row_style}");
        len += new.chars().count() + 1;
    }

    print!("{}", " ".repeat(STAT_COLUMN_WIDTH.saturating_sub(len)));
    STAT_COLUMN_WIDTH.max(len)
}
