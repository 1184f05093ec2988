//! Header component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title bar at `row`, returning the next free row.
///
/// A transient status ("refreshing...", "sorting...") is appended dimmed.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let status = header
        .status
        .as_ref()
        .map(|status| format!(" {status} "))
        .unwrap_or_default();
    let title_len = header.title.chars().count();
    let status_len = status.chars().count();
    let padding = cols.saturating_sub(title_len + status_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", Theme::reset());

    if !status.is_empty() {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        if let Some(bg) = &theme.colors.header_bg {
            print!("{}", Theme::bg(bg));
        }
        print!("{status}");
    }

    print!(
        "{}",
        " ".repeat(cols.saturating_sub(padding + title_len + status_len))
    );
    print!("{}", Theme::reset());
    row + 1
}
