//! Search bar component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line search box at `row`, returning the next free row.
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: query█   │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
///
/// While a sort is running the border switches to `search_bar_disabled` and
/// the prompt reads `(sorting)`. A block cursor marks the focused box.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.editable {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.search_bar_disabled
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let prompt = if search.editable { " Search: " } else { " Search (sorting): " };
    let cursor = if search.focused && search.editable { "█" } else { "" };
    let search_text = format!("{prompt}{}{cursor}", search.query);
    let text_len = search_text.chars().count();
    let shown: String = search_text.chars().take(inner_width).collect();

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    if search.editable {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{shown}");
    print!("{}", " ".repeat(inner_width.saturating_sub(text_len)));
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
