//! Sort bar component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SortButton;

/// Renders `Sort by: [1] Active ↑  [2] Recovered  [3] Deaths` at `row`.
pub fn render_sort_bar(row: usize, buttons: &[SortButton], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" Sort by:");
    let mut width = 9;

    for button in buttons {
        let label = format!("  [{}] {}", button.hotkey, button.label);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("  [{}] ", button.hotkey);
        if button.active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.sort_active));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", button.label);
        width += label.chars().count();
        if !button.indicator.is_empty() {
            print!(" {}", button.indicator);
            width += 2;
        }
        print!("{}", Theme::reset());
    }

    print!("{}", " ".repeat(cols.saturating_sub(width)));
    row + 1
}
