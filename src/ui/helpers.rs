//! Shared rendering utilities used across components.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Prints `text` centered in a `cols`-wide line, padding both sides.
pub fn print_centered(text: &str, cols: usize) {
    let len = text.chars().count().min(cols);
    let padding = cols.saturating_sub(len) / 2;
    let shown: String = text.chars().take(cols).collect();
    print!("{}", " ".repeat(padding));
    print!("{shown}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}

/// Prints a country name with the search match highlighted.
///
/// `range` is a character range. Selected rows skip the highlight so it does
/// not fight the selection background.
pub fn render_highlighted_text(
    text: &str,
    range: Option<(usize, usize)>,
    theme: &Theme,
    is_selected: bool,
) {
    let Some((start, end)) = range.filter(|_| !is_selected) else {
        print!("{text}");
        return;
    };

    let chars: Vec<char> = text.chars().collect();
    let end = end.min(chars.len());
    let start = start.min(end);

    let before: String = chars[..start].iter().collect();
    let matched: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();

    print!("{before}");
    print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
    print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
    print!("{matched}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{after}");
}
