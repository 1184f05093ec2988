//! Global stats component: legend plus a compound bar.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatKind, StatSegment};

const BAR_MARGIN: usize = 2;

fn segment_color(kind: StatKind, theme: &Theme) -> &str {
    match kind {
        StatKind::Deceased => &theme.colors.deaths,
        StatKind::Recovered => &theme.colors.recovered,
        StatKind::Confirmed => &theme.colors.confirmed,
    }
}

/// Splits `width` cells among segments in proportion to their weights.
///
/// The last segment absorbs rounding so the widths always sum to `width`.
#[must_use]
pub fn segment_widths(segments: &[StatSegment], width: usize) -> Vec<usize> {
    let total: f64 = segments.iter().map(|segment| segment.weight).sum();
    if segments.is_empty() || total <= 0.0 {
        return vec![0; segments.len()];
    }

    let mut widths = Vec::with_capacity(segments.len());
    let mut used = 0;
    for (i, segment) in segments.iter().enumerate() {
        let cells = if i + 1 == segments.len() {
            width.saturating_sub(used)
        } else {
            #[allow(
                clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss
            )]
            let cells = (width as f64 * segment.weight / total).round() as usize;
            cells.min(width.saturating_sub(used))
        };
        used += cells;
        widths.push(cells);
    }
    widths
}

/// Renders the legend row at `row`, returning the next free row.
pub fn render_legend(row: usize, segments: &[StatSegment], theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(BAR_MARGIN));
    for segment in segments {
        print!("{}■ ", Theme::fg(segment_color(segment.kind, theme)));
        print!("{}{}   ", Theme::fg(&theme.colors.text_normal), segment.kind.label());
    }
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the one-line compound bar at `row`, returning the next free row.
///
/// Labels that do not fit their segment are left out.
pub fn render_bar(row: usize, segments: &[StatSegment], theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(BAR_MARGIN * 2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(BAR_MARGIN));
    for (segment, cells) in segments.iter().zip(segment_widths(segments, width)) {
        let label_len = segment.value.chars().count();
        print!("{}", Theme::bg(segment_color(segment.kind, theme)));
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bold());
        if label_len + 2 <= cells {
            let left = (cells - label_len) / 2;
            print!("{}", " ".repeat(left));
            print!("{}", segment.value);
            print!("{}", " ".repeat(cells - left - label_len));
        } else {
            print!("{}", " ".repeat(cells));
        }
        print!("{}", Theme::reset());
    }
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(kind: StatKind, weight: f64) -> StatSegment {
        StatSegment {
            kind,
            value: "1.0K".to_string(),
            weight,
        }
    }

    #[test]
    fn widths_follow_weights_and_fill_the_bar() {
        let segments = [
            segment(StatKind::Deceased, 0.3),
            segment(StatKind::Recovered, 0.5),
            segment(StatKind::Confirmed, 1.0),
        ];
        let widths = segment_widths(&segments, 90);
        assert_eq!(widths, vec![15, 25, 50]);

        let narrow = segment_widths(&segments, 7);
        assert_eq!(narrow.iter().sum::<usize>(), 7);
    }

    #[test]
    fn zero_weights_render_nothing() {
        let segments = [segment(StatKind::Confirmed, 0.0)];
        assert_eq!(segment_widths(&segments, 40), vec![0]);
        assert!(segment_widths(&[], 40).is_empty());
    }
}
