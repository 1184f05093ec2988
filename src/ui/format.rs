//! Number, timestamp and text formatting for display.

use crate::domain::Country;

/// Formats a count with thousands separators: `1234567` → `"1,234,567"`.
#[must_use]
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats a total in thousands with one decimal: `512345` → `"512.3K"`.
#[must_use]
pub fn compact_thousands(value: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let thousands = value as f64 / 1000.0;
    format!("{thousands:.1}K")
}

/// Formats a daily increase, `None` when there was none.
#[must_use]
pub fn new_count(value: u64) -> Option<String> {
    (value > 0).then(|| format!("+{}", group_digits(value)))
}

/// Formats the last-updated timestamp of a country.
///
/// Unparseable dates are shown verbatim.
#[must_use]
pub fn updated_label(country: &Country) -> String {
    country.updated_at().map_or_else(
        || country.date.clone(),
        |date| date.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

/// Truncates to `width` characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Pads `text` with spaces to `width` characters.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_by_thousands() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(1_234_567), "1,234,567");
    }

    #[test]
    fn compacts_to_thousands() {
        assert_eq!(compact_thousands(512_345), "512.3K");
        assert_eq!(compact_thousands(0), "0.0K");
        assert_eq!(compact_thousands(50), "0.1K");
    }

    #[test]
    fn zero_increase_is_hidden() {
        assert_eq!(new_count(0), None);
        assert_eq!(new_count(1500), Some("+1,500".to_string()));
    }

    #[test]
    fn updated_label_falls_back_to_raw_date() {
        let mut country = Country {
            date: "2022-04-18T10:40:45.594Z".to_string(),
            ..Country::default()
        };
        assert_eq!(updated_label(&country), "2022-04-18 10:40 UTC");
        country.date = "yesterday".to_string();
        assert_eq!(updated_label(&country), "yesterday");
    }

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate("Saint Vincent and the Grenadines", 12), "Saint Vin...");
        assert_eq!(truncate("Chad", 12), "Chad");
        assert_eq!(pad("Chad", 6), "Chad  ");
    }
}
