//! Case-insensitive country name search.

use crate::domain::Country;

/// Keeps the countries whose name contains `keyword`, ignoring case.
///
/// An empty keyword keeps every country. Input order is preserved.
///
/// ```
/// use covidash::domain::Country;
/// use covidash::listing::filter_countries;
///
/// let countries = vec![
///     Country { country: "Germany".into(), ..Default::default() },
///     Country { country: "Niger".into(), ..Default::default() },
///     Country { country: "France".into(), ..Default::default() },
/// ];
/// let names: Vec<_> = filter_countries(&countries, "GER")
///     .into_iter()
///     .map(|c| c.country)
///     .collect();
/// assert_eq!(names, ["Germany", "Niger"]);
/// ```
#[must_use]
pub fn filter_countries(countries: &[Country], keyword: &str) -> Vec<Country> {
    let _span = tracing::debug_span!(
        "filter_countries",
        total = countries.len(),
        keyword_len = keyword.len()
    )
    .entered();

    let needle = keyword.to_lowercase();
    let filtered: Vec<Country> = countries
        .iter()
        .filter(|country| needle.is_empty() || country.country.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "search filter applied");
    filtered
}

/// Character range `(start, end)` of the first case-insensitive match of
/// `keyword` in `name`, used for highlighting.
///
/// Ranges are in characters, not bytes, so they index safely into names such
/// as "Côte d'Ivoire".
#[must_use]
pub fn match_range(name: &str, keyword: &str) -> Option<(usize, usize)> {
    if keyword.is_empty() {
        return None;
    }

    let haystack: Vec<char> = name.chars().flat_map(char::to_lowercase).collect();
    let needle: Vec<char> = keyword.chars().flat_map(char::to_lowercase).collect();

    // Lowercasing can expand a char (e.g. 'İ'); fall back to no highlight.
    if haystack.len() != name.chars().count() || needle.len() > haystack.len() {
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|start| (start, start + needle.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str) -> Country {
        Country {
            country: name.to_string(),
            ..Country::default()
        }
    }

    #[test]
    fn empty_keyword_keeps_everything_in_order() {
        let countries = vec![country("Chile"), country("Austria"), country("Brazil")];
        let filtered = filter_countries(&countries, "");
        assert_eq!(filtered, countries);
    }

    #[test]
    fn no_match_yields_empty_list() {
        let countries = vec![country("Chile"), country("Austria")];
        assert!(filter_countries(&countries, "zz").is_empty());
    }

    #[test]
    fn match_range_is_character_based() {
        assert_eq!(match_range("Côte d'Ivoire", "ivo"), Some((7, 10)));
        assert_eq!(match_range("Germany", "MAN"), Some((3, 6)));
        assert_eq!(match_range("Germany", "xyz"), None);
        assert_eq!(match_range("Germany", ""), None);
    }
}
