//! Column sorting for country lists.
//!
//! Sorting is stable: countries with equal values keep their relative order
//! from the filtered list, in both directions.

use crate::domain::{Country, SortKey, SortOrder};
use std::cmp::Reverse;

/// Sorts `countries` by `key` in `order`.
///
/// Returns an empty list when either the key or the order is `None`; callers
/// treat an empty sorted list as "show the filtered list unchanged".
///
/// # Examples
///
/// ```
/// use covidash::domain::{Country, SortKey, SortOrder};
/// use covidash::listing::sort_countries;
///
/// let countries = vec![
///     Country { country: "A".into(), total_deaths: 5, ..Default::default() },
///     Country { country: "B".into(), total_deaths: 9, ..Default::default() },
/// ];
/// let sorted = sort_countries(countries.clone(), SortKey::TotalDeaths, SortOrder::Desc);
/// assert_eq!(sorted[0].country, "B");
/// assert!(sort_countries(countries, SortKey::TotalDeaths, SortOrder::None).is_empty());
/// ```
#[must_use]
pub fn sort_countries(mut countries: Vec<Country>, key: SortKey, order: SortOrder) -> Vec<Country> {
    let _span = tracing::debug_span!("sort_countries", count = countries.len(), key = ?key, order = ?order)
        .entered();

    match order {
        SortOrder::None => return Vec::new(),
        _ if key == SortKey::None => return Vec::new(),
        SortOrder::Asc => countries.sort_by_key(|country| key.value(country)),
        SortOrder::Desc => countries.sort_by_key(|country| Reverse(key.value(country))),
    }

    tracing::debug!("countries sorted");
    countries
}

/// The `n` countries with the most confirmed cases, highest first.
#[must_use]
pub fn top_countries(countries: &[Country], n: usize) -> Vec<Country> {
    let mut top = sort_countries(countries.to_vec(), SortKey::TotalConfirmed, SortOrder::Desc);
    top.truncate(n);
    top
}
