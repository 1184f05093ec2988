//! Tri-state column sort.
//!
//! A [`SortState`] pairs the column being sorted with its order. Each press of a
//! sort button advances the order `Asc → Desc → None → Asc`; reaching `None`
//! also clears the column.

use super::summary::Country;
use serde::{Deserialize, Serialize};

/// Numeric column a country list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    TotalConfirmed,
    TotalRecovered,
    TotalDeaths,
    None,
}

impl SortKey {
    /// Sort buttons in display order.
    pub const BUTTONS: [Self; 3] = [Self::TotalConfirmed, Self::TotalRecovered, Self::TotalDeaths];

    /// Button label shown in the sort bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalConfirmed => "Active",
            Self::TotalRecovered => "Recovered",
            Self::TotalDeaths => "Deaths",
            Self::None => "",
        }
    }

    /// Reads the column value from a country, `None` for [`SortKey::None`].
    #[must_use]
    pub const fn value(self, country: &Country) -> Option<u64> {
        match self {
            Self::TotalConfirmed => Some(country.total_confirmed),
            Self::TotalRecovered => Some(country.total_recovered),
            Self::TotalDeaths => Some(country.total_deaths),
            Self::None => None,
        }
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
    None,
}

impl SortOrder {
    /// Next order in the toggle cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::None,
            Self::None => Self::Asc,
        }
    }
}

/// Active sort column and order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self::NONE
    }
}

impl SortState {
    /// No sort applied.
    pub const NONE: Self = Self {
        key: SortKey::None,
        order: SortOrder::None,
    };

    /// Returns the state after pressing the button for `key`.
    ///
    /// The order advances from the previous order even when a different column
    /// is pressed, so pressing `Deaths` while `Active` is ascending yields
    /// `Deaths` descending. Pressing [`SortKey::None`] clears the sort.
    ///
    /// ```
    /// use covidash::domain::{SortKey, SortOrder, SortState};
    ///
    /// let state = SortState::default().toggle(SortKey::TotalDeaths);
    /// assert_eq!(state, SortState { key: SortKey::TotalDeaths, order: SortOrder::Asc });
    /// ```
    #[must_use]
    pub const fn toggle(self, key: SortKey) -> Self {
        if matches!(key, SortKey::None) {
            return Self::NONE;
        }
        let order = self.order.next();
        let key = match order {
            SortOrder::None => SortKey::None,
            SortOrder::Asc | SortOrder::Desc => key,
        };
        Self { key, order }
    }

    /// Whether a column is selected.
    #[must_use]
    pub fn is_active(self) -> bool {
        self.key != SortKey::None && self.order != SortOrder::None
    }

    /// Arrow shown next to a button label; empty for inactive columns.
    #[must_use]
    pub fn indicator(self, key: SortKey) -> &'static str {
        if self.key != key {
            return "";
        }
        match self.order {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
            SortOrder::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_through_three_states() {
        let asc = SortState::NONE.toggle(SortKey::TotalConfirmed);
        assert_eq!(asc.order, SortOrder::Asc);
        assert_eq!(asc.key, SortKey::TotalConfirmed);

        let desc = asc.toggle(SortKey::TotalConfirmed);
        assert_eq!(desc.order, SortOrder::Desc);
        assert_eq!(desc.key, SortKey::TotalConfirmed);

        let none = desc.toggle(SortKey::TotalConfirmed);
        assert_eq!(none, SortState::NONE);
        assert!(!none.is_active());
    }

    #[test]
    fn switching_column_continues_the_cycle() {
        let asc = SortState::NONE.toggle(SortKey::TotalConfirmed);
        let next = asc.toggle(SortKey::TotalDeaths);
        assert_eq!(next.key, SortKey::TotalDeaths);
        assert_eq!(next.order, SortOrder::Desc);
    }

    #[test]
    fn toggling_no_column_clears_sort() {
        assert_eq!(SortState::NONE.toggle(SortKey::None), SortState::NONE);
        let asc = SortState::NONE.toggle(SortKey::TotalDeaths);
        assert_eq!(asc.toggle(SortKey::None), SortState::NONE);
    }

    #[test]
    fn indicator_only_on_active_column() {
        let desc = SortState {
            key: SortKey::TotalRecovered,
            order: SortOrder::Desc,
        };
        assert_eq!(desc.indicator(SortKey::TotalRecovered), "↓");
        assert_eq!(desc.indicator(SortKey::TotalDeaths), "");
        assert_eq!(SortState::NONE.indicator(SortKey::TotalDeaths), "");
    }
}
