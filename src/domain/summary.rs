//! Statistics model returned by the summary endpoint.
//!
//! The API uses PascalCase field names (`TotalConfirmed`, `CountryCode`, `ID`);
//! serde attributes map them onto snake_case Rust fields. Unknown fields such as
//! the per-country `Premium` object are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offset from an ASCII uppercase letter to its regional indicator symbol.
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Global totals plus the per-country breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Summary {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub message: String,
    pub global: GlobalStats,
    /// Missing and `null` both decode to an empty list.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub date: String,
}

/// Worldwide totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalStats {
    #[serde(default)]
    pub new_confirmed: u64,
    #[serde(default)]
    pub total_confirmed: u64,
    #[serde(default)]
    pub new_deaths: u64,
    #[serde(default)]
    pub total_deaths: u64,
    #[serde(default)]
    pub new_recovered: u64,
    #[serde(default)]
    pub total_recovered: u64,
    #[serde(default)]
    pub date: String,
}

/// One entry of the country list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    #[serde(rename = "ID", default)]
    pub id: String,
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub new_confirmed: u64,
    #[serde(default)]
    pub total_confirmed: u64,
    #[serde(default)]
    pub new_deaths: u64,
    #[serde(default)]
    pub total_deaths: u64,
    #[serde(default)]
    pub new_recovered: u64,
    #[serde(default)]
    pub total_recovered: u64,
    #[serde(default)]
    pub date: String,
}

impl Country {
    /// Returns the flag emoji for the two-letter country code.
    ///
    /// Each ASCII letter maps to its regional indicator symbol; an empty code
    /// yields an empty string.
    ///
    /// ```
    /// use covidash::domain::Country;
    ///
    /// let country = Country { country_code: "de".into(), ..Default::default() };
    /// assert_eq!(country.flag_emoji(), "\u{1F1E9}\u{1F1EA}");
    /// ```
    #[must_use]
    pub fn flag_emoji(&self) -> String {
        self.country_code
            .to_uppercase()
            .chars()
            .filter(char::is_ascii_uppercase)
            .filter_map(|c| char::from_u32(REGIONAL_INDICATOR_OFFSET + u32::from(c)))
            .collect()
    }

    /// Parses the last-updated timestamp, `None` if it is not RFC 3339.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|date| date.with_timezone(&Utc))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Country>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Country>>::deserialize(deserializer)?.unwrap_or_default())
}
